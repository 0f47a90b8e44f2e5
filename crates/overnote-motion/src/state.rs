use crate::curve::Curve;

/// Snapshot of the values that place a notification on screen.
///
/// `raw_progress` comes from the driver, everything else is derived from it
/// together with the content height and the drag offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    pub raw_progress: f64,
    pub eased_progress: f64,
    pub drag_offset: f64,
    /// How far the entry's bottom edge has travelled below the surface's top
    /// edge: `eased_progress * content_height + drag_offset`.
    pub current_offset: f64,
}

impl AnimationState {
    /// Samples the animation at `raw_progress` for content of the given
    /// height.
    pub fn sample(raw_progress: f64, curve: Curve, content_height: f64, drag_offset: f64) -> Self {
        let raw_progress = crate::clamp_unit(raw_progress);
        let eased_progress = curve.transform(raw_progress);
        Self {
            raw_progress,
            eased_progress,
            drag_offset,
            current_offset: eased_progress * content_height + drag_offset,
        }
    }

    /// Distance from the surface's top edge to the entry's top edge.
    ///
    /// Fully hidden entries sit exactly one content height above the surface;
    /// fully shown ones touch its top edge.
    pub fn top(&self, content_height: f64) -> f64 {
        self.current_offset - content_height
    }
}
