//! Process-wide lookup of mounted controllers.
//!
//! An application mounts one controller per overlay type near its root.
//! Code that only knows the overlay type can then find it with
//! [`Notifier::current`] instead of having the handle passed down.

use std::{
    any::{Any, TypeId},
    collections::{HashMap, hash_map::Entry},
    sync::{Arc, LazyLock},
};

use parking_lot::Mutex;

use crate::{controller::Notifier, overlay::OverlaySlot};

static MOUNTED: LazyLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Errors that can occur while mounting a controller.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Another controller is already mounted for the same overlay type.
    #[error("a notifier is already mounted for overlay type `{0}`")]
    AlreadyMounted(&'static str),
}

/// Keeps a controller mounted. Dropping the guard disposes the controller,
/// which unmounts it; so does calling [`Notifier::dispose`] directly.
pub struct MountGuard<S: OverlaySlot> {
    notifier: Notifier<S>,
}

impl<S: OverlaySlot> MountGuard<S> {
    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }
}

impl<S: OverlaySlot> Drop for MountGuard<S> {
    fn drop(&mut self) {
        self.notifier.dispose();
    }
}

/// Removes `notifier` from the registry if it is the one mounted for `S`.
pub(crate) fn unmount<S: OverlaySlot>(notifier: &Notifier<S>) {
    let unmounted = {
        let mut mounted = MOUNTED.lock();
        let owned = mounted
            .get(&TypeId::of::<S>())
            .and_then(|mounted| mounted.downcast_ref::<Notifier<S>>())
            .is_some_and(|mounted| Arc::ptr_eq(&mounted.inner, &notifier.inner));
        if owned {
            mounted.remove(&TypeId::of::<S>())
        } else {
            None
        }
    };
    if unmounted.is_some() {
        log::debug!("Unmounted notifier for {}", std::any::type_name::<S>());
    }
}

impl<S: OverlaySlot> Notifier<S> {
    /// Registers this controller as the one serving overlay type `S`.
    pub fn mount(&self) -> Result<MountGuard<S>, RegistryError> {
        let mut mounted = MOUNTED.lock();
        match mounted.entry(TypeId::of::<S>()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyMounted(std::any::type_name::<S>())),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(self.clone()));
                log::debug!("Mounted notifier for {}", std::any::type_name::<S>());
                Ok(MountGuard {
                    notifier: self.clone(),
                })
            }
        }
    }

    /// The controller currently mounted for overlay type `S`.
    pub fn current() -> Option<Self> {
        MOUNTED
            .lock()
            .get(&TypeId::of::<S>())
            .and_then(|mounted| mounted.downcast_ref::<Self>())
            .cloned()
    }
}
