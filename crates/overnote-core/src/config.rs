use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use overnote_motion::Curve;
use serde::{Deserialize, Serialize};
use tokio::fs::{create_dir_all, read_to_string, write};

/// Why the notifier configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no configuration directory for this user.
    #[error("no configuration directory available")]
    NoConfigDir,
    /// Reading `config.toml` or writing its defaults failed.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// `config.toml` is not valid TOML or names an unknown curve.
    #[error("invalid notifier config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The defaults could not be encoded for writing.
    #[error("could not encode default config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Caller-facing defaults of the notification controller.
///
/// The slide-in/slide-out duration is deliberately absent: it is fixed at
/// [`crate::TRANSITION_DURATION`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// How long a notification is held on screen before it dismisses itself,
    /// in milliseconds. Zero makes notifications sticky by default.
    pub hold_duration_ms: u64,
    /// Easing curve applied to the slide transition.
    pub curve: Curve,
    /// Interval between two animation frames, in milliseconds.
    pub frame_interval_ms: u64,
}

impl NotifierConfig {
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: crate::DEFAULT_HOLD_DURATION.as_millis() as u64,
            curve: Curve::Ease,
            frame_interval_ms: overnote_motion::DEFAULT_FRAME_INTERVAL.as_millis() as u64,
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "overnote", "overnote")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Parses a TOML configuration document. Missing keys take their defaults.
pub fn parse_config(contents: &str) -> Result<NotifierConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

/// Loads `config.toml` from the user's configuration directory.
pub async fn load_config() -> Result<NotifierConfig, ConfigError> {
    load_config_from(&config_path()?).await
}

/// Loads the configuration stored at `path`. A missing file is created with
/// the defaults, which are returned.
pub async fn load_config_from(path: &Path) -> Result<NotifierConfig, ConfigError> {
    match read_to_string(path).await {
        Ok(contents) => {
            log::info!("Loaded notifier config from {path:?}");
            parse_config(&contents)
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            let config = NotifierConfig::default();
            if let Some(dir) = path.parent() {
                create_dir_all(dir).await?;
            }
            write(path, toml::to_string_pretty(&config)?).await?;
            log::info!("Wrote default notifier config to {path:?}");
            Ok(config)
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use overnote_motion::Cubic;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config, NotifierConfig::default());
        assert_eq!(config.hold_duration(), Duration::from_secs(10));
        assert_eq!(config.curve, Curve::Ease);
    }

    #[test]
    fn named_curves_and_durations_parse() {
        let config = parse_config(
            r#"
            hold_duration_ms = 0
            curve = "fast_out_slow_in"
            frame_interval_ms = 8
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.hold_duration(), Duration::ZERO);
        assert_eq!(config.curve, Curve::FastOutSlowIn);
        assert_eq!(config.frame_interval(), Duration::from_millis(8));
    }

    #[test]
    fn cubic_curve_parses_from_a_table() {
        let config = parse_config(
            r#"
            [curve.cubic]
            a = 0.2
            b = 0.0
            c = 0.0
            d = 1.0
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.curve, Curve::Cubic(Cubic::new(0.2, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn zero_frame_interval_is_clamped() {
        let config = parse_config("frame_interval_ms = 0").expect("config should parse");
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn unknown_curve_is_rejected() {
        let error = parse_config(r#"curve = "bounce""#).expect_err("curve should be rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let contents = toml::to_string_pretty(&NotifierConfig::default())
            .expect("defaults should serialize");
        assert_eq!(
            parse_config(&contents).expect("defaults should parse"),
            NotifierConfig::default()
        );
    }

    #[tokio::test]
    async fn missing_file_is_created_with_defaults() {
        let dir = std::env::temp_dir().join(format!("overnote-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let created = load_config_from(&path).await.expect("defaults should be written");
        assert_eq!(created, NotifierConfig::default());
        assert!(path.exists());

        std::fs::write(&path, "hold_duration_ms = 2500").expect("config should be writable");
        let loaded = load_config_from(&path).await.expect("config should load");
        assert_eq!(loaded.hold_duration(), Duration::from_millis(2500));
        assert_eq!(loaded.curve, Curve::Ease);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
