//! Persisted user settings.
//!
//! Settings are stored as a JSON object. Every field is optional in the file
//! and falls back to its default value, so that an empty object `{}` is a valid
//! settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::axis::Orientation;
use crate::ruler::RulerConfig;
use crate::scheme::{ColorScheme, Interpolation};

/// Root of the settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick spacing and labelling of the rulers
    pub ruler: RulerSettings,
    /// Energy levels used to color seismic events
    pub levels: ColorScheme,
    /// Interpolation between energy levels
    pub interpolation: Interpolation,
}

/// Ruler settings shared by all the rulers of the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerSettings {
    /// Minimum pixel spacing between major ticks
    pub threshold: f64,
    /// Magnitude above which labels switch to scientific notation
    pub exponent_threshold: f64,
    /// Number of minor intervals per major interval
    pub minor_divisions: u32,
}

impl Default for RulerSettings {
    fn default() -> Self {
        let config = RulerConfig::default();
        RulerSettings {
            threshold: config.threshold(),
            exponent_threshold: config.exponent_threshold(),
            minor_divisions: config.minor_divisions(),
        }
    }
}

impl RulerSettings {
    /// A ruler configuration with these settings
    pub fn config(&self, orientation: Orientation) -> RulerConfig {
        RulerConfig::new(orientation)
            .with_threshold(self.threshold)
            .with_exponent_threshold(self.exponent_threshold)
            .with_minor_divisions(self.minor_divisions)
    }

    /// Check that these settings make a valid ruler configuration
    pub fn validate(&self) -> Result<(), Error> {
        self.config(Orientation::Horizontal).validate()
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(s: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(s).map_err(Error::Settings)?;
        settings.ruler.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a pretty printed JSON string
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::Settings)
    }

    /// Load settings from `path`.
    ///
    /// If `create` is set and the file does not exist, it is created with an empty object.
    pub fn load(path: impl AsRef<Path>, create: bool) -> Result<Self, Error> {
        let path = path.as_ref();
        if create && !path.exists() {
            log::debug!("creating settings file {}", path.display());
            fs::write(path, "{}")?;
        }
        let s = fs::read_to_string(path)?;
        let settings = Self::from_json(&s)?;
        log::debug!(
            "loaded settings from {} ({} energy levels)",
            path.display(),
            settings.levels.len()
        );
        Ok(settings)
    }

    /// Write settings to `path`.
    ///
    /// The content goes first to a `.tmp` sibling which then replaces `path`,
    /// so that a failed write leaves the previous file intact.
    pub fn flush(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let tmp = tmp_path(path);
        if let Err(err) = fs::write(&tmp, json) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        fs::rename(&tmp, path)?;
        log::debug!("flushed settings to {}", path.display());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::scheme::ColorStop;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "sigmaview-settings-{}-{}.json",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.ruler.threshold, 50.0);
        assert_eq!(s.ruler.exponent_threshold, 10000.0);
        assert_eq!(s.ruler.minor_divisions, 5);
        assert_eq!(s.levels, ColorScheme::default());
        assert_eq!(s.interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_partial() {
        let s = Settings::from_json(
            r#"{"ruler": {"threshold": 80}, "interpolation": "flat-middle", "levels": [[0, 0, 0, 1], [255, 255, 255, 10]]}"#,
        )
        .unwrap();
        assert_eq!(s.ruler.threshold, 80.0);
        assert_eq!(s.ruler.minor_divisions, 5);
        assert_eq!(s.interpolation, Interpolation::FlatMiddle);
        assert_eq!(s.levels.stops()[1], ColorStop::new(color::WHITE, 10.0));

        let config = s.ruler.config(Orientation::Vertical);
        assert_eq!(config.threshold(), 80.0);
        assert_eq!(config.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            Settings::from_json(r#"{"interpolation": "wobbly"}"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(Settings::from_json("[1, 2"), Err(Error::Settings(_))));
    }

    #[test]
    fn test_ruler_bounds() {
        assert!(matches!(
            Settings::from_json(r#"{"ruler": {"minor_divisions": 4000000000}}"#),
            Err(Error::InvalidMinorDivisions(4_000_000_000))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"ruler": {"minor_divisions": 0}}"#),
            Err(Error::InvalidMinorDivisions(0))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"ruler": {"threshold": -4}}"#),
            Err(Error::InvalidThreshold(_))
        ));
        let s = Settings::from_json(r#"{"ruler": {"minor_divisions": 100}}"#).unwrap();
        assert_eq!(s.ruler.minor_divisions, crate::axis::MAX_MINOR_DIVISIONS);
    }

    #[test_log::test]
    fn test_load_create() {
        let path = temp_file("create");
        assert!(matches!(Settings::load(&path, false), Err(Error::Io(_))));

        let s = Settings::load(&path, true).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        fs::remove_file(&path).unwrap();
    }

    #[test_log::test]
    fn test_flush_load() {
        let path = temp_file("flush");
        let mut s = Settings::default();
        s.ruler.minor_divisions = 10;
        s.interpolation = Interpolation::Cosine;
        s.levels.insert(ColorStop::new(color::GREEN, 50.0)).unwrap();
        s.flush(&path).unwrap();

        assert!(!tmp_path(&path).exists());
        let loaded = Settings::load(&path, false).unwrap();
        assert_eq!(loaded, s);
        fs::remove_file(&path).unwrap();
    }
}
