//! Run settings and preferences
//!
//! Persisted as JSON: LocalStorage in the browser, an optional file natively.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sim::{ForceModel, SimConfig};

/// Program variant, each exploring one more mechanic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Free motion, nothing to hit
    Drift,
    /// Bounce off the star and the view bounds
    StarBounce,
    /// Star, bounds and circular obstacles
    #[default]
    ObstacleBounce,
    /// Everything above, plus aging, color easing and expiry
    Lifecycle,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Drift,
        Variant::StarBounce,
        Variant::ObstacleBounce,
        Variant::Lifecycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Drift => "Drift",
            Variant::StarBounce => "Star Bounce",
            Variant::ObstacleBounce => "Obstacle Bounce",
            Variant::Lifecycle => "Lifecycle",
        }
    }

    /// Variant bound to a number key (1-based)
    pub fn from_hotkey(key: &str) -> Option<Self> {
        let index: usize = key.parse().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drift" => Ok(Variant::Drift),
            "star" | "star_bounce" | "starbounce" => Ok(Variant::StarBounce),
            "obstacle" | "obstacles" | "obstacle_bounce" => Ok(Variant::ObstacleBounce),
            "lifecycle" | "life" => Ok(Variant::Lifecycle),
            _ => Err(format!("Unknown variant: {}", s)),
        }
    }
}

/// User-selectable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which program variant to run
    pub variant: Variant,
    /// Optional force model layered on the variant
    #[serde(default)]
    pub force: ForceModel,
    /// Fixed run seed; a fresh one is picked when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Draw the ray from the bottom of the view to the mouse
    #[serde(default = "default_show_probe")]
    pub show_probe: bool,
}

fn default_show_probe() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            force: ForceModel::None,
            seed: None,
            show_probe: true,
        }
    }
}

impl Settings {
    /// Simulation config for the selected variant and force model
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::for_variant(self.variant).with_force(self.force)
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "particle_bounce_settings";

    /// Environment variable naming a native settings file
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "PARTICLE_BOUNCE_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `PARTICLE_BOUNCE_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write settings back to the file named by `PARTICLE_BOUNCE_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Cannot write settings file {}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Cannot serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_round_trip() {
        for variant in Variant::ALL {
            let key = variant.as_str().to_lowercase().replace(' ', "_");
            assert_eq!(key.parse::<Variant>(), Ok(variant));
        }
        assert_eq!("STAR".parse::<Variant>(), Ok(Variant::StarBounce));
        assert!("nope".parse::<Variant>().is_err());
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(Variant::from_hotkey("1"), Some(Variant::Drift));
        assert_eq!(Variant::from_hotkey("4"), Some(Variant::Lifecycle));
        assert_eq!(Variant::from_hotkey("0"), None);
        assert_eq!(Variant::from_hotkey("5"), None);
        assert_eq!(Variant::from_hotkey("x"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "variant": "Lifecycle" }"#).unwrap();
        assert_eq!(settings.variant, Variant::Lifecycle);
        assert_eq!(settings.force, ForceModel::None);
        assert_eq!(settings.seed, None);
        assert!(settings.show_probe);
    }

    #[test]
    fn test_force_from_json() {
        let settings = Settings::from_json(
            r#"{ "variant": "Drift", "force": { "Gravity": { "acceleration": 0.25 } }, "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(settings.force, ForceModel::Gravity { acceleration: 0.25 });
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.sim_config().force, settings.force);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ variant: 3 }").is_err());
    }
}
