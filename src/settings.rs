use serde::{Deserialize, Serialize};

pub const DEFAULT_STEP_INTERVAL_MS: u64 = 500;
pub const MIN_STEP_INTERVAL_MS: u64 = 50;
pub const MAX_STEP_INTERVAL_MS: u64 = 2000;

/// User preferences kept across runs through eframe storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub step_interval_ms: u64,
    pub theme: String,
    pub show_threats: bool,
    /// Fixed RNG seed for the plateau shuffle; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            theme: "Classic".to_owned(),
            show_threats: false,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let settings: Self = storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();
        settings.sanitized()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Clamps values a hand-edited or older store could have left out of range.
    pub fn sanitized(mut self) -> Self {
        self.step_interval_ms = self
            .step_interval_ms
            .clamp(MIN_STEP_INTERVAL_MS, MAX_STEP_INTERVAL_MS);
        self
    }
}
