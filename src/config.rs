//! Persisted gesture settings.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::state::pinch_zoom::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::state::ZoomBounds;

pub const STORAGE_KEY: &str = "mg_gesture_config";
pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Viewports narrower than this are treated as mobile.
    pub mobile_breakpoint_px: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
        }
    }
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidZoomBounds { min, max });
        }
        if self.mobile_breakpoint_px == 0 {
            return Err(ConfigError::InvalidBreakpoint(self.mobile_breakpoint_px));
        }
        Ok(())
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds {
            min: self.min_zoom,
            max: self.max_zoom,
        }
    }

    /// Reads the stored config, falling back to defaults when absent or invalid.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("{}; using defaults", err);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
