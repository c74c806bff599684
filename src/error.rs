//! Error types for the configuration boundary. Gesture recognition itself
//! never fails: unusable input is ignored and out-of-range scales are clamped.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse gesture config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid zoom bounds: min {min}, max {max}")]
    InvalidZoomBounds { min: f64, max: f64 },

    #[error("Invalid mobile breakpoint: {0}px")]
    InvalidBreakpoint(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
