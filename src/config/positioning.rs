use thiserror::Error;

use crate::platform::window::RepaintPolicy;

pub const REPAINT_VAR: &str = "WINFRAME_REPAINT";
pub const TEXT_BUFFER_VAR: &str = "WINFRAME_TEXT_BUFFER";

/// Settings applied when moving windows and reading their text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositioningConfig {
    /// Whether moved windows are asked to repaint
    pub repaint: RepaintPolicy,
    /// Capacity, in UTF-16 units, of title and class-name buffers
    pub text_buffer_len: usize,
}

impl PositioningConfig {
    pub const DEFAULT_TEXT_BUFFER: usize = 512;
    pub const MIN_TEXT_BUFFER: usize = 64;
    pub const MAX_TEXT_BUFFER: usize = 32_768;

    /// Reads overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(REPAINT_VAR) {
            config.repaint = parse_repaint(value.trim())?;
        }

        if let Some(value) = lookup(TEXT_BUFFER_VAR) {
            let len = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: TEXT_BUFFER_VAR,
                    value: value.clone(),
                })?;
            config.text_buffer_len = Self::sanitize_text_buffer(len);
        }

        Ok(config)
    }

    pub fn sanitize_text_buffer(value: usize) -> usize {
        value.clamp(Self::MIN_TEXT_BUFFER, Self::MAX_TEXT_BUFFER)
    }
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            repaint: RepaintPolicy::Always,
            text_buffer_len: Self::DEFAULT_TEXT_BUFFER,
        }
    }
}

fn parse_repaint(value: &str) -> Result<RepaintPolicy, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "always" | "1" | "true" => Ok(RepaintPolicy::Always),
        "never" | "0" | "false" => Ok(RepaintPolicy::Never),
        _ => Err(ConfigError::InvalidValue {
            key: REPAINT_VAR,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
