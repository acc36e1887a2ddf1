//! Runtime configuration for the field engine.
//!
//! The only knob is how hex input is decoded. The reference behavior is
//! permissive: non-hex characters silently decode as digit 0. Hosts that
//! want malformed input rejected select strict mode, either in code or via
//! the `K1FE_HEX_DECODE` environment variable.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::FieldError;

/// Environment variable read by [`FieldConfig::from_env`].
pub const HEX_DECODE_ENV: &str = "K1FE_HEX_DECODE";

/// How hex strings are turned into field elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexDecodeMode {
    /// Non-hex characters decode as 0 and over-long input keeps its last
    /// 64 digits.
    #[default]
    Permissive,
    /// Non-hex characters and input longer than 64 digits are errors.
    Strict,
}

impl FromStr for HexDecodeMode {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" | "lenient" => Ok(HexDecodeMode::Permissive),
            "strict" => Ok(HexDecodeMode::Strict),
            _ => Err(FieldError::InvalidConfig {
                key: HEX_DECODE_ENV,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HexDecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexDecodeMode::Permissive => f.write_str("permissive"),
            HexDecodeMode::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldConfig {
    pub hex_decode: HexDecodeMode,
}

impl FieldConfig {
    pub fn with_hex_decode(mut self, mode: HexDecodeMode) -> Self {
        self.hex_decode = mode;
        self
    }

    /// Load from the process environment. Unset variables keep defaults.
    pub fn from_env() -> Result<Self, FieldError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FieldError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = FieldConfig::default();
        if let Some(raw) = lookup(HEX_DECODE_ENV) {
            config.hex_decode = raw.parse()?;
        }
        debug!(target: "k1fe::config", hex_decode = %config.hex_decode, "field config loaded");
        Ok(config)
    }
}
