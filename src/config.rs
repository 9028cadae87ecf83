use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cursor::LoopPolicy;
use crate::engine::RemapSettings;
use crate::error::{ConfigError, ConfigFileError};
use crate::pitch::PitchTransform;
use crate::rest::RestPolicy;

/// Settings a session can take from a TOML file. Command-line flags win.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayConfig {
    #[serde(default = "PlayConfig::default_modulus")]
    pub modulus: i64,
    #[serde(default = "PlayConfig::default_offset")]
    pub offset: i64,
    /// Sign classes that play as rests, any mix of `n`, `z` and `p`.
    #[serde(default)]
    pub rest: String,
    #[serde(default)]
    pub looping: bool,
    /// Step limit (one-shot, at most the sequence length) or reset period
    /// (looping); unset means the sequence length.
    #[serde(default)]
    pub steps: Option<usize>,
    #[serde(default)]
    pub input_port: Option<String>,
    #[serde(default)]
    pub output_port: Option<String>,
}

impl PlayConfig {
    fn default_modulus() -> i64 {
        88
    }

    fn default_offset() -> i64 {
        24
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn settings(&self, sequence_len: usize) -> Result<RemapSettings, ConfigError> {
        let loop_policy = LoopPolicy::for_sequence(self.looping, self.steps, sequence_len);
        loop_policy.validate()?;
        Ok(RemapSettings {
            rest: self.rest.parse::<RestPolicy>()?,
            transform: PitchTransform::new(self.modulus, self.offset)?,
            loop_policy,
        })
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            modulus: Self::default_modulus(),
            offset: Self::default_offset(),
            rest: String::new(),
            looping: false,
            steps: None,
            input_port: None,
            output_port: None,
        }
    }
}
