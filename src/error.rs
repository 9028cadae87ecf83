//! Error types for sequence loading, engine construction and MIDI channels.

use thiserror::Error;

/// Rejected settings. Raised while building an engine, never while it runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sequence has no terms")]
    EmptySequence,

    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(i64),

    #[error("step count must be at least 1")]
    ZeroStepCount,

    #[error("invalid rest policy character '{0}' (expected n, z or p)")]
    InvalidRestPolicy(char),
}

/// Faults on the inbound or outbound event channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("could not open MIDI port: {0}")]
    Open(String),

    #[error("MIDI I/O error: {0}")]
    Io(String),

    #[error("MIDI channel disconnected")]
    Disconnected,
}

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot read a term from '{text}'")]
    Parse { line: usize, text: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<midir::InitError> for ChannelError {
    fn from(e: midir::InitError) -> Self {
        ChannelError::Open(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for ChannelError {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        ChannelError::Open(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for ChannelError {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        ChannelError::Open(e.to_string())
    }
}

impl From<midir::SendError> for ChannelError {
    fn from(e: midir::SendError) -> Self {
        ChannelError::Io(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected search reply: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}
