pub mod channel;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod event;
pub mod oeis;
pub mod pitch;
pub mod ports;
pub mod registry;
pub mod rest;
pub mod sequence;

pub use channel::{ChannelSource, EventSink, EventSource, StopSignal};
pub use config::PlayConfig;
pub use cursor::{Advance, LoopPolicy, SequenceCursor};
pub use engine::{EngineState, RemapEngine, RemapSettings, RunResult};
pub use error::{ChannelError, ConfigError, ConfigFileError, FetchError, SequenceError};
pub use event::RemapEvent;
pub use pitch::PitchTransform;
pub use registry::{ActiveNote, ActiveNoteRegistry};
pub use rest::RestPolicy;
pub use sequence::SequenceSource;
