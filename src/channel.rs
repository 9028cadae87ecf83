//! The two ends the engine is wired between, plus the flag that stops it.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use crossbeam_utils::atomic::AtomicCell;

use crate::error::ChannelError;
use crate::event::RemapEvent;

/// How long a blocked read waits before checking for a stop request.
pub(crate) const STOP_POLL: Duration = Duration::from_millis(50);

/// A blocking, ordered stream of inbound events.
pub trait EventSource {
    /// Waits for the next event. `Ok(None)` means the stream has ended or the
    /// wait was cut short by a stop request.
    fn next_event(&mut self) -> Result<Option<RemapEvent>, ChannelError>;
}

pub trait EventSink {
    fn send(&mut self, event: &RemapEvent) -> Result<(), ChannelError>;
}

/// Shared stop request, raised from a signal handler or another thread.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicCell<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load()
    }
}

/// Inbound events arriving over a crossbeam channel. A closed (all senders
/// dropped) and drained channel is the end of the stream.
pub struct ChannelSource {
    events: Receiver<RemapEvent>,
    stop: StopSignal,
}

impl ChannelSource {
    pub fn new(events: Receiver<RemapEvent>, stop: StopSignal) -> Self {
        ChannelSource { events, stop }
    }
}

impl EventSource for ChannelSource {
    fn next_event(&mut self) -> Result<Option<RemapEvent>, ChannelError> {
        loop {
            if self.stop.is_stopped() {
                return Ok(None);
            }
            match self.events.recv_timeout(STOP_POLL) {
                Ok(event) => return Ok(Some(event)),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }
        }
    }
}

impl EventSink for Sender<RemapEvent> {
    fn send(&mut self, event: &RemapEvent) -> Result<(), ChannelError> {
        Sender::send(self, event.clone()).map_err(|_| ChannelError::Disconnected)
    }
}
