//! The remapping state machine.
//!
//! Every note-on first silences whatever the engine is sounding, then plays the
//! current sequence term (unless it is a rest) and moves the cursor on. Note-offs
//! silence everything the engine is sounding, whichever key was released: several
//! held keys collapse onto the single voice the engine tracks. All other
//! messages pass through verbatim.
//!
//! However a run ends, the engine sends a note-off for every note it still holds
//! before the channels are dropped.

use tracing::{debug, info, warn};

use crate::channel::{EventSink, EventSource, StopSignal};
use crate::cursor::{Advance, LoopPolicy, SequenceCursor};
use crate::error::{ChannelError, ConfigError};
use crate::event::RemapEvent;
use crate::pitch::PitchTransform;
use crate::registry::ActiveNoteRegistry;
use crate::rest::RestPolicy;
use crate::sequence::SequenceSource;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EngineState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunResult {
    /// A one-shot run played its last step.
    CompletedNormally,
    /// A stop was requested through the `StopSignal`, or the inbound stream closed.
    Cancelled,
    ChannelError(ChannelError),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemapSettings {
    pub rest: RestPolicy,
    pub transform: PitchTransform,
    pub loop_policy: LoopPolicy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct RemapEngine {
    state: EngineState,
    rest: RestPolicy,
    transform: PitchTransform,
    cursor: SequenceCursor,
    registry: ActiveNoteRegistry,
}

impl RemapEngine {
    pub fn new(sequence: SequenceSource, settings: RemapSettings) -> Result<Self, ConfigError> {
        let cursor = SequenceCursor::new(sequence, settings.loop_policy)?;
        Ok(RemapEngine {
            state: EngineState::Idle,
            rest: settings.rest,
            transform: settings.transform,
            cursor,
            registry: ActiveNoteRegistry::new(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn cursor(&self) -> &SequenceCursor {
        &self.cursor
    }

    pub fn registry(&self) -> &ActiveNoteRegistry {
        &self.registry
    }

    /// Pulls events from `inbound` until the loop policy, the stream, a stop
    /// request or a channel fault ends the run. The closing note-off flush is
    /// best effort: a note-off the sink refuses is logged and not retried. Both
    /// channels are dropped before this returns. A stopped engine does not start again: it releases the
    /// channels it is handed and returns `CompletedNormally` straight away.
    pub fn run<I: EventSource, O: EventSink>(
        &mut self,
        mut inbound: I,
        mut outbound: O,
        stop: &StopSignal,
    ) -> RunResult {
        if self.state == EngineState::Stopped {
            debug!("engine already stopped");
            return RunResult::CompletedNormally;
        }
        self.state = EngineState::Running;
        info!(
            terms = self.cursor.sequence().len(),
            policy = ?self.cursor.policy(),
            rest = %self.rest,
            modulus = %self.transform.modulus(),
            offset = self.transform.offset(),
            "remapping started"
        );

        let result = self.pump(&mut inbound, &mut outbound, stop);
        self.shutdown(&mut outbound);
        info!(?result, "remapping stopped");
        result
    }

    fn pump<I: EventSource, O: EventSink>(
        &mut self,
        inbound: &mut I,
        outbound: &mut O,
        stop: &StopSignal,
    ) -> RunResult {
        loop {
            if stop.is_stopped() {
                return RunResult::Cancelled;
            }
            let event = match inbound.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => {
                    debug!(requested = stop.is_stopped(), "inbound stream ended");
                    return RunResult::Cancelled;
                }
                Err(e) => {
                    warn!("inbound channel failed: {e}");
                    return RunResult::ChannelError(e);
                }
            };
            match self.process(&event, outbound) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => return RunResult::CompletedNormally,
                Err(e) => {
                    warn!("outbound channel failed: {e}");
                    return RunResult::ChannelError(e);
                }
            }
        }
    }

    fn process<O: EventSink>(
        &mut self,
        event: &RemapEvent,
        outbound: &mut O,
    ) -> Result<Flow, ChannelError> {
        match event {
            RemapEvent::NoteOn { note, channel, .. } => {
                self.release_all(outbound)?;
                let value = self.cursor.current_value();
                if self.rest.is_rest(value) {
                    debug!(input = note, %value, "rest");
                } else {
                    let pitch = self.transform.map_pitch(value);
                    debug!(input = note, %value, output = pitch, "note on");
                    // Recorded before sending so a failed send is still released.
                    self.registry.record(*note, pitch, *channel);
                    outbound.send(&event.with_note(pitch))?;
                }
                Ok(match self.cursor.advance() {
                    Advance::SequenceExhaustedStop => Flow::Stop,
                    Advance::WindowReset => {
                        debug!("window reset");
                        Flow::Continue
                    }
                    Advance::Continue => Flow::Continue,
                })
            }
            RemapEvent::NoteOff { note, .. } => {
                debug!(input = note, "note off");
                self.release_all(outbound)?;
                Ok(Flow::Continue)
            }
            RemapEvent::Other(_) => {
                outbound.send(event)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn release_all<O: EventSink>(&mut self, outbound: &mut O) -> Result<(), ChannelError> {
        let mut pending = self.registry.clear_all().into_iter();
        while let Some(note) = pending.next() {
            if let Err(e) = outbound.send(&RemapEvent::note_off(note.channel, note.output)) {
                self.registry.restore(std::iter::once(note).chain(pending));
                return Err(e);
            }
        }
        Ok(())
    }

    fn shutdown<O: EventSink>(&mut self, outbound: &mut O) {
        for note in self.registry.clear_all() {
            if let Err(e) = outbound.send(&RemapEvent::note_off(note.channel, note.output)) {
                warn!(output = note.output, "could not release note: {e}");
            }
        }
        self.state = EngineState::Stopped;
    }
}
