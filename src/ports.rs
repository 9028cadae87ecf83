//! midir-backed inbound and outbound channels.
//!
//! Opening a port is the only place a `ChannelError::Open` can come from. The
//! connections close when the source or sink is dropped.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use midir::{
    Ignore, MidiIO, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection,
};
use read_input::prelude::*;
use tracing::{debug, info};

use crate::channel::{EventSink, EventSource, StopSignal, STOP_POLL};
use crate::error::ChannelError;
use crate::event::RemapEvent;

const CLIENT_NAME: &str = "playseq";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PortChoice {
    /// The first port the system reports.
    Default,
    /// An exact port name, or failing that a case-insensitive fragment of one.
    Named(String),
    /// Ask on the console when there is more than one port.
    Interactive,
}

impl PortChoice {
    pub fn from_args(name: Option<&str>, interactive: bool) -> Self {
        match name {
            Some(name) if !name.is_empty() => PortChoice::Named(name.to_owned()),
            _ if interactive => PortChoice::Interactive,
            _ => PortChoice::Default,
        }
    }
}

pub fn list_input_ports() -> Result<Vec<String>, ChannelError> {
    Ok(port_names(&MidiInput::new(CLIENT_NAME)?))
}

pub fn list_output_ports() -> Result<Vec<String>, ChannelError> {
    Ok(port_names(&MidiOutput::new(CLIENT_NAME)?))
}

fn port_names<IO: MidiIO>(io: &IO) -> Vec<String> {
    io.ports()
        .iter()
        .map(|p| io.port_name(p).unwrap_or_else(|_| "<unnamed>".to_owned()))
        .collect()
}

/// Index into `names` for `choice`; `None` when nothing matches.
pub fn match_port(names: &[String], choice: &PortChoice) -> Option<usize> {
    match choice {
        PortChoice::Default | PortChoice::Interactive => (!names.is_empty()).then_some(0),
        PortChoice::Named(wanted) => names.iter().position(|n| n == wanted).or_else(|| {
            let wanted = wanted.to_lowercase();
            names
                .iter()
                .position(|n| n.to_lowercase().contains(wanted.as_str()))
        }),
    }
}

fn select_port<IO: MidiIO>(
    io: &IO,
    choice: &PortChoice,
    kind: &str,
) -> Result<(IO::Port, String), ChannelError>
where
    IO::Port: Clone,
{
    let ports = io.ports();
    let names = port_names(io);
    let index = if *choice == PortChoice::Interactive && names.len() > 1 {
        println!("Available MIDI {kind} ports");
        user_pick_index(&names)
    } else {
        match_port(&names, choice).ok_or_else(|| match choice {
            PortChoice::Named(name) => {
                ChannelError::Open(format!("no MIDI {kind} port matches '{name}'"))
            }
            _ => ChannelError::Open(format!("no MIDI {kind} ports found")),
        })?
    };
    Ok((ports[index].clone(), names[index].clone()))
}

fn user_pick_index(names: &[String]) -> usize {
    for (i, name) in names.iter().enumerate() {
        println!("{}) {}", i + 1, name);
    }
    let choice: usize = input()
        .msg("Enter choice: ")
        .inside(1..=names.len())
        .get();
    choice - 1
}

pub struct MidiInputSource {
    connection: Option<MidiInputConnection<()>>,
    events: Receiver<RemapEvent>,
    stop: StopSignal,
    name: String,
}

impl MidiInputSource {
    pub fn open(choice: &PortChoice, stop: StopSignal) -> Result<Self, ChannelError> {
        let mut midi_in = MidiInput::new(CLIENT_NAME)?;
        midi_in.ignore(Ignore::ActiveSense);
        let (port, name) = select_port(&midi_in, choice, "input")?;
        let (sender, events) = unbounded();
        let connection = midi_in.connect(
            &port,
            "playseq-in",
            move |_stamp, message, _| {
                // The receiver is gone only once the source has been dropped.
                let _ = sender.send(RemapEvent::from_midi(message));
            },
            (),
        )?;
        info!(port = %name, "opened MIDI input");
        Ok(MidiInputSource {
            connection: Some(connection),
            events,
            stop,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EventSource for MidiInputSource {
    fn next_event(&mut self) -> Result<Option<RemapEvent>, ChannelError> {
        loop {
            if self.stop.is_stopped() {
                return Ok(None);
            }
            match self.events.recv_timeout(STOP_POLL) {
                Ok(event) => return Ok(Some(event)),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(ChannelError::Disconnected),
            }
        }
    }
}

impl Drop for MidiInputSource {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            debug!(port = %self.name, "closed MIDI input");
        }
    }
}

pub struct MidiOutputSink {
    connection: Option<MidiOutputConnection>,
    name: String,
}

impl MidiOutputSink {
    pub fn open(choice: &PortChoice) -> Result<Self, ChannelError> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let (port, name) = select_port(&midi_out, choice, "output")?;
        let connection = midi_out.connect(&port, "playseq-out")?;
        info!(port = %name, "opened MIDI output");
        Ok(MidiOutputSink {
            connection: Some(connection),
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EventSink for MidiOutputSink {
    fn send(&mut self, event: &RemapEvent) -> Result<(), ChannelError> {
        match self.connection.as_mut() {
            Some(connection) => Ok(connection.send(&event.to_midi())?),
            None => Err(ChannelError::Disconnected),
        }
    }
}

impl Drop for MidiOutputSink {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            debug!(port = %self.name, "closed MIDI output");
        }
    }
}
