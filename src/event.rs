use midi_msg::{Channel, ChannelVoiceMsg, MidiMsg};

/// Velocity sent with every note-off the engine generates itself.
pub const RELEASE_VELOCITY: u8 = 64;

/// The slice of MIDI the engine cares about. Everything that is not a note
/// on or off, including bytes midi-msg cannot parse, rides along untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RemapEvent {
    NoteOn {
        channel: Channel,
        note: u8,
        velocity: u8,
    },
    NoteOff {
        channel: Channel,
        note: u8,
        velocity: u8,
    },
    Other(Vec<u8>),
}

impl RemapEvent {
    pub fn note_on(channel: Channel, note: u8, velocity: u8) -> Self {
        RemapEvent::NoteOn {
            channel,
            note,
            velocity,
        }
    }

    pub fn note_off(channel: Channel, note: u8) -> Self {
        RemapEvent::NoteOff {
            channel,
            note,
            velocity: RELEASE_VELOCITY,
        }
    }

    pub fn from_midi(bytes: &[u8]) -> Self {
        match MidiMsg::from_midi(bytes) {
            Ok((MidiMsg::ChannelVoice { channel, msg }, _len)) => match msg {
                ChannelVoiceMsg::NoteOn { note, velocity } => {
                    RemapEvent::note_on(channel, note, velocity)
                }
                ChannelVoiceMsg::NoteOff { note, velocity } => RemapEvent::NoteOff {
                    channel,
                    note,
                    velocity,
                },
                _ => RemapEvent::Other(bytes.to_vec()),
            },
            _ => RemapEvent::Other(bytes.to_vec()),
        }
    }

    pub fn to_midi(&self) -> Vec<u8> {
        match self {
            RemapEvent::NoteOn {
                channel,
                note,
                velocity,
            } => MidiMsg::ChannelVoice {
                channel: *channel,
                msg: ChannelVoiceMsg::NoteOn {
                    note: *note,
                    velocity: *velocity,
                },
            }
            .to_midi(),
            RemapEvent::NoteOff {
                channel,
                note,
                velocity,
            } => MidiMsg::ChannelVoice {
                channel: *channel,
                msg: ChannelVoiceMsg::NoteOff {
                    note: *note,
                    velocity: *velocity,
                },
            }
            .to_midi(),
            RemapEvent::Other(bytes) => bytes.clone(),
        }
    }

    /// The same note-on with its pitch replaced; channel and velocity are kept.
    pub fn with_note(&self, new_note: u8) -> Self {
        match self {
            RemapEvent::NoteOn {
                channel, velocity, ..
            } => RemapEvent::note_on(*channel, new_note, *velocity),
            RemapEvent::NoteOff {
                channel, velocity, ..
            } => RemapEvent::NoteOff {
                channel: *channel,
                note: new_note,
                velocity: *velocity,
            },
            RemapEvent::Other(_) => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_notes() {
        assert_eq!(
            RemapEvent::from_midi(&[0x90, 60, 100]),
            RemapEvent::note_on(Channel::Ch1, 60, 100)
        );
        assert_eq!(
            RemapEvent::from_midi(&[0x83, 61, 0]),
            RemapEvent::NoteOff {
                channel: Channel::Ch4,
                note: 61,
                velocity: 0
            }
        );
    }

    #[test]
    fn test_other_messages_kept_verbatim() {
        for bytes in [vec![0xB0, 7, 127], vec![0xF8], vec![0xC2, 5], vec![0xFF, 0xFF, 0xFF], vec![]] {
            let event = RemapEvent::from_midi(&bytes);
            assert_eq!(event, RemapEvent::Other(bytes.clone()));
            assert_eq!(event.to_midi(), bytes);
        }
    }

    #[test]
    fn test_encode_notes() {
        assert_eq!(
            RemapEvent::note_on(Channel::Ch2, 26, 90).to_midi(),
            vec![0x91, 26, 90]
        );
        assert_eq!(
            RemapEvent::note_off(Channel::Ch1, 26).to_midi(),
            vec![0x80, 26, RELEASE_VELOCITY]
        );
    }

    #[test]
    fn test_with_note_keeps_attributes() {
        let on = RemapEvent::note_on(Channel::Ch10, 60, 33);
        assert_eq!(on.with_note(29), RemapEvent::note_on(Channel::Ch10, 29, 33));
    }
}
