use midi_msg::Channel;

/// An output note the engine has sounded on behalf of an input key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ActiveNote {
    pub input: u8,
    pub output: u8,
    pub channel: Channel,
}

/// Output notes currently sounding, in the order they were started.
#[derive(Clone, Debug, Default)]
pub struct ActiveNoteRegistry {
    notes: Vec<ActiveNote>,
}

impl ActiveNoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes `output` to `input`, replacing whatever `input` held before.
    pub fn record(&mut self, input: u8, output: u8, channel: Channel) {
        self.notes.retain(|n| n.input != input);
        self.notes.push(ActiveNote {
            input,
            output,
            channel,
        });
    }

    /// Empties the registry and hands back everything that was sounding.
    pub fn clear_all(&mut self) -> Vec<ActiveNote> {
        std::mem::take(&mut self.notes)
    }

    /// Puts back notes whose note-off never reached the output.
    pub fn restore(&mut self, notes: impl IntoIterator<Item = ActiveNote>) {
        for note in notes {
            self.record(note.input, note.output, note.channel);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_all_in_insertion_order() {
        let mut reg = ActiveNoteRegistry::new();
        reg.record(64, 30, Channel::Ch1);
        reg.record(60, 26, Channel::Ch2);
        let cleared = reg.clear_all();
        assert!(reg.is_empty());
        assert_eq!(
            cleared.iter().map(|n| (n.input, n.output)).collect::<Vec<_>>(),
            vec![(64, 30), (60, 26)]
        );
        assert_eq!(cleared[1].channel, Channel::Ch2);
        assert!(reg.clear_all().is_empty());
    }

    #[test]
    fn test_one_entry_per_input() {
        let mut reg = ActiveNoteRegistry::new();
        reg.record(60, 26, Channel::Ch1);
        reg.record(60, 40, Channel::Ch1);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.clear_all().first().map(|n| n.output), Some(40));
    }

    #[test]
    fn test_restore() {
        let mut reg = ActiveNoteRegistry::new();
        reg.record(60, 26, Channel::Ch1);
        let cleared = reg.clear_all();
        reg.restore(cleared.clone());
        assert_eq!(reg.clear_all(), cleared);
    }
}
