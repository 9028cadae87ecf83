use bare_metal_modulo::{MNum, ModNum};
use num::BigInt;

use crate::error::ConfigError;
use crate::sequence::SequenceSource;

/// How many note-ons a run processes, and when the cursor jumps back to the start.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LoopPolicy {
    /// Play at most this many note-ons, then stop.
    OneShot(usize),
    /// Run until cancelled, returning to the first term every this many note-ons.
    Looping(usize),
}

impl LoopPolicy {
    /// `steps` of `None` or `Some(0)` fall back to the sequence length. A
    /// one-shot run never plays more steps than the sequence has terms.
    pub fn for_sequence(looping: bool, steps: Option<usize>, len: usize) -> Self {
        let steps = steps.filter(|s| *s > 0).unwrap_or(len);
        if looping {
            LoopPolicy::Looping(steps)
        } else {
            LoopPolicy::OneShot(steps.min(len))
        }
    }

    pub fn period(&self) -> usize {
        match self {
            LoopPolicy::OneShot(n) | LoopPolicy::Looping(n) => *n,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period() == 0 {
            Err(ConfigError::ZeroStepCount)
        } else {
            Ok(())
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Advance {
    Continue,
    WindowReset,
    SequenceExhaustedStop,
}

#[derive(Clone, Debug)]
pub struct SequenceCursor {
    sequence: SequenceSource,
    policy: LoopPolicy,
    index: ModNum<usize>,
    steps_in_window: usize,
}

impl SequenceCursor {
    pub fn new(sequence: SequenceSource, policy: LoopPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        if sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        let index = ModNum::new(0, sequence.len());
        Ok(SequenceCursor {
            sequence,
            policy,
            index,
            steps_in_window: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.index.a()
    }

    pub fn steps_in_window(&self) -> usize {
        self.steps_in_window
    }

    pub fn policy(&self) -> LoopPolicy {
        self.policy
    }

    pub fn sequence(&self) -> &SequenceSource {
        &self.sequence
    }

    pub fn current_value(&self) -> &BigInt {
        &self.sequence[self.index.a()]
    }

    pub fn advance(&mut self) -> Advance {
        // The data pointer always wraps; the policy only counts note-ons.
        self.index += 1;
        self.steps_in_window += 1;
        match self.policy {
            LoopPolicy::Looping(period) if self.steps_in_window == period => {
                self.index = ModNum::new(0, self.sequence.len());
                self.steps_in_window = 0;
                Advance::WindowReset
            }
            LoopPolicy::OneShot(max_steps) if self.steps_in_window == max_steps => {
                Advance::SequenceExhaustedStop
            }
            _ => Advance::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(terms: &[i64], policy: LoopPolicy) -> SequenceCursor {
        SequenceCursor::new(SequenceSource::new(terms.iter().copied()).unwrap(), policy).unwrap()
    }

    #[test]
    fn test_wraps_after_length() {
        let mut c = cursor(&[10, 20, 30], LoopPolicy::OneShot(100));
        let mut seen = vec![];
        for _ in 0..3 {
            seen.push(c.current_value().clone());
            assert_eq!(c.advance(), Advance::Continue);
        }
        assert_eq!(c.index(), 0);
        assert_eq!(seen, [10, 20, 30].map(BigInt::from));
    }

    #[test]
    fn test_one_shot_stops_on_last_step() {
        let mut c = cursor(&[1, 2, 3, 4], LoopPolicy::OneShot(3));
        assert_eq!(c.advance(), Advance::Continue);
        assert_eq!(c.advance(), Advance::Continue);
        assert_eq!(c.advance(), Advance::SequenceExhaustedStop);
    }

    #[test]
    fn test_one_shot_longer_than_sequence_keeps_wrapping() {
        let mut c = cursor(&[1, 2], LoopPolicy::OneShot(5));
        let mut values = vec![];
        loop {
            values.push(c.current_value().clone());
            if c.advance() == Advance::SequenceExhaustedStop {
                break;
            }
        }
        assert_eq!(values, [1, 2, 1, 2, 1].map(BigInt::from));
    }

    #[test]
    fn test_looping_window_reset() {
        let mut c = cursor(&[1, 2, 3, 4, 5], LoopPolicy::Looping(3));
        let mut values = vec![];
        let mut resets = 0;
        for _ in 0..7 {
            values.push(c.current_value().clone());
            if c.advance() == Advance::WindowReset {
                resets += 1;
                assert_eq!(c.index(), 0);
                assert_eq!(c.steps_in_window(), 0);
            }
        }
        assert_eq!(resets, 2);
        assert_eq!(values, [1, 2, 3, 1, 2, 3, 1].map(BigInt::from));
    }

    #[test]
    fn test_looping_window_longer_than_sequence() {
        let mut c = cursor(&[1, 2], LoopPolicy::Looping(3));
        let values: Vec<BigInt> = (0..6)
            .map(|_| {
                let v = c.current_value().clone();
                c.advance();
                v
            })
            .collect();
        assert_eq!(values, [1, 2, 1, 1, 2, 1].map(BigInt::from));
    }

    #[test]
    fn test_policy_defaults() {
        assert_eq!(LoopPolicy::for_sequence(false, None, 7), LoopPolicy::OneShot(7));
        assert_eq!(LoopPolicy::for_sequence(true, Some(0), 7), LoopPolicy::Looping(7));
        assert_eq!(LoopPolicy::for_sequence(true, Some(4), 7), LoopPolicy::Looping(4));
        assert_eq!(LoopPolicy::for_sequence(false, Some(4), 7), LoopPolicy::OneShot(4));
    }

    #[test]
    fn test_one_shot_capped_at_length() {
        assert_eq!(LoopPolicy::for_sequence(false, Some(100), 10), LoopPolicy::OneShot(10));
        // Looping periods may outrun the sequence.
        assert_eq!(LoopPolicy::for_sequence(true, Some(100), 10), LoopPolicy::Looping(100));
    }

    #[test]
    fn test_zero_period_rejected() {
        let seq = SequenceSource::new([1]).unwrap();
        assert_eq!(
            SequenceCursor::new(seq, LoopPolicy::Looping(0)).err(),
            Some(ConfigError::ZeroStepCount)
        );
    }
}
