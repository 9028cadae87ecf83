use num::{BigInt, Integer, ToPrimitive};

use crate::error::ConfigError;

pub const PITCH_RANGE: i64 = 128;

/// Reduces a term modulo `modulus`, shifts it by `offset`, then folds the
/// result into the MIDI pitch range. Both reductions are floor modulo, so
/// negative terms and offsets land in range too.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PitchTransform {
    modulus: BigInt,
    offset: i64,
}

impl PitchTransform {
    pub fn new(modulus: i64, offset: i64) -> Result<Self, ConfigError> {
        if modulus <= 0 {
            return Err(ConfigError::NonPositiveModulus(modulus));
        }
        Ok(PitchTransform {
            modulus: BigInt::from(modulus),
            offset,
        })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn map_pitch(&self, value: &BigInt) -> u8 {
        // 0 <= reduced < modulus <= i64::MAX, so the conversion cannot fail.
        let reduced = value.mod_floor(&self.modulus).to_i64().unwrap_or_default();
        let raw = reduced as i128 + self.offset as i128;
        raw.mod_floor(&(PITCH_RANGE as i128)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: i64, modulus: i64, offset: i64) -> u8 {
        PitchTransform::new(modulus, offset)
            .unwrap()
            .map_pitch(&BigInt::from(value))
    }

    #[test]
    fn test_plain_offset() {
        assert_eq!(map(2, 88, 24), 26);
        assert_eq!(map(5, 88, 24), 29);
        assert_eq!(map(90, 88, 0), 2);
    }

    #[test]
    fn test_negative_values_use_floor_modulo() {
        assert_eq!(map(-1, 88, 24), 87 + 24);
        assert_eq!(map(-88, 88, 0), 0);
        assert_eq!(map(-1, 12, -1), 10);
        assert_eq!(map(0, 12, -1), 127);
    }

    #[test]
    fn test_wraps_into_pitch_range() {
        assert_eq!(map(100, 200, 100), 72);
        assert_eq!(map(i64::MAX, i64::MAX, i64::MAX), (i64::MAX % 128) as u8);
    }

    #[test]
    fn test_always_in_range() {
        for modulus in [1, 2, 7, 12, 88, 128, 1000, i64::MAX] {
            for offset in [i64::MIN, -500, -1, 0, 1, 24, 127, 500, i64::MAX] {
                for value in [i64::MIN, -1000, -129, -1, 0, 1, 127, 128, 999, i64::MAX] {
                    assert!(map(value, modulus, offset) <= 127);
                }
            }
        }
    }

    #[test]
    fn test_huge_term() {
        let t = PitchTransform::new(88, 0).unwrap();
        let big: BigInt = "1000000000000000000000000000001".parse().unwrap();
        assert_eq!(t.map_pitch(&big), (&big % 88u32).to_u8().unwrap());
    }

    #[test]
    fn test_rejects_non_positive_modulus() {
        assert_eq!(
            PitchTransform::new(0, 24),
            Err(ConfigError::NonPositiveModulus(0))
        );
        assert!(PitchTransform::new(-5, 0).is_err());
    }
}
