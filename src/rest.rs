use std::fmt::{self, Display};
use std::str::FromStr;

use num::{BigInt, Signed, Zero};

use crate::error::ConfigError;

/// Which sign classes of sequence terms play as rests instead of notes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RestPolicy {
    negative: bool,
    zero: bool,
    positive: bool,
}

impl RestPolicy {
    pub const NONE: RestPolicy = RestPolicy::new(false, false, false);

    pub const fn new(negative: bool, zero: bool, positive: bool) -> Self {
        RestPolicy {
            negative,
            zero,
            positive,
        }
    }

    pub fn nonpositive() -> Self {
        Self::new(true, true, false)
    }

    pub fn nonnegative() -> Self {
        Self::new(false, true, true)
    }

    pub fn is_rest(&self, value: &BigInt) -> bool {
        (self.negative && value.is_negative())
            || (self.zero && value.is_zero())
            || (self.positive && value.is_positive())
    }
}

impl FromStr for RestPolicy {
    type Err = ConfigError;

    /// Any mix of `n`, `z` and `p`, e.g. `"nz"` rests on every nonpositive term.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut policy = RestPolicy::NONE;
        for c in s.chars() {
            match c.to_ascii_lowercase() {
                'n' => policy.negative = true,
                'z' => policy.zero = true,
                'p' => policy.positive = true,
                _ => return Err(ConfigError::InvalidRestPolicy(c)),
            }
        }
        Ok(policy)
    }
}

impl Display for RestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (set, c) in [(self.negative, 'n'), (self.zero, 'z'), (self.positive, 'p')] {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_classes() {
        let values = [-3, 0, 4].map(BigInt::from);
        for (policy, expected) in [
            ("", [false, false, false]),
            ("n", [true, false, false]),
            ("z", [false, true, false]),
            ("p", [false, false, true]),
            ("nz", [true, true, false]),
            ("zp", [false, true, true]),
            ("np", [true, false, true]),
            ("pzn", [true, true, true]),
        ] {
            let policy: RestPolicy = policy.parse().unwrap();
            for (value, rest) in values.iter().zip(expected) {
                assert_eq!(policy.is_rest(value), rest, "{policy} on {value}");
            }
        }
    }

    #[test]
    fn test_zero_policy() {
        let zero: RestPolicy = "z".parse().unwrap();
        assert!(zero.is_rest(&BigInt::from(0)));
        assert!(!zero.is_rest(&BigInt::from(5)));
    }

    #[test]
    fn test_named_policies() {
        assert_eq!("nz".parse::<RestPolicy>().unwrap(), RestPolicy::nonpositive());
        assert_eq!("ZP".parse::<RestPolicy>().unwrap(), RestPolicy::nonnegative());
        assert_eq!("".parse::<RestPolicy>().unwrap(), RestPolicy::NONE);
        assert_eq!(RestPolicy::nonpositive().to_string(), "nz");
    }

    #[test]
    fn test_bad_policy() {
        assert_eq!(
            "nx".parse::<RestPolicy>(),
            Err(ConfigError::InvalidRestPolicy('x'))
        );
    }
}
