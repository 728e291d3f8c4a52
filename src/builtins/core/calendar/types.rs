//! Calendar field types.

use core::str::FromStr;

use tinystr::TinyAsciiStr;

use crate::{error::ErrorMessage, TemporalError, TemporalResult};

/// A calendar field name, used when reconciling field sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Year,
    Month,
    MonthCode,
    Day,
}

/// A calendar month code such as `M01`, or `M05L` for a leap month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCode(pub(crate) TinyAsciiStr<4>);

impl MonthCode {
    /// Creates a `MonthCode` from a UTF-8 encoded slice, validating its shape.
    pub fn try_from_utf8(src: &[u8]) -> TemporalResult<Self> {
        let invalid = || TemporalError::range().with_enum(ErrorMessage::MonthCodeInvalid);
        let code = TinyAsciiStr::<4>::try_from_utf8(src).map_err(|_| invalid())?;
        let bytes = code.as_str().as_bytes();
        let well_formed = match bytes {
            [b'M', tens, ones] | [b'M', tens, ones, b'L'] => {
                tens.is_ascii_digit() && ones.is_ascii_digit() && (*tens, *ones) != (b'0', b'0')
            }
            _ => false,
        };
        if !well_formed {
            return Err(invalid());
        }
        Ok(Self(code))
    }

    /// Returns the string representation of this `MonthCode`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this `MonthCode` names a leap month.
    #[inline]
    #[must_use]
    pub fn is_leap_month(&self) -> bool {
        self.0.len() == 4
    }

    /// Returns the month number encoded in this `MonthCode`.
    #[must_use]
    pub fn to_month_integer(&self) -> u8 {
        let bytes = self.0.as_str().as_bytes();
        (bytes[1] - b'0') * 10 + (bytes[2] - b'0')
    }
}

impl FromStr for MonthCode {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_utf8(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::MonthCode;
    use core::str::FromStr;

    #[test]
    fn month_code_shapes() {
        let code = MonthCode::from_str("M05").unwrap();
        assert_eq!(code.to_month_integer(), 5);
        assert!(!code.is_leap_month());

        let leap = MonthCode::from_str("M05L").unwrap();
        assert_eq!(leap.to_month_integer(), 5);
        assert!(leap.is_leap_month());

        for invalid in ["", "M", "M1", "M00", "m01", "M01X", "M123", "MA1"] {
            assert!(MonthCode::from_str(invalid).is_err(), "{invalid}");
        }
    }
}
