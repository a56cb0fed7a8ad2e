//! Structural checks on raw request parameters.
//!
//! Count fields must be ASCII digit strings with a value above zero. The
//! paste flag is stricter in shape but looser in value: exactly "0" or "1".
//!
//! A well-formed count is never rejected for its size alone. Precinct counts
//! past `u128::MAX` saturate and fail the range check later; dice counts past
//! [`MAX_DICE`] get their own error.

use crate::error::{BinError, ErrorSet};
use crate::types::{
    CalculationInput, DEFAULT_NUM_DICE, DEFAULT_NUM_PRECINCTS, MAX_DICE, PasteMode, RawInput,
    ValidatedRequest,
};

/// A request that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequest {
    pub errors: ErrorSet,
    /// The counts, when both of them were valid. Lets the caller still run
    /// the range check for a request whose only problem is the paste flag.
    pub counts: Option<CalculationInput>,
}

/// Parses a strictly positive base-10 integer made only of ASCII digits.
///
/// Leading zeros are accepted ("007" is 7). Values that overflow `u128`
/// saturate to `u128::MAX`.
pub fn parse_positive(value: &str) -> Option<u128> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if value.bytes().all(|b| b == b'0') {
        return None;
    }
    // Only overflow can fail once the digits are checked.
    Some(value.parse::<u128>().unwrap_or(u128::MAX))
}

pub fn parse_num_dice(value: Option<&str>) -> Result<u32, BinError> {
    let count = value.and_then(parse_positive).ok_or(BinError::InvalidDiceCount)?;
    u32::try_from(count)
        .ok()
        .filter(|n| *n <= MAX_DICE)
        .ok_or(BinError::TooManyDice)
}

pub fn parse_num_precincts(value: Option<&str>) -> Result<u128, BinError> {
    value.and_then(parse_positive).ok_or(BinError::InvalidPrecinctCount)
}

pub fn parse_paste_flag(value: Option<&str>) -> Result<PasteMode, BinError> {
    match value {
        None | Some("0") => Ok(PasteMode::Off),
        Some("1") => Ok(PasteMode::On),
        Some(_) => Err(BinError::InvalidPasteFlag),
    }
}

/// Validates every field and reports all failures together.
///
/// When both count parameters are absent the defaults (2 dice, 13 precincts)
/// are used; a single missing count is an error for that field.
pub fn validate(raw: &RawInput) -> Result<ValidatedRequest, InvalidRequest> {
    let counts = if raw.numdice.is_none() && raw.numprec.is_none() {
        (Ok(DEFAULT_NUM_DICE), Ok(DEFAULT_NUM_PRECINCTS))
    } else {
        (parse_num_dice(raw.numdice.as_deref()), parse_num_precincts(raw.numprec.as_deref()))
    };
    let paste_mode = parse_paste_flag(raw.csv.as_deref());

    match (counts, paste_mode) {
        ((Ok(num_dice), Ok(num_precincts)), Ok(paste_mode)) => Ok(ValidatedRequest {
            input: CalculationInput::new(num_dice, num_precincts),
            paste_mode,
        }),
        ((dice, precincts), paste_mode) => {
            let mut errors = ErrorSet::new();
            let counts = match (dice, precincts) {
                (Ok(num_dice), Ok(num_precincts)) => {
                    Some(CalculationInput::new(num_dice, num_precincts))
                }
                (dice, precincts) => {
                    errors.extend(dice.err());
                    errors.extend(precincts.err());
                    None
                }
            };
            errors.extend(paste_mode.err());
            Err(InvalidRequest { errors, counts })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_integers_only() {
        assert_eq!(parse_positive("13"), Some(13));
        assert_eq!(parse_positive("007"), Some(7));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("000"), None);
        assert_eq!(parse_positive(""), None);
        assert_eq!(parse_positive(" 5"), None);
        assert_eq!(parse_positive("5 "), None);
        assert_eq!(parse_positive("+5"), None);
        assert_eq!(parse_positive("-5"), None);
        assert_eq!(parse_positive("2.0"), None);
        assert_eq!(parse_positive("1e3"), None);
        assert_eq!(parse_positive("abc"), None);
        assert_eq!(parse_positive("٣"), None);
    }

    #[test]
    fn oversized_counts_saturate() {
        assert_eq!(parse_positive("99999999999999999999"), Some(99_999_999_999_999_999_999));
        assert_eq!(parse_positive("9".repeat(60).as_str()), Some(u128::MAX));
        assert_eq!(parse_num_precincts(Some("9".repeat(60).as_str())), Ok(u128::MAX));
    }

    #[test]
    fn dice_count_is_capped() {
        assert_eq!(parse_num_dice(Some("38")), Ok(38));
        assert_eq!(parse_num_dice(Some("39")), Err(BinError::TooManyDice));
        assert_eq!(parse_num_dice(Some("99999999999999999999999")), Err(BinError::TooManyDice));
        assert_eq!(parse_num_dice(Some("0")), Err(BinError::InvalidDiceCount));
        assert_eq!(parse_num_dice(None), Err(BinError::InvalidDiceCount));
    }

    #[test]
    fn paste_flag_accepts_zero_but_counts_do_not() {
        assert_eq!(parse_paste_flag(Some("0")), Ok(PasteMode::Off));
        assert_eq!(parse_paste_flag(Some("1")), Ok(PasteMode::On));
        assert_eq!(parse_paste_flag(None), Ok(PasteMode::Off));
        assert_eq!(parse_paste_flag(Some("00")), Err(BinError::InvalidPasteFlag));
        assert_eq!(parse_paste_flag(Some("2")), Err(BinError::InvalidPasteFlag));
        assert_eq!(parse_paste_flag(Some("")), Err(BinError::InvalidPasteFlag));
        assert_eq!(parse_paste_flag(Some("yes")), Err(BinError::InvalidPasteFlag));
        assert_eq!(parse_num_precincts(Some("0")), Err(BinError::InvalidPrecinctCount));
    }

    #[test]
    fn missing_counts_fall_back_to_defaults() {
        let request = validate(&RawInput::default()).unwrap();
        assert_eq!(request.input, CalculationInput::new(2, 13));
        assert_eq!(request.paste_mode, PasteMode::Off);

        let request = validate(&RawInput::new(None, None, Some("1"))).unwrap();
        assert_eq!(request.paste_mode, PasteMode::On);
    }

    #[test]
    fn one_missing_count_is_an_error() {
        let rejected = validate(&RawInput::new(Some("2"), None, None)).unwrap_err();
        assert_eq!(rejected.errors.detected(), &[BinError::InvalidPrecinctCount]);
        assert_eq!(rejected.counts, None);
    }

    #[test]
    fn all_field_errors_are_collected() {
        let rejected = validate(&RawInput::new(Some("abc"), Some("-1"), Some("x"))).unwrap_err();
        assert_eq!(
            rejected.errors.detected(),
            &[BinError::InvalidDiceCount, BinError::InvalidPrecinctCount, BinError::InvalidPasteFlag]
        );
    }

    #[test]
    fn valid_counts_survive_a_bad_paste_flag() {
        let rejected = validate(&RawInput::new(Some("1"), Some("11"), Some("7"))).unwrap_err();
        assert_eq!(rejected.errors.detected(), &[BinError::InvalidPasteFlag]);
        assert_eq!(rejected.counts, Some(CalculationInput::new(1, 11)));
    }
}
