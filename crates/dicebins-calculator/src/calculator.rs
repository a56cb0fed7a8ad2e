use crate::error::{BinError, ErrorSet};
use crate::types::{CalculationInput, CalculationResult, MAX_DICE, PasteMode, RawInput};
use crate::validation;

/// A successful run of the full request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculation {
    pub result: CalculationResult,
    pub paste_mode: PasteMode,
}

/// Splits the outcomes of `n` ten-sided dice into equal bins, one per precinct.
///
/// Stateless; a single instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinCalculator;

impl BinCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Runs `validate -> compute` over untrusted request parameters.
    ///
    /// Validation failures skip the arithmetic, except that the range check
    /// still runs when both counts are valid so that `InsufficientRange` is
    /// present in [`ErrorSet::detected`]. [`ErrorSet::reported`] applies the
    /// precedence rule.
    pub fn evaluate(&self, raw: &RawInput) -> Result<Calculation, ErrorSet> {
        match validation::validate(raw) {
            Ok(request) => self
                .calculate(&request.input)
                .map(|result| Calculation { result, paste_mode: request.paste_mode })
                .map_err(ErrorSet::from),
            Err(mut rejected) => {
                if let Some(Err(error)) = rejected.counts.map(|input| self.calculate(&input)) {
                    rejected.errors.push(error);
                }
                Err(rejected.errors)
            }
        }
    }

    /// Computes range, interval and modulus for already-parsed counts.
    ///
    /// Counts outside the accepted domain (zero, or more than [`MAX_DICE`]
    /// dice) are rejected with the matching validation error.
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, BinError> {
        if input.num_dice == 0 {
            return Err(BinError::InvalidDiceCount);
        }
        if input.num_dice > MAX_DICE {
            return Err(BinError::TooManyDice);
        }
        if input.num_precincts == 0 {
            return Err(BinError::InvalidPrecinctCount);
        }

        let range = 10u128.pow(input.num_dice);
        let interval = range / input.num_precincts;
        let modulus = range % input.num_precincts;

        if interval < 1 {
            return Err(BinError::InsufficientRange);
        }

        Ok(CalculationResult::new(*input, range, interval, modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_bins_two_dice_over_thirteen_precincts() {
        let calculation = BinCalculator::new().evaluate(&RawInput::default()).unwrap();
        assert_eq!(calculation.result.range(), 100);
        assert_eq!(calculation.result.interval(), 7);
        assert_eq!(calculation.result.modulus(), 9);
        assert_eq!(calculation.paste_mode, PasteMode::Off);
    }

    #[test]
    fn too_few_dice_is_rejected() {
        let err = BinCalculator::new().calculate(&CalculationInput::new(1, 11)).unwrap_err();
        assert_eq!(err, BinError::InsufficientRange);
    }

    #[test]
    fn range_equal_to_precincts_is_accepted() {
        let result = BinCalculator::new().calculate(&CalculationInput::new(1, 10)).unwrap();
        assert_eq!(result.interval(), 1);
        assert_eq!(result.modulus(), 0);
        assert_eq!(result.reroll_range(), None);
    }

    #[test]
    fn largest_dice_count_does_not_overflow() {
        let result = BinCalculator::new().calculate(&CalculationInput::new(38, 3)).unwrap();
        assert_eq!(result.range(), 10u128.pow(38));
        assert_eq!(result.modulus(), 1);
    }

    #[test]
    fn precincts_beyond_u64_still_bin_with_enough_dice() {
        let precincts = 10u128.pow(20);
        let result = BinCalculator::new().calculate(&CalculationInput::new(38, precincts)).unwrap();
        assert_eq!(result.interval(), 10u128.pow(18));
        assert_eq!(result.modulus(), 0);
        assert_eq!(result.bins().next_back().map(|bin| bin.precinct), Some(precincts));
    }

    #[test]
    fn saturated_precinct_count_is_insufficient_range() {
        let err = BinCalculator::new()
            .calculate(&CalculationInput::new(MAX_DICE, u128::MAX))
            .unwrap_err();
        assert_eq!(err, BinError::InsufficientRange);
    }

    #[test]
    fn out_of_domain_counts_are_rejected() {
        let calculator = BinCalculator::new();
        assert_eq!(
            calculator.calculate(&CalculationInput::new(0, 5)),
            Err(BinError::InvalidDiceCount)
        );
        assert_eq!(
            calculator.calculate(&CalculationInput::new(39, 5)),
            Err(BinError::TooManyDice)
        );
        assert_eq!(
            calculator.calculate(&CalculationInput::new(2, 0)),
            Err(BinError::InvalidPrecinctCount)
        );
    }

    #[test]
    fn insufficient_range_is_detected_but_not_reported_beside_a_bad_flag() {
        let raw = RawInput::new(Some("1"), Some("11"), Some("2"));
        let errors = BinCalculator::new().evaluate(&raw).unwrap_err();
        assert!(errors.contains(BinError::InsufficientRange));
        assert_eq!(errors.reported(), vec![BinError::InvalidPasteFlag]);
    }

    #[test]
    fn invalid_dice_skips_the_range_check() {
        let raw = RawInput::new(Some("abc"), Some("11"), None);
        let errors = BinCalculator::new().evaluate(&raw).unwrap_err();
        assert_eq!(errors.detected(), &[BinError::InvalidDiceCount]);
    }
}
