//! Dice binning for post-election audits.
//!
//! Ten-sided dice give publicly verifiable random numbers, but mapping a roll
//! of `n` dice straight onto a handful of precincts wastes most rolls. This
//! crate splits the `10^n` possible outcomes into equal-width bins, one per
//! precinct, and leaves the remainder as a reroll range.
//!
//! The pipeline is `validate -> compute -> format`:
//!
//! ```
//! use dicebins_calculator::{BinCalculator, BinFormatter, OutputStyle, RawInput};
//!
//! let raw = RawInput::new(Some("2"), Some("13"), None);
//! let calculation = BinCalculator::new().evaluate(&raw).unwrap();
//! let lines: Vec<String> =
//!     BinFormatter::new(&calculation.result).lines(OutputStyle::Verbose).collect();
//!
//! assert_eq!(lines[1], "Roll 07-13, pick precinct 2");
//! assert_eq!(lines[13], "Roll 91-99, reroll dice");
//! ```

pub mod calculator;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

pub use calculator::{BinCalculator, Calculation};
pub use error::{BinError, ErrorSet};
pub use format::{BinFormatter, OutputStyle, pad};
pub use types::{
    Bin, Bins, CalculationInput, CalculationResult, DEFAULT_NUM_DICE, DEFAULT_NUM_PRECINCTS,
    MAX_DICE, PasteMode, RawInput, RerollRange, ValidatedRequest,
};
pub use validation::{InvalidRequest, validate};
