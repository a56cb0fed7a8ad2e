//! Error kinds reported by the bin calculator.
//!
//! Errors are plain data: validation collects every failing field into an
//! [`ErrorSet`] instead of stopping at the first one, and the set decides
//! which of its members are shown to the caller.

use crate::types::MAX_DICE;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinError {
    #[error("The number of dice you provided is invalid. It must be a positive integer.")]
    InvalidDiceCount,

    /// A well-formed dice count beyond what `u128` arithmetic can bin.
    #[error("This calculator supports at most {max} dice; use fewer dice.", max = MAX_DICE)]
    TooManyDice,

    #[error("The number of precincts you provided is invalid. It must be a positive integer.")]
    InvalidPrecinctCount,

    #[error("The value for the pasteable flag (\"csv\") you've provided is invalid. It must be a 1 or 0.")]
    InvalidPasteFlag,

    #[error("You need to increase the number of dice. The range must be greater than the number of precincts.")]
    InsufficientRange,
}

impl BinError {
    /// Stable identifier used in API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            BinError::InvalidDiceCount => "InvalidDiceCount",
            BinError::TooManyDice => "TooManyDice",
            BinError::InvalidPrecinctCount => "InvalidPrecinctCount",
            BinError::InvalidPasteFlag => "InvalidPasteFlag",
            BinError::InsufficientRange => "InsufficientRange",
        }
    }

    /// Request parameter the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BinError::InvalidDiceCount | BinError::TooManyDice => Some("numdice"),
            BinError::InvalidPrecinctCount => Some("numprec"),
            BinError::InvalidPasteFlag => Some("csv"),
            BinError::InsufficientRange => None,
        }
    }

    /// True for structural problems with a request field.
    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }
}

/// Every error detected for one request, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    detected: Vec<BinError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error; duplicates are ignored.
    pub fn push(&mut self, error: BinError) {
        if !self.detected.contains(&error) {
            self.detected.push(error);
        }
    }

    pub fn contains(&self, error: BinError) -> bool {
        self.detected.contains(&error)
    }

    /// Everything detected, including errors suppressed from the report.
    pub fn detected(&self) -> &[BinError] {
        &self.detected
    }

    /// Errors to surface to the caller. Field validation errors take
    /// precedence: when any exist, `InsufficientRange` is left out.
    pub fn reported(&self) -> Vec<BinError> {
        let has_validation = self.detected.iter().any(BinError::is_validation);
        self.detected
            .iter()
            .copied()
            .filter(|e| !has_validation || e.is_validation())
            .collect()
    }

    pub fn has_validation_errors(&self) -> bool {
        self.detected.iter().any(BinError::is_validation)
    }
}

impl From<BinError> for ErrorSet {
    fn from(error: BinError) -> Self {
        Self { detected: vec![error] }
    }
}

impl Extend<BinError> for ErrorSet {
    fn extend<T: IntoIterator<Item = BinError>>(&mut self, iter: T) {
        for error in iter {
            self.push(error);
        }
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.reported().iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for ErrorSet {}
