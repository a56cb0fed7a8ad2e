use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Largest dice count whose range (10^n) fits in a `u128`.
pub const MAX_DICE: u32 = 38;

/// Dice count used when neither count parameter is supplied.
pub const DEFAULT_NUM_DICE: u32 = 2;

/// Precinct count used when neither count parameter is supplied.
pub const DEFAULT_NUM_PRECINCTS: u128 = 13;

/// Untrusted request parameters, exactly as they arrived.
///
/// Field names follow the query string of the public form (`numdice`,
/// `numprec`, `csv`); the camelCase spellings are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(default, alias = "numDice")]
    pub numdice: Option<String>,
    #[serde(default, alias = "numPrecincts")]
    pub numprec: Option<String>,
    #[serde(default, alias = "pasteMode")]
    pub csv: Option<String>,
}

impl RawInput {
    pub fn new(numdice: Option<&str>, numprec: Option<&str>, csv: Option<&str>) -> Self {
        Self {
            numdice: numdice.map(str::to_owned),
            numprec: numprec.map(str::to_owned),
            csv: csv.map(str::to_owned),
        }
    }
}

/// Output variant requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteMode {
    /// Human readable "Roll ..., pick precinct ..." lines.
    #[default]
    Off,
    /// Terse lines meant to be pasted into a text-formatted spreadsheet column.
    On,
}

impl PasteMode {
    pub fn is_on(self) -> bool {
        matches!(self, PasteMode::On)
    }
}

/// Validated dice and precinct counts.
///
/// A precinct count too large for `u128` is held as `u128::MAX`; it exceeds
/// every supported range either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationInput {
    pub num_dice: u32,
    pub num_precincts: u128,
}

impl CalculationInput {
    pub fn new(num_dice: u32, num_precincts: u128) -> Self {
        Self { num_dice, num_precincts }
    }
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_DICE, DEFAULT_NUM_PRECINCTS)
    }
}

/// A request that passed field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub input: CalculationInput,
    pub paste_mode: PasteMode,
}

/// Contiguous run of roll outcomes assigned to one precinct. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bin {
    /// 1-based precinct number.
    pub precinct: u128,
    pub low: u128,
    pub high: u128,
}

impl Bin {
    pub fn width(&self) -> u128 {
        self.high - self.low + 1
    }
}

/// Trailing outcomes that map to no precinct. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RerollRange {
    pub low: u128,
    pub high: u128,
}

impl RerollRange {
    pub fn width(&self) -> u128 {
        self.high - self.low + 1
    }
}

/// Outcome of binning `10^num_dice` roll values over `num_precincts` precincts.
///
/// Only the scalar figures are stored; bins are derived on demand through
/// [`CalculationResult::bins`], so a result for millions of precincts stays
/// small until a caller collects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalculationResult {
    num_dice: u32,
    num_precincts: u128,
    range: u128,
    interval: u128,
    modulus: u128,
}

impl CalculationResult {
    /// Callers go through `BinCalculator`, which guarantees `interval >= 1`.
    pub(crate) fn new(input: CalculationInput, range: u128, interval: u128, modulus: u128) -> Self {
        Self {
            num_dice: input.num_dice,
            num_precincts: input.num_precincts,
            range,
            interval,
            modulus,
        }
    }

    pub fn num_dice(&self) -> u32 {
        self.num_dice
    }

    pub fn num_precincts(&self) -> u128 {
        self.num_precincts
    }

    /// Number of distinct outcomes the dice can produce.
    pub fn range(&self) -> u128 {
        self.range
    }

    /// Width shared by every bin.
    pub fn interval(&self) -> u128 {
        self.interval
    }

    /// Number of outcomes left over that require a reroll.
    pub fn modulus(&self) -> u128 {
        self.modulus
    }

    /// Outcomes covered by bins, i.e. `num_precincts * interval`.
    pub fn covered(&self) -> u128 {
        self.range - self.modulus
    }

    /// Share of rolls that land in the reroll range, in percent.
    pub fn reroll_percent(&self) -> f64 {
        (self.modulus as f64 * 100.0) / self.range as f64
    }

    pub fn bins(&self) -> Bins {
        Bins { interval: self.interval, next: 0, end: self.num_precincts }
    }

    /// Bin for a 1-based precinct number.
    pub fn bin(&self, precinct: u128) -> Option<Bin> {
        (1..=self.num_precincts)
            .contains(&precinct)
            .then(|| make_bin(self.interval, precinct - 1))
    }

    pub fn reroll_range(&self) -> Option<RerollRange> {
        (self.modulus != 0)
            .then(|| RerollRange { low: self.range - self.modulus, high: self.range - 1 })
    }

    /// Precinct selected by a roll, or `None` when the roll must be repeated
    /// (or lies outside the range altogether).
    pub fn precinct_for_roll(&self, roll: u128) -> Option<u128> {
        (roll < self.covered()).then(|| roll / self.interval + 1)
    }
}

fn make_bin(interval: u128, index: u128) -> Bin {
    let low = index * interval;
    Bin { precinct: index + 1, low, high: low + interval - 1 }
}

/// Iterator over the bins of a [`CalculationResult`], in precinct order.
#[derive(Debug, Clone)]
pub struct Bins {
    interval: u128,
    next: u128,
    end: u128,
}

impl Iterator for Bins {
    type Item = Bin;

    fn next(&mut self) -> Option<Bin> {
        if self.next >= self.end {
            return None;
        }
        let bin = make_bin(self.interval, self.next);
        self.next += 1;
        Some(bin)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Bin> {
        let skip = u128::try_from(n).unwrap_or(u128::MAX);
        self.next = self.next.saturating_add(skip).min(self.end);
        self.next()
    }
}

impl DoubleEndedIterator for Bins {
    fn next_back(&mut self) -> Option<Bin> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(make_bin(self.interval, self.end))
    }
}

impl ExactSizeIterator for Bins {}

impl FusedIterator for Bins {}
