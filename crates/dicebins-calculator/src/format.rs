//! Text rendering of bins.
//!
//! Die rolls are read digit by digit, so a roll of 0 then 7 is "07". Every
//! boundary is therefore printed zero-padded to the number of dice.

use crate::types::{Bin, CalculationResult, PasteMode, RerollRange};

/// Steps for pasting paste-mode output into a spreadsheet column.
pub const PASTE_INSTRUCTIONS: &[&str] = &[
    "Open the spreadsheet.",
    "Click on the column header for the column to the right of where you want the new column.",
    "Select \"Insert\" -> \"Columns\" to insert a new column.",
    "With the new column selected, choose \"Format\" -> \"Cells...\", pick \"Text\" in the number tab and click \"OK\". Some spreadsheet programs read values like \"07-13\" as dates otherwise.",
    "Select and copy all of the bins.",
    "Click on the first cell of the new column and paste.",
];

pub const NO_REROLLS: &str = "No rerolls needed";

/// Left-pads `value` with zeros to exactly `width` digits.
pub fn pad(value: u128, width: u32) -> String {
    format!("{value:0width$}", width = width as usize)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// "Roll 07-13, pick precinct 2"
    #[default]
    Verbose,
    /// "07-13"
    Paste,
}

impl From<PasteMode> for OutputStyle {
    fn from(mode: PasteMode) -> Self {
        match mode {
            PasteMode::Off => OutputStyle::Verbose,
            PasteMode::On => OutputStyle::Paste,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BinFormatter<'a> {
    result: &'a CalculationResult,
}

impl<'a> BinFormatter<'a> {
    pub fn new(result: &'a CalculationResult) -> Self {
        Self { result }
    }

    fn pad(&self, value: u128) -> String {
        pad(value, self.result.num_dice())
    }

    /// "07-13", or just "07" when every bin holds a single outcome.
    pub fn bin_label(&self, bin: &Bin) -> String {
        if self.result.interval() == 1 {
            self.pad(bin.low)
        } else {
            format!("{}-{}", self.pad(bin.low), self.pad(bin.high))
        }
    }

    pub fn reroll_label(&self, reroll: &RerollRange) -> String {
        format!("{}-{}", self.pad(reroll.low), self.pad(reroll.high))
    }

    pub fn bin_line(&self, bin: &Bin, style: OutputStyle) -> String {
        match style {
            OutputStyle::Verbose => {
                format!("Roll {}, pick precinct {}", self.bin_label(bin), bin.precinct)
            }
            OutputStyle::Paste => self.bin_label(bin),
        }
    }

    /// Closing line: the reroll range, or a note that none is needed.
    pub fn reroll_line(&self, style: OutputStyle) -> String {
        match (self.result.reroll_range(), style) {
            (Some(reroll), OutputStyle::Verbose) => {
                format!("Roll {}, reroll dice", self.reroll_label(&reroll))
            }
            (Some(reroll), OutputStyle::Paste) => format!("{} -> reroll", self.reroll_label(&reroll)),
            (None, _) => NO_REROLLS.to_string(),
        }
    }

    /// One line per bin followed by the reroll line.
    pub fn lines(&self, style: OutputStyle) -> impl Iterator<Item = String> + 'a {
        let formatter = *self;
        self.result
            .bins()
            .map(move |bin| formatter.bin_line(&bin, style))
            .chain(std::iter::once_with(move || formatter.reroll_line(style)))
    }

    pub fn render(&self, style: OutputStyle) -> String {
        let mut out = String::new();
        for line in self.lines(style) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Range, interval and modulus figures shown above verbose output.
    pub fn summary(&self) -> Vec<String> {
        let result = self.result;
        let dice_word = if result.num_dice() == 1 { "die" } else { "dice" };
        vec![
            format!(
                "Range is {}. (This is the quantity of random numbers {} {} can produce.)",
                result.range(),
                result.num_dice(),
                dice_word
            ),
            format!(
                "Rounded interval is {}. (This is the number of random numbers per bin.)",
                result.interval()
            ),
            format!(
                "Interval modulus is {} ({}% of rolls). (This is the number of random numbers that will require a re-roll.)",
                result.modulus(),
                format_percent(result.reroll_percent())
            ),
        ]
    }
}

/// Up to four decimals, trailing zeros dropped: 9.0 -> "9", 0.5 -> "0.5".
pub fn format_percent(percent: f64) -> String {
    let fixed = format!("{percent:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
