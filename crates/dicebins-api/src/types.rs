//! JSON payloads served by the API.

use chrono::{DateTime, Utc};
use dicebins_calculator::{BinFormatter, Calculation, OutputStyle};
use serde::{Deserialize, Serialize};

/// One precinct bin with its display label ("07-13", or "7" for one-wide bins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinView {
    pub precinct: u128,
    pub low: u128,
    pub high: u128,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerollView {
    pub low: u128,
    pub high: u128,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinsResponse {
    pub num_dice: u32,
    pub num_precincts: u128,
    pub paste_mode: bool,
    pub range: u128,
    pub interval: u128,
    pub modulus: u128,
    pub reroll_percent: f64,
    /// Range, interval and modulus notes shown above the bins.
    pub summary: Vec<String>,
    pub bins: Vec<BinView>,
    pub reroll: Option<RerollView>,
    /// The bins rendered in the requested style, closing with the reroll line.
    pub lines: Vec<String>,
}

impl From<&Calculation> for BinsResponse {
    fn from(calculation: &Calculation) -> Self {
        let result = &calculation.result;
        let formatter = BinFormatter::new(result);
        let style = OutputStyle::from(calculation.paste_mode);

        Self {
            num_dice: result.num_dice(),
            num_precincts: result.num_precincts(),
            paste_mode: calculation.paste_mode.is_on(),
            range: result.range(),
            interval: result.interval(),
            modulus: result.modulus(),
            reroll_percent: result.reroll_percent(),
            summary: formatter.summary(),
            bins: result
                .bins()
                .map(|bin| BinView {
                    precinct: bin.precinct,
                    low: bin.low,
                    high: bin.high,
                    label: formatter.bin_label(&bin),
                })
                .collect(),
            reroll: result.reroll_range().map(|reroll| RerollView {
                low: reroll.low,
                high: reroll.high,
                label: formatter.reroll_label(&reroll),
            }),
            lines: formatter.lines(style).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}
