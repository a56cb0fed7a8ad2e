//! Plain-text rendering shared by the text endpoint and the command line.

use dicebins_calculator::{BinFormatter, Calculation, OutputStyle};

/// Verbose output leads with the range summary; paste output is bins only,
/// ready to drop into a text-formatted spreadsheet column.
pub fn render_text(calculation: &Calculation) -> String {
    let formatter = BinFormatter::new(&calculation.result);
    let style = OutputStyle::from(calculation.paste_mode);

    let mut out = String::new();
    if style == OutputStyle::Verbose {
        for line in formatter.summary() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&formatter.render(style));
    out
}
