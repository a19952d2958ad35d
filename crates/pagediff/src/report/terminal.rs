use std::io::IsTerminal;

use super::Summary;

fn colorize(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Lines printed after a successful run.
pub fn summary_lines(summary: &Summary, color: bool) -> [String; 2] {
    let percent = format!("{:.3}%", summary.percent);
    // Green only for a pixel-exact match.
    let code = if summary.diff_pixels == 0 { "32" } else { "31" };
    [
        format!("Difference: {}", colorize(&percent, code, color)),
        format!("Saved difference to {}", summary.output.display()),
    ]
}

pub fn print_summary(summary: &Summary) {
    let color = std::io::stdout().is_terminal();
    for line in summary_lines(summary, color) {
        println!("{line}");
    }
}
