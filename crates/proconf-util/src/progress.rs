//! Status lines on stderr.
//!
//! Reports go to stdout so they can be piped or redirected; everything the
//! operations say about their progress goes here instead.

use std::io::Write;

use console::Style;

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.apply_to(label),
    );
}

/// A finished step, bold green: `    Resolved 9 units from Units.toml`,
/// `       Wrote build/units.txt`, `     Checked 9 units in 4 groups`.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Nothing needed doing, bold cyan: `       Fresh build/units.txt`.
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Something looks off but the run continues, bold yellow.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}
