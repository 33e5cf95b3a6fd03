//! Terminal progress bars for the generators.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg:>16} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// A bar counting up to `total`, drawn on stderr.
///
/// Hidden when `visible` is false or stderr is not a terminal, so logs piped
/// to a file stay clean.
#[must_use]
pub fn bar(total: usize, message: &'static str, visible: bool) -> ProgressBar {
    if !visible || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(TEMPLATE)
        .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("#>-"));
    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX)).with_style(style);
    bar.set_message(message);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invisible_bar_is_hidden() {
        let bar = bar(10, "users", false);
        assert!(bar.is_hidden());
        bar.inc(3);
        assert_eq!(bar.position(), 3);
    }
}
