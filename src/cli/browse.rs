use std::io::IsTerminal;
use std::path::Path;

use crate::browser::ExpenseBrowser;
use crate::categorizer::RuleSet;
use crate::error::{Result, TrackerError};
use crate::tui::run_view;

/// Interactive table. Without a terminal, a file argument falls back to the
/// plain `list` output.
pub fn run(file: Option<&str>, rules: RuleSet) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        return match file {
            Some(f) => super::list::run(f, None, false, &rules),
            None => Err(TrackerError::NotATerminal),
        };
    }

    let mut browser = ExpenseBrowser::new(rules);
    if let Some(f) = file {
        browser.load_file(Path::new(f));
    }
    run_view(&mut browser)
}
