pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod run;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Spinner for a long-running step, hidden in quiet mode.
pub(crate) fn spinner(message: &str, quiet: bool) -> ProgressBar {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Build the tokio runtime the async commands run on.
pub(crate) fn runtime() -> Result<Runtime, CliError> {
    Runtime::new().map_err(|e| CliError::runtime(e.to_string()))
}
