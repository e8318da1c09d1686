use std::time::Duration;

use anyhow::{Context, Result};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use super::{Interaction, SpinnerHandle, SpinnerInteraction};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

impl SpinnerInteraction for Interaction {
    fn start_spinner(&self, message: String) -> Result<SpinnerHandle> {
        // Nothing to animate when stderr is redirected
        if !Term::stderr().is_term() {
            return Ok(SpinnerHandle::new(Box::new(|| {})));
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .context("building spinner style")?,
        );
        progress_bar.set_message(message);
        progress_bar.enable_steady_tick(TICK_INTERVAL);

        Ok(SpinnerHandle::new(Box::new(move || {
            progress_bar.finish_and_clear();
        })))
    }
}
