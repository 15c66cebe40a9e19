//! Terminal progress bar for region retrieval.

use embassy_checker::{RegionEventsListener, RegionRetrieved, RetrievingStarted};
use indicatif::{ProgressBar, ProgressStyle};

/// Shows one bar step per embassy region.
pub struct ProgressListener {
    bar: ProgressBar,
}

impl ProgressListener {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// A listener that draws nothing, for `--quiet`.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl RegionEventsListener for ProgressListener {
    fn on_retrieving_started(&self, event: &RetrievingStarted) {
        self.bar.set_length(event.total as u64);
        self.bar.set_position(0);
    }

    fn on_region_retrieved(&self, event: &RegionRetrieved) {
        if !event.retrieved {
            self.bar
                .println(format!("   ⚠️  Could not retrieve {}", event.region));
        }
        self.bar.set_message(event.region.clone());
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_follows_events() {
        let listener = ProgressListener::hidden();
        listener.on_retrieving_started(&RetrievingStarted { total: 3 });
        assert_eq!(listener.bar.length(), Some(3));

        listener.on_region_retrieved(&RegionRetrieved {
            region: "Alpha".to_string(),
            index: 0,
            retrieved: true,
        });
        listener.on_region_retrieved(&RegionRetrieved {
            region: "Gone".to_string(),
            index: 1,
            retrieved: false,
        });
        assert_eq!(listener.bar.position(), 2);
    }
}
