//! Progress bar display for release downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-count progress display for one asset download.
///
/// Purely cosmetic: suppressing it never changes fetch semantics.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress display for `asset`; `total_bytes` of zero means the
    /// server sent no content length and a spinner is shown instead.
    pub fn new(asset: &str, total_bytes: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = if total_bytes > 0 {
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                .unwrap()
                .progress_chars("#>-");
            let bar = ProgressBar::new(total_bytes);
            bar.set_style(style);
            bar
        } else {
            let style = ProgressStyle::default_spinner()
                .template("{spinner} {msg} {bytes}")
                .unwrap();
            let bar = ProgressBar::new_spinner();
            bar.set_style(style);
            bar
        };
        bar.set_message(asset.to_string());
        Self { bar }
    }

    /// Record another chunk of downloaded bytes
    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    /// Finish and leave the completed bar on screen
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
