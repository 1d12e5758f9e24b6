//! Progress display for hash sampling workloads

use crate::analysis::collisions::SampleObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SAMPLE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>18}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{human_pos}}/{{human_len}} ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per sampled workload
///
/// When hidden, every bar is created detached from the terminal so callers
/// can report progress unconditionally.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    visible: bool,
}

impl ProgressManager {
    /// Create a progress manager, drawing to the terminal only if `visible`
    pub fn new(visible: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            visible,
        }
    }

    /// Add a bar for a workload of `total` samples
    pub fn workload(&self, name: &str, total: usize) -> SampleProgress {
        let bar = if self.visible {
            let bar = self.multi_progress.add(ProgressBar::new(total as u64));
            bar.set_style(SAMPLE_STYLE.clone());
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_prefix(name.to_string());

        SampleProgress { bar }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}

/// Progress bar for one sampled workload
pub struct SampleProgress {
    bar: ProgressBar,
}

impl SampleProgress {
    /// Samples reported so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Mark the workload as complete
    pub fn complete(&self) {
        self.bar.finish();
    }
}

impl SampleObserver for SampleProgress {
    fn advance(&self, samples: usize) {
        self.bar.inc(samples as u64);
    }
}
