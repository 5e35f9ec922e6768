use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;

/// Observer notified at fixed checkpoints of a run. Implementations must not
/// influence the result of the work they observe.
pub trait Progress {
    fn start(&self, _stage: &str, _total: usize) {}
    fn file_read(&self, _path: &Path) {}
    fn gene_written(&self, _gene: &str) {}
    fn finish(&self) {}
}

pub struct NoProgress;

impl Progress for NoProgress {}

/// Progress bar on stderr; hidden when stderr is not a terminal.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("{prefix:>8} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&self, stage: &str, total: usize) {
        self.bar.reset();
        self.bar.set_length(total as u64);
        self.bar.set_prefix(stage.to_string());
    }

    fn file_read(&self, path: &Path) {
        self.bar.set_message(path.display().to_string());
        self.bar.inc(1);
    }

    fn gene_written(&self, gene: &str) {
        self.bar.set_message(gene.to_string());
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
