//! Multi-target progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Shows one placement bar per target for small batches and adds a single
/// batch bar once the target count grows past the individual bar limit.
/// Only the most recent targets keep a visible bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    target_bars: Vec<ProgressBar>,
    /// (`name`, `placed`, `planned`) per started target
    target_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PLACEMENT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Targets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            target_bars: Vec::new(),
            target_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on target count
    pub fn initialize(&mut self, target_count: usize) {
        if target_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(target_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..target_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PLACEMENT_STYLE.clone());
            self.target_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure a progress bar for a new target
    pub fn start_target(&mut self, index: usize, path: &Path, planned: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.target_states.len() {
            self.target_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.target_states.get_mut(index) {
            *state = (display_name, 0, planned);
        }
        self.update_bars();
    }

    /// Report the number of tiles placed so far
    pub fn update_placements(&mut self, index: usize, placed: usize) {
        if let Some(state) = self.target_states.get_mut(index) {
            state.1 = placed;
        }
        self.update_bars();
    }

    /// Mark a target as completed and update batch progress
    pub fn complete_target(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.target_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All targets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the last N started targets on the available bars
    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .target_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, placed, planned)) in visible.iter().copied().enumerate() {
            if let Some(bar) = self.target_bars.get(bar_idx) {
                bar.set_length(*planned as u64);
                bar.set_position(*placed as u64);
                let width = planned.to_string().len();
                bar.set_message(format!("{placed:>width$}/{planned}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.target_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
