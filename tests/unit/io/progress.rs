//! Tests for placement progress tracking across targets

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tilemosaic::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use tilemosaic::io::progress::ProgressManager;

    // Tests a single target lifecycle
    // Verified by skipping initialization for single targets
    #[test]
    fn test_single_target() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);

        pm.start_target(0, Path::new("moon.jpg"), 20);
        for placed in 1..=20 {
            pm.update_placements(0, placed);
        }
        pm.complete_target(0);
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);

        pm.start_target(1, Path::new("second.png"), 4);
        pm.update_placements(1, 2);
        pm.complete_target(1);
        pm.finish();
    }

    // Tests batch mode with more targets than individual bars
    // Verified by changing batch mode threshold
    #[test]
    fn test_batch_mode() {
        let mut pm = ProgressManager::new();
        let target_count = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        pm.initialize(target_count);

        for i in 0..target_count {
            pm.start_target(i, Path::new(&format!("target{i}.png")), 8);
            pm.update_placements(i, 4);
            pm.complete_target(i);
        }

        pm.finish();
    }

    // Tests updates for unknown targets are ignored
    // Verified by indexing target states directly
    #[test]
    fn test_unknown_target_updates() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);

        pm.update_placements(3, 1);
        pm.complete_target(3);
        pm.finish();
    }
}
