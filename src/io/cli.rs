//! Command-line interface for composing mosaics of one or many targets

use crate::algorithm::compositor::{Compositor, MosaicConfig};
use crate::io::configuration::{
    DEFAULT_COVERAGE, DEFAULT_LIBRARY_DIR, DEFAULT_SEED, DEFAULT_THRESHOLD, PALETTE_SWATCH_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_canvas, is_generated_output, load_target, output_path, palette_path};
use crate::io::library::{collect_image_files, library_dir, load_library};
use crate::io::palette::render_palette;
use crate::io::progress::ProgressManager;
use crate::math::distance::DistanceMetric;
use crate::spatial::tiles::TileLibrary;
use clap::Parser;
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "tilemosaic")]
#[command(
    author,
    version,
    about = "Reproduce an image as a mosaic of average-color matched tiles"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Target image file, or directory of targets, to reproduce
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Tile edge length in pixels
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_size: u32,

    /// Error threshold that, when exceeded, puts used tiles back in play
    #[arg(short = 'e', long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Percentage of the canvas covered again by off-grid tiles (modulo 100)
    #[arg(short, long, default_value_t = u32::from(DEFAULT_COVERAGE))]
    pub coverage: u32,

    /// Color distance metric used for matching
    #[arg(short, long, value_enum, default_value_t = DistanceMetric::Perceptual)]
    pub metric: DistanceMetric,

    /// Root of the scaled tile library, holding one directory per tile size
    #[arg(short, long, default_value = DEFAULT_LIBRARY_DIR)]
    pub library: PathBuf,

    /// Random seed for reproducible overlay positions
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process targets even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also export a swatch image of the tile library colors
    #[arg(short, long)]
    pub palette: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Overlay coverage reduced to `0..100`
    pub const fn coverage_percent(&self) -> u8 {
        (self.coverage % 100) as u8
    }

    /// Engine configuration described by the arguments
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            tile_size: self.tile_size,
            threshold: self.threshold,
            coverage: self.coverage_percent(),
            metric: self.metric,
            seed: self.seed,
        }
    }

    /// Directory the tiles for this tile size are read from
    pub fn tile_dir(&self) -> PathBuf {
        library_dir(&self.library, self.tile_size)
    }
}

/// Orchestrates batch composition of target images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process targets, logging any failure in readable form
    ///
    /// # Errors
    ///
    /// Returns the error that stopped processing, after logging it
    pub fn run(&mut self) -> Result<()> {
        self.process().inspect_err(|e| error!("{e}"))
    }

    /// Process targets according to CLI arguments
    ///
    /// The tile library is loaded once and shared by every target; each
    /// target gets a fresh pool.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration or target is invalid
    /// - The tile library cannot be loaded
    /// - A target cannot be composed or exported
    pub fn process(&mut self) -> Result<()> {
        self.cli.mosaic_config().validate()?;
        let targets = self.collect_targets()?;

        if targets.is_empty() {
            return Ok(());
        }

        let library = load_library(&self.cli.tile_dir(), self.cli.tile_size)?;
        if library.is_empty() {
            warn!(dir = %self.cli.tile_dir().display(), "Tile library is empty");
        }

        let palette = if self.cli.palette {
            render_palette(&library, PALETTE_SWATCH_SIZE)
        } else {
            None
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(targets.len());
        }

        for (index, target) in targets.iter().enumerate() {
            self.process_target(&library, palette.as_ref(), target, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_targets(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if ImageFormat::from_path(target).is_err() {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"not a recognized image format",
                ));
            }
            Ok(if self.should_process(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            Ok(collect_image_files(target)?
                .into_iter()
                .filter(|path| !is_generated_output(path) && self.should_process(path))
                .collect())
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process(&self, target: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output = output_path(target);
        if output.exists() {
            info!(path = %target.display(), "Skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_target(
        &mut self,
        library: &TileLibrary,
        palette: Option<&RgbImage>,
        target: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let image = load_target(target)?;
        let mut compositor = Compositor::new(library, self.cli.mosaic_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            let planned = compositor.planned_placements(image.width(), image.height());
            pm.start_target(index, target, planned);
        }

        let mut progress = self.progress_manager.as_mut();
        let mosaic = compositor.compose_with_progress(&image, |placed| {
            if let Some(pm) = progress.as_deref_mut() {
                pm.update_placements(index, placed);
            }
        })?;

        let output = output_path(target);
        export_canvas(&mosaic.canvas, &output)?;
        info!(
            output = %output.display(),
            placements = mosaic.placements.len(),
            replenishments = mosaic.replenishments,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Mosaic written"
        );

        if let Some(palette) = palette {
            export_canvas(palette, &palette_path(target))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_target(index);
        }

        Ok(())
    }
}
