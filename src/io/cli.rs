//! Command-line interface for the coordinate hash quality analyzer

use crate::analysis::collisions::{
    AvalancheReport, CollisionReport, avalanche, random_pairs, sequential_pairs,
};
use crate::io::configuration::{
    DEFAULT_AVALANCHE_SAMPLES, DEFAULT_COORDINATE_SPAN, DEFAULT_RANDOM_SAMPLES, DEFAULT_SEED,
    DEFAULT_SEQUENTIAL_SIDE, IDEAL_AVALANCHE_BITS, RANDOM_COLLISION_BUDGET,
    SEQUENTIAL_COLLISION_BUDGET,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "hashgrid")]
#[command(
    author,
    version,
    about = "Measure collision and avalanche quality of the grid coordinate hash"
)]
/// Command-line arguments for the hash quality analyzer
pub struct Cli {
    /// Random coordinate pairs to hash
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANDOM_SAMPLES)]
    pub samples: usize,

    /// Side of the sequential integer domain [0, side)²
    #[arg(long, default_value_t = DEFAULT_SEQUENTIAL_SIDE)]
    pub side: usize,

    /// Random coordinates are drawn from [-span, span)
    #[arg(long, default_value_t = DEFAULT_COORDINATE_SPAN)]
    pub span: f64,

    /// Random seed for reproducible sampling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Random pairs used to measure avalanche
    #[arg(short, long, default_value_t = DEFAULT_AVALANCHE_SAMPLES)]
    pub avalanche: usize,

    /// Write a plain-text report to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Fail when a collision ratio exceeds its budget
    #[arg(long)]
    pub strict: bool,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is unset
    pub const fn default_log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Reject parameter combinations the analyzer cannot sample
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` for a non-positive or non-finite
    /// span, or a sequential domain whose size overflows
    pub fn validate(&self) -> Result<()> {
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(invalid_parameter(
                "span",
                &self.span,
                &"must be finite and positive",
            ));
        }
        if self.side.checked_mul(self.side).is_none() {
            return Err(invalid_parameter(
                "side",
                &self.side,
                &"sequential domain size overflows",
            ));
        }
        Ok(())
    }
}

/// Results of one analyzer run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashQualityReport {
    /// Collisions over uniformly random pairs
    pub random: CollisionReport,
    /// Collisions over the sequential integer domain
    pub sequential: CollisionReport,
    /// Mean output bits flipped per input bit flip
    pub avalanche: AvalancheReport,
}

impl HashQualityReport {
    /// Plain-text rendering, one workload per line
    pub fn render(&self) -> String {
        let mut text = String::new();
        for (report, budget) in [
            (self.random, RANDOM_COLLISION_BUDGET),
            (self.sequential, SEQUENTIAL_COLLISION_BUDGET),
        ] {
            let _ = writeln!(
                text,
                "{}: {} samples, {} collisions ({:.4}%, budget {:.4}%)",
                report.workload,
                report.samples,
                report.collisions(),
                report.ratio() * 100.0,
                budget * 100.0
            );
        }
        let _ = writeln!(
            text,
            "avalanche: {} flips, {:.2} bits per flip (ideal {IDEAL_AVALANCHE_BITS})",
            self.avalanche.flips, self.avalanche.mean_flipped_bits
        );
        text
    }

    /// Check both collision ratios against their budgets
    ///
    /// # Errors
    ///
    /// Returns `GridError::CollisionBudgetExceeded` for the first workload
    /// over budget
    pub fn check_budgets(&self) -> Result<()> {
        self.random.check(RANDOM_COLLISION_BUDGET)?;
        self.sequential.check(SEQUENTIAL_COLLISION_BUDGET)
    }
}

/// Runs every sampling workload and reports the results
pub struct Analyzer {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl Analyzer {
    /// Create an analyzer for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = ProgressManager::new(cli.should_show_progress());

        Self {
            cli,
            progress_manager,
        }
    }

    /// Sample all workloads, log and optionally write the report
    ///
    /// # Errors
    ///
    /// Returns an error if parameters are invalid, the report cannot be
    /// written, or `--strict` is set and a budget is exceeded
    pub fn run(&self) -> Result<HashQualityReport> {
        self.cli.validate()?;
        let start_time = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.cli.seed);

        let random_progress = self
            .progress_manager
            .workload("random pairs", self.cli.samples);
        let random = random_pairs(&mut rng, self.cli.samples, self.cli.span, &random_progress)?;
        random_progress.complete();

        let sequential_progress = self
            .progress_manager
            .workload("sequential pairs", self.cli.side * self.cli.side);
        let sequential = sequential_pairs(self.cli.side, &sequential_progress);
        sequential_progress.complete();

        let avalanche = avalanche(&mut rng, self.cli.avalanche, self.cli.span)?;
        self.progress_manager.finish();

        let report = HashQualityReport {
            random,
            sequential,
            avalanche,
        };

        for line in report.render().lines() {
            info!("{line}");
        }
        info!(
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "analysis complete"
        );

        if let Some(path) = &self.cli.output {
            std::fs::write(path, report.render())
                .map_err(|source| file_system_error(path, "write report", source))?;
            info!(path = %path.display(), "report written");
        }

        match report.check_budgets() {
            Err(error) if self.cli.strict => return Err(error),
            Err(error) => warn!(%error, "hash quality below budget"),
            Ok(()) => {}
        }

        Ok(report)
    }
}
