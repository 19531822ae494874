//! Runs the five sections of the tour in order.

use crate::demo::{creation, math, perf, reshape, rule, storage, RULE_WIDTH};
use crate::{ExplorerConfig, ExplorerError};
use std::io::Write;
use std::path::PathBuf;

const TITLE: &str = "NDARRAY DATA EXPLORER";
const SUBTITLE: &str = "A tour of n-dimensional arrays in Rust";
const COMPLETED: &str = "ALL SECTIONS COMPLETED SUCCESSFULLY!";

const NEXT_STEPS: [&str; 3] = [
    "Read each section in src/demo/ next to its output above",
    "Load the saved files with numpy.load or numpy.loadtxt",
    "Rerun with --seed to reproduce the random arrays",
];

fn centered<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    writeln!(out, "{:^width$}", text, width = RULE_WIDTH)
}

/// Prints every section to `out` and returns the paths of the files written.
///
/// The sections pass their sample arrays along: the 3x3 matrix from the
/// creation section feeds the arithmetic section, and the 3x4 reshape is what
/// gets saved and loaded.
pub fn run<W: Write>(
    config: &ExplorerConfig,
    out: &mut W,
) -> Result<Vec<PathBuf>, ExplorerError> {
    config.validate()?;
    log::debug!("running explorer with {:?}", config);
    let mut rng = config.rng();

    writeln!(out)?;
    rule(out)?;
    centered(out, TITLE)?;
    centered(out, SUBTITLE)?;
    rule(out)?;

    let (matrix, _random) = creation::array_creation(out, &mut rng)?;
    let _data = math::mathematical_operations(out, &matrix, &mut rng)?;
    let reshaped = reshape::reshaping_broadcasting(out)?;
    let report = storage::save_load(out, &reshaped, config)?;
    perf::performance_comparison(out, config.perf_size)?;

    writeln!(out)?;
    rule(out)?;
    centered(out, COMPLETED)?;
    rule(out)?;
    writeln!(out, "\nFiles created:")?;
    for path in &report.files {
        writeln!(out, "  - {}", path.display())?;
    }
    writeln!(out, "\nNext steps:")?;
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }
    rule(out)?;
    writeln!(out)?;
    out.flush()?;

    Ok(report.files)
}
