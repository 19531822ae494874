use crate::ExplorerError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Number of elements used by the performance comparison unless configured
/// otherwise.
pub const DEFAULT_PERF_SIZE: usize = 1_000_000;

/// Settings shared by all explorer sections.
///
/// The defaults reproduce a plain run: files go to the current directory,
/// random arrays are seeded from the OS, and the `.npz` archive is stored
/// uncompressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Directory receiving the `.npy`, `.npz` and text files.
    pub output_dir: PathBuf,
    /// Number of elements in the performance comparison.
    pub perf_size: usize,
    /// Seed for the random arrays; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Write the `.npz` archive with deflate compression.
    pub compress: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            output_dir: PathBuf::from("."),
            perf_size: DEFAULT_PERF_SIZE,
            seed: None,
            compress: false,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ExplorerError> {
        if self.perf_size == 0 {
            return Err(ExplorerError::Config(
                "performance comparison size must be positive".to_owned(),
            ));
        }
        if self.compress && !cfg!(feature = "compressed_npz") {
            return Err(ExplorerError::Config(
                "compression requires the `compressed_npz` feature".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the generator for the random sample arrays.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Returns the location of `file_name` inside the output directory.
    pub fn output_path<P: AsRef<Path>>(&self, file_name: P) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
