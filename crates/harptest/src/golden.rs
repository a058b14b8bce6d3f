//! Comparison of generated output against reference ("golden") files.

use std::path::{Path, PathBuf};

use log::debug;

use crate::paths::EXPECTED_OUTPUT_DIR;

#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("could not read reference output {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error(
        "The generated output has diverged from the reference: {output_file_name} (first difference on line {line})"
    )]
    Mismatch { output_file_name: String, line: usize },
}

/// A directory of reference output files.
///
/// Output without a reference file is not checked, so new cases can be
/// added before their reference output exists.
#[derive(Debug, Clone)]
pub struct GoldenFiles {
    root: PathBuf,
}

impl Default for GoldenFiles {
    fn default() -> Self {
        Self::new(EXPECTED_OUTPUT_DIR)
    }
}

impl GoldenFiles {
    pub fn new(root: impl Into<PathBuf>) -> GoldenFiles {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the reference file for `output_file_name`.
    pub fn expected_path(&self, output_file_name: &str) -> PathBuf {
        self.root.join(output_file_name)
    }

    /// Compares `actual` with the reference file for `output_file_name`.
    pub fn check(&self, actual: &str, output_file_name: &str) -> Result<(), GoldenError> {
        let path = self.expected_path(output_file_name);
        if !path.is_file() {
            debug!("no reference output at {}, skipping", path.display());
            return Ok(());
        }

        let expected = std::fs::read_to_string(&path).map_err(|error| GoldenError::Io {
            path: path.clone(),
            error,
        })?;

        if actual == expected {
            Ok(())
        } else {
            Err(GoldenError::Mismatch {
                output_file_name: output_file_name.to_string(),
                line: first_difference(actual, &expected),
            })
        }
    }

    /// Fails the current test if `actual` differs from the reference file
    /// for `output_file_name`.
    #[track_caller]
    pub fn assert_output(&self, actual: &str, output_file_name: &str) {
        if let Err(e) = self.check(actual, output_file_name) {
            panic!("{e}");
        }
    }
}

/// Fails the current test if `actual` differs from
/// `ExpectedOutput/<output_file_name>`. Missing reference files are skipped.
#[track_caller]
pub fn assert_expected_output(actual: &str, output_file_name: &str) {
    GoldenFiles::default().assert_output(actual, output_file_name);
}

/// 1-based line number of the first line that differs between two texts.
fn first_difference(actual: &str, expected: &str) -> usize {
    let mut actual_lines = actual.split('\n');
    let mut expected_lines = expected.split('\n');
    let mut line = 1;

    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (Some(a), Some(e)) if a == e => line += 1,
            _ => return line,
        }
    }
}
