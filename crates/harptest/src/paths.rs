use std::path::{Path, PathBuf};

/// Directory holding the metadata files read by the tests.
pub const METADATA_DIR: &str = "Metadata";

/// Directory holding the reference files for generated output.
pub const EXPECTED_OUTPUT_DIR: &str = "ExpectedOutput";

/// Path of the metadata file `file_name`.
pub fn metadata_path(file_name: impl AsRef<Path>) -> PathBuf {
    Path::new(METADATA_DIR).join(file_name)
}

/// Path of the reference output file `file_name`.
pub fn expected_output_path(file_name: impl AsRef<Path>) -> PathBuf {
    Path::new(EXPECTED_OUTPUT_DIR).join(file_name)
}
