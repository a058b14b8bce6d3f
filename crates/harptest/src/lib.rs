//! Fixture support for tests of Harp metadata consumers.
//!
//! Tests run from the package root, so the relative `Metadata` and
//! `ExpectedOutput` directories resolve against it.

pub mod golden;
pub mod metadata;
pub mod paths;
pub mod resources;

pub use golden::{GoldenError, GoldenFiles, assert_expected_output};
pub use metadata::{read_device_metadata, read_port_pin_metadata};
pub use paths::{expected_output_path, metadata_path};
pub use resources::ResourceBundle;
