use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;

use crate::metadata::{DeviceInfo, PortPinInfo, validate::ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("could not open {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yml::Error),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

/// Shared deserialization settings for metadata files.
///
/// The settings are fixed once the value is built so a single instance can
/// be shared by reference across readers and threads.
#[derive(Debug, Default, Clone)]
pub struct MetadataDeserializer {
    validate_references: bool,
}

impl MetadataDeserializer {
    pub fn new() -> MetadataDeserializer {
        Default::default()
    }

    /// Check mask references and register addresses after reading device
    /// metadata.
    pub fn validate_references(mut self, validate: bool) -> MetadataDeserializer {
        self.validate_references = validate;
        self
    }

    /// Deserializes a YAML document after expanding `<<` merge keys.
    pub fn deserialize_merged<T, R>(&self, reader: R) -> Result<T, serde_yml::Error>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut document: serde_yml::Value = serde_yml::from_reader(reader)?;
        document.apply_merge()?;
        T::deserialize(document)
    }

    /// Deserializes a YAML document as written. Aliases are resolved but
    /// merge keys are left in place.
    pub fn deserialize<T, R>(&self, reader: R) -> Result<T, serde_yml::Error>
    where
        T: DeserializeOwned,
        R: Read,
    {
        serde_yml::from_reader(reader)
    }

    /// Reads a device metadata file.
    pub fn read_device(&self, path: impl AsRef<Path>) -> Result<DeviceInfo, MetadataError> {
        let path = path.as_ref();
        debug!("reading device metadata from {}", path.display());

        let device: DeviceInfo = self.deserialize_merged(open_metadata(path)?)?;
        if self.validate_references {
            device.validate()?;
        }

        Ok(device)
    }

    /// Reads a port pin mapping file.
    ///
    /// Unlike [`MetadataDeserializer::read_device`], merge keys in pin
    /// mappings are not expanded.
    pub fn read_port_pins(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<IndexMap<String, PortPinInfo>, MetadataError> {
        let path = path.as_ref();
        debug!("reading port pin metadata from {}", path.display());

        Ok(self.deserialize(open_metadata(path)?)?)
    }
}

fn open_metadata(path: &Path) -> Result<BufReader<File>, MetadataError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|error| MetadataError::Io {
            path: path.to_path_buf(),
            error,
        })
}
