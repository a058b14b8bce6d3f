use std::path::Path;

use harpmeta::{DeviceInfo, MetadataDeserializer, MetadataError, PortPinInfo};
use indexmap::IndexMap;

/// Reads the device metadata file at `path`. Merge keys are expanded.
pub fn read_device_metadata(
    deserializer: &MetadataDeserializer,
    path: impl AsRef<Path>,
) -> Result<DeviceInfo, MetadataError> {
    deserializer.read_device(path)
}

/// Reads the port pin mapping file at `path`, keyed by pin name. Merge keys
/// are not expanded.
pub fn read_port_pin_metadata(
    deserializer: &MetadataDeserializer,
    path: impl AsRef<Path>,
) -> Result<IndexMap<String, PortPinInfo>, MetadataError> {
    deserializer.read_port_pins(path)
}
