//! Reader and validator for Harp device metadata (`device.yml`) and port pin
//! metadata (`ios.yml`) files.

pub mod metadata;
pub mod reader;

pub use metadata::{DeviceInfo, PortPinInfo};
pub use reader::{MetadataDeserializer, MetadataError};
