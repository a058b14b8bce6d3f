use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod masks;
mod pins;
mod registers;
mod scalar;
pub mod validate;

pub use masks::{BitMaskInfo, GroupMaskInfo, MaskValue};
pub use pins::{
    InitialState, InputPinInfo, InputPinMode, InterruptPriority, OutputPinInfo, OutputPinMode,
    PortPinInfo, TriggerMode,
};
pub use registers::{
    MemberConverter, PayloadMemberInfo, PayloadType, RegisterAccess, RegisterInfo, Visibility,
};

/// Top level contents of a device metadata file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(deserialize_with = "scalar::text")]
    pub device: String,

    #[serde(rename = "whoAmI")]
    pub who_am_i: u16,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub firmware_version: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hardware_targets: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub architecture: Option<String>,

    #[serde(default)]
    pub registers: IndexMap<String, RegisterInfo>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bit_masks: IndexMap<String, BitMaskInfo>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub group_masks: IndexMap<String, GroupMaskInfo>,
}

impl DeviceInfo {
    /// Unique device name in the form `<device>_<whoAmI>`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.device, self.who_am_i)
    }

    /// Returns `true` if `name` is a declared bit mask or group mask.
    pub fn has_mask(&self, name: &str) -> bool {
        self.bit_masks.contains_key(name) || self.group_masks.contains_key(name)
    }

    /// Looks up a register by its address.
    pub fn register_at(&self, address: u8) -> Option<(&str, &RegisterInfo)> {
        self.registers
            .iter()
            .find(|(_, register)| register.address == address)
            .map(|(name, register)| (name.as_str(), register))
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceInfo, PayloadType, RegisterAccess};

    const DEVICE_YAML: &str = r#"
device: Behavior
whoAmI: 1216
firmwareVersion: "2.2"
hardwareTargets: "2.0"
registers:
  DigitalInputState:
    address: 32
    type: U8
    access: Event
    maskType: DigitalInputs
  OutputSet:
    address: 34
    type: U16
    access: [Write, Event]
bitMasks:
  DigitalInputs:
    bits:
      DI0: 0x1
"#;

    #[test]
    fn device_deserialize() {
        let device: DeviceInfo = serde_yml::from_str(DEVICE_YAML).unwrap();
        assert_eq!(device.device, "Behavior");
        assert_eq!(device.who_am_i, 1216);
        assert_eq!(device.firmware_version.as_deref(), Some("2.2"));
        assert_eq!(device.hardware_targets.as_deref(), Some("2.0"));
        assert!(device.architecture.is_none());
        assert!(device.group_masks.is_empty());

        let names = device.registers.keys().collect::<Vec<_>>();
        assert_eq!(names, ["DigitalInputState", "OutputSet"]);

        let output_set = &device.registers["OutputSet"];
        assert_eq!(output_set.payload_type, PayloadType::U16);
        assert_eq!(output_set.access, RegisterAccess::WRITE | RegisterAccess::EVENT);
    }

    #[test]
    fn device_name() {
        let device: DeviceInfo = serde_yml::from_str(DEVICE_YAML).unwrap();
        assert_eq!(device.name(), "Behavior_1216");
    }

    #[test]
    fn device_mask_lookup() {
        let device: DeviceInfo = serde_yml::from_str(DEVICE_YAML).unwrap();
        assert!(device.has_mask("DigitalInputs"));
        assert!(!device.has_mask("DigitalOutputs"));
    }

    #[test]
    fn device_register_lookup() {
        let device: DeviceInfo = serde_yml::from_str(DEVICE_YAML).unwrap();
        assert_eq!(device.register_at(34).map(|(name, _)| name), Some("OutputSet"));
        assert!(device.register_at(33).is_none());
    }

    #[test]
    fn device_missing_required_field() {
        assert!(serde_yml::from_str::<DeviceInfo>("device: Behavior\n").is_err());
    }
}
