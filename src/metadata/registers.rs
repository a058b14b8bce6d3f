use indexmap::IndexMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
    ser::SerializeSeq,
};

/// A device register declared in the `registers` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInfo {
    pub address: u8,

    #[serde(rename = "type")]
    pub payload_type: PayloadType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    pub access: RegisterAccess,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mask_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_spec: Option<IndexMap<String, PayloadMemberInfo>>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "MemberConverter::is_none")]
    pub converter: MemberConverter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_type: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default, rename = "volatile")]
    pub is_volatile: bool,
}

impl RegisterInfo {
    /// Number of payload elements. Registers without an explicit length hold
    /// a single element.
    #[inline]
    pub fn payload_length(&self) -> u32 {
        self.length.unwrap_or(1)
    }

    /// Total payload size in bytes.
    #[inline]
    pub fn payload_size(&self) -> usize {
        self.payload_type.size() * self.payload_length() as usize
    }
}

/// A named bit field inside a register payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMemberInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mask_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "MemberConverter::is_none")]
    pub converter: MemberConverter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_type: Option<String>,
}

/// Register payload element type with its Harp protocol type code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PayloadType {
    U8 = 0x01,
    S8 = 0x81,
    U16 = 0x02,
    S16 = 0x82,
    U32 = 0x04,
    S32 = 0x84,
    U64 = 0x08,
    S64 = 0x88,
    Float = 0x44,
}

const PAYLOAD_TYPE_SIGNED: u8 = 0x80;
const PAYLOAD_TYPE_FLOAT: u8 = 0x40;
const PAYLOAD_TYPE_SIZE_MASK: u8 = 0x0f;

impl PayloadType {
    const NAMES: [(PayloadType, &'static str); 9] = [
        (PayloadType::U8, "U8"),
        (PayloadType::S8, "S8"),
        (PayloadType::U16, "U16"),
        (PayloadType::S16, "S16"),
        (PayloadType::U32, "U32"),
        (PayloadType::S32, "S32"),
        (PayloadType::U64, "U64"),
        (PayloadType::S64, "S64"),
        (PayloadType::Float, "Float"),
    ];

    /// Size of a single element in bytes.
    #[inline]
    pub fn size(self) -> usize {
        (u8::from(self) & PAYLOAD_TYPE_SIZE_MASK) as usize
    }

    #[inline]
    pub fn is_signed(self) -> bool {
        u8::from(self) & PAYLOAD_TYPE_SIGNED != 0
    }

    #[inline]
    pub fn is_float(self) -> bool {
        u8::from(self) & PAYLOAD_TYPE_FLOAT != 0
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find_map(|(ty, name)| (*ty == self).then_some(*name))
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<PayloadType> {
        Self::NAMES
            .iter()
            .find_map(|(ty, ty_name)| (*ty_name == name).then_some(*ty))
    }
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PayloadType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadTypeVisitor;

        impl Visitor<'_> for PayloadTypeVisitor {
            type Value = PayloadType;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("payload type name or type code")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u8::try_from(v)
                    .ok()
                    .and_then(|code| PayloadType::try_from(code).ok())
                    .ok_or_else(|| E::custom(format!("invalid payload type code {v:#x}")))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid payload type code {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                PayloadType::from_name(v)
                    .ok_or_else(|| E::custom(format!("invalid payload type {v}")))
            }
        }

        deserializer.deserialize_any(PayloadTypeVisitor)
    }
}

impl Serialize for PayloadType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Register access flags.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegisterAccess: u8 {
        const READ = 0x1;
        const WRITE = 0x2;
        const EVENT = 0x4;
    }
}

impl RegisterAccess {
    const NAMES: [(RegisterAccess, &'static str); 3] = [
        (RegisterAccess::READ, "Read"),
        (RegisterAccess::WRITE, "Write"),
        (RegisterAccess::EVENT, "Event"),
    ];

    fn from_access_name<E: de::Error>(name: &str) -> Result<RegisterAccess, E> {
        Self::NAMES
            .iter()
            .find_map(|(flag, flag_name)| (*flag_name == name).then_some(*flag))
            .ok_or_else(|| E::custom(format!("invalid register access value {name}")))
    }
}

impl<'de> Deserialize<'de> for RegisterAccess {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AccessVisitor;

        impl<'de> Visitor<'de> for AccessVisitor {
            type Value = RegisterAccess;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("register access name, list of names or integer")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u8::try_from(v)
                    .ok()
                    .and_then(RegisterAccess::from_bits)
                    .ok_or_else(|| E::custom(format!("invalid register access bits {v:#x}")))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                RegisterAccess::from_access_name(v)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut flags = RegisterAccess::empty();

                while let Some(val) = seq.next_element::<String>()? {
                    flags |= RegisterAccess::from_access_name::<A::Error>(&val)?;
                }

                Ok(flags)
            }
        }

        deserializer.deserialize_any(AccessVisitor)
    }
}

impl Serialize for RegisterAccess {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let flagcount = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .count();

        let mut seq = serializer.serialize_seq(Some(flagcount))?;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                seq.serialize_element(name)?;
            }
        }

        seq.end()
    }
}

/// Conversion applied between the raw register payload and the interface
/// type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberConverter {
    #[default]
    None,
    Payload,
    RawPayload,
}

impl MemberConverter {
    #[inline]
    fn is_none(&self) -> bool {
        *self == MemberConverter::None
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[cfg(test)]
mod tests {
    use super::{MemberConverter, PayloadType, RegisterAccess, RegisterInfo, Visibility};
    use crate::testutils;
    use serde::Deserialize;

    #[test]
    fn payload_type_name_deserialize() {
        testutils::run_deserializer_tests(
            PayloadType::deserialize,
            [
                ("U8", PayloadType::U8),
                ("S16", PayloadType::S16),
                ("U64", PayloadType::U64),
                ("Float", PayloadType::Float),
            ],
        );
    }

    #[test]
    fn payload_type_code_deserialize() {
        testutils::run_deserializer_tests(
            PayloadType::deserialize,
            [
                ("1", PayloadType::U8),
                ("0x81", PayloadType::S8),
                ("0x44", PayloadType::Float),
                ("132", PayloadType::S32),
            ],
        );
    }

    #[test]
    fn payload_type_invalid() {
        testutils::run_rejection_tests(PayloadType::deserialize, ["u8", "Double", "0x03", "256"]);
    }

    #[test]
    fn payload_type_properties() {
        assert_eq!(PayloadType::U8.size(), 1);
        assert_eq!(PayloadType::S16.size(), 2);
        assert_eq!(PayloadType::Float.size(), 4);
        assert_eq!(PayloadType::S64.size(), 8);

        assert!(PayloadType::S32.is_signed());
        assert!(!PayloadType::U32.is_signed());
        assert!(PayloadType::Float.is_float());
        assert!(!PayloadType::U16.is_float());
    }

    #[test]
    fn access_deserialize() {
        testutils::run_deserializer_tests(
            RegisterAccess::deserialize,
            [
                ("Read", RegisterAccess::READ),
                ("[ Write ]", RegisterAccess::WRITE),
                ("[ Write, Event ]", RegisterAccess::WRITE | RegisterAccess::EVENT),
                ("5", RegisterAccess::READ | RegisterAccess::EVENT),
            ],
        );
    }

    #[test]
    fn access_invalid() {
        testutils::run_rejection_tests(
            RegisterAccess::deserialize,
            ["read", "READ", "[ Read, Both ]", "8"],
        );
    }

    #[test]
    fn access_serialize() {
        let serialized = serde_yml::to_string(&(RegisterAccess::READ | RegisterAccess::EVENT)).unwrap();
        let reparsed: RegisterAccess = serde_yml::from_str(&serialized).unwrap();
        assert_eq!(reparsed, RegisterAccess::READ | RegisterAccess::EVENT);
    }

    #[test]
    fn register_defaults() {
        let register: RegisterInfo = serde_yml::from_str(
            r#"
            address: 40
            type: U16
            access: Write
            "#,
        )
        .unwrap();

        assert_eq!(register.address, 40);
        assert_eq!(register.payload_length(), 1);
        assert_eq!(register.payload_size(), 2);
        assert_eq!(register.converter, MemberConverter::None);
        assert_eq!(register.visibility, Visibility::Public);
        assert!(!register.is_volatile);
        assert!(register.payload_spec.is_none());
    }

    #[test]
    fn register_payload_spec() {
        let register: RegisterInfo = serde_yml::from_str(
            r#"
            address: 44
            type: S16
            length: 3
            access: Event
            visibility: private
            volatile: true
            payloadSpec:
              AnalogInput0:
                offset: 0
              Encoder:
                offset: 2
                mask: 0xFF00
                converter: rawPayload
                maxValue: 255
            "#,
        )
        .unwrap();

        assert_eq!(register.payload_size(), 6);
        assert_eq!(register.visibility, Visibility::Private);
        assert!(register.is_volatile);

        let spec = register.payload_spec.unwrap();
        assert_eq!(spec.keys().collect::<Vec<_>>(), ["AnalogInput0", "Encoder"]);
        assert_eq!(spec["Encoder"].mask, Some(0xff00));
        assert_eq!(spec["Encoder"].offset, Some(2));
        assert_eq!(spec["Encoder"].converter, MemberConverter::RawPayload);
        assert_eq!(spec["Encoder"].max_value, Some(255.0));
        assert_eq!(spec["AnalogInput0"].mask, None);
    }
}
