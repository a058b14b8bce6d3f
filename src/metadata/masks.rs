use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
    ser::SerializeMap,
};

use super::scalar::ScalarText;

/// A mask where each entry names a single bit or bit field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitMaskInfo {
    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    pub bits: IndexMap<String, MaskValue>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_type: Option<String>,
}

/// A mask where each entry names one of a set of mutually exclusive values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMaskInfo {
    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    pub values: IndexMap<String, MaskValue>,

    #[serde(
        default,
        deserialize_with = "crate::metadata::scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_type: Option<String>,
}

/// Value of a bit mask or group mask entry.
///
/// Written either as a bare integer (`DI0: 0x1`) or as a mapping with a
/// `value` and an optional `description`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskValue {
    pub value: u64,
    pub description: Option<String>,
}

impl MaskValue {
    pub fn new(value: u64) -> MaskValue {
        Self {
            value,
            description: None,
        }
    }
}

impl From<u64> for MaskValue {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for MaskValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MaskValueVisitor;

        impl<'de> Visitor<'de> for MaskValueVisitor {
            type Value = MaskValue;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("mask value integer or mapping with a 'value' key")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MaskValue::new(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(MaskValue::new)
                    .map_err(|_| E::custom(format!("mask value {v} is negative")))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut value = None;
                let mut description = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "value" => {
                            if value.is_some() {
                                return Err(de::Error::duplicate_field("value"));
                            }
                            value = Some(map.next_value::<u64>()?);
                        }
                        "description" => {
                            if description.is_some() {
                                return Err(de::Error::duplicate_field("description"));
                            }
                            description =
                                Some(map.next_value::<ScalarText>()?.into_string());
                        }
                        other => {
                            return Err(de::Error::unknown_field(other, &["value", "description"]));
                        }
                    }
                }

                Ok(MaskValue {
                    value: value.ok_or_else(|| <A::Error as de::Error>::missing_field("value"))?,
                    description,
                })
            }
        }

        deserializer.deserialize_any(MaskValueVisitor)
    }
}

impl Serialize for MaskValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.description.as_ref() {
            None => serializer.serialize_u64(self.value),
            Some(description) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", &self.value)?;
                map.serialize_entry("description", description)?;
                map.end()
            }
        }
    }
}
