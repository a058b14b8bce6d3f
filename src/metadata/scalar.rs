use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};

/// Text field that also accepts plain YAML scalars resolved as numbers or
/// booleans.
///
/// Device metadata is bound from a merged document tree where unquoted
/// scalars such as `2.2` have already been resolved to numbers. Those are
/// turned back into text here. Numbers come back in canonical form, so
/// `2.10` reads as `2.1`.
pub(super) struct ScalarText(String);

impl ScalarText {
    pub(super) fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarTextVisitor;

        impl Visitor<'_> for ScalarTextVisitor {
            type Value = ScalarText;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ScalarText(v))
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_finite() && v.fract() == 0.0 {
                    Ok(ScalarText(format!("{v:.1}")))
                } else {
                    Ok(ScalarText(v.to_string()))
                }
            }
        }

        deserializer.deserialize_any(ScalarTextVisitor)
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    ScalarText::deserialize(deserializer).map(|ScalarText(text)| text)
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ScalarText>::deserialize(deserializer).map(|text| text.map(|ScalarText(text)| text))
}
