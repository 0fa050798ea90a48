//! Serde adapters for [`SnowflakeId`](crate::SnowflakeId).
//!
//! `SnowflakeId` itself serializes as its native integer. Use
//! [`as_string`] with `#[serde(with = "...")]` when the consumer cannot hold a
//! 64-bit integer exactly, such as JavaScript numbers.

pub mod as_string {
    use core::fmt;

    use serde::{Deserializer, Serializer, de};

    use crate::SnowflakeId;

    /// Serialize an ID as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize an ID from a decimal string, or from a plain integer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a decimal `u64`
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal snowflake ID string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(|e| E::custom(format_args!("invalid ID {v:?}: {e}")))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SnowflakeId::from_raw(v))
            }
        }

        d.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnowflakeId;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "as_string")]
        id: SnowflakeId,
        native: SnowflakeId,
    }

    #[test]
    fn string_and_native_forms() {
        let row = Row {
            id: SnowflakeId::from_raw(u64::MAX),
            native: SnowflakeId::from_raw(42),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({ "id": "18446744073709551615", "native": 42 }));

        let back: Row = serde_json::from_value(value).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn string_form_accepts_integers() {
        let row: Row = serde_json::from_value(json!({ "id": 7, "native": 8 })).unwrap();
        assert_eq!(row.id.to_raw(), 7);
    }

    #[test]
    fn string_form_rejects_garbage() {
        let err = serde_json::from_value::<Row>(json!({ "id": "12ab", "native": 1 })).unwrap_err();
        assert!(err.to_string().contains("invalid ID"));
    }
}
