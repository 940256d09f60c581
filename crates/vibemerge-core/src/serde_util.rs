//! Serde helpers shared by the inbound decoders

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key and an explicit `null`
/// decode the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        count: i64,
    }

    #[test]
    fn test_null_is_default() {
        let sample: Sample = serde_json::from_str(r#"{"name": null, "count": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_missing_is_default() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_values_pass_through() {
        let sample: Sample = serde_json::from_str(r#"{"name": "x", "count": 3}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Sample>(r#"{"count": "three"}"#).is_err());
    }
}
