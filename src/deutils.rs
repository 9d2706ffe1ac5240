// src/deutils.rs
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::convert::TryInto;

// LMS and wttr.in both quote numbers whenever they feel like it.

pub fn deserialize_numeric_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let v = Value::deserialize(deserializer)?;
    let n: i64 = v
        .as_i64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| D::Error::custom("non-integer"))?;
    n.try_into().map_err(|_| D::Error::custom("overflow"))
}

/// Number, numeric string or null. Anything else reads as zero.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(v
        .as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0))
}

/// String or number into an optional string, empty and null become None
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    let s = match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return Ok(None),
    };
    let s = s.trim().to_string();
    Ok((!s.is_empty()).then_some(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_lenient_f64")]
        time: f64,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        coverid: Option<String>,
        #[serde(default, deserialize_with = "deserialize_numeric_u16")]
        code: u16,
    }

    #[test]
    fn test_lenient_fields() {
        let p: Probe = serde_json::from_str(r#"{"time":"12.5","coverid":-160,"code":"296"}"#).unwrap();
        assert_eq!(p.time, 12.5);
        assert_eq!(p.coverid.as_deref(), Some("-160"));
        assert_eq!(p.code, 296);

        let p: Probe = serde_json::from_str(r#"{"time":null,"coverid":""}"#).unwrap();
        assert_eq!(p.time, 0.0);
        assert_eq!(p.coverid, None);
        assert_eq!(p.code, 0);

        assert!(serde_json::from_str::<Probe>(r#"{"code":"-1"}"#).is_err());
    }
}
