//! 查询字符串辅助反序列化
//!
//! `#[serde(flatten)]` 会把查询参数统一缓冲为字符串，数值和布尔过滤条件
//! 需要手动解析。空字符串视为未提供。

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw<T> {
    Typed(T),
    Text(String),
}

pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw<i64>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Typed(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: '{s}'"))),
    }
}

pub fn optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw<bool>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Typed(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!("invalid boolean: '{s}'"))),
        },
    }
}

/// 区分“字段缺失”和“显式 null”，用于可清空的外键字段
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "optional_i64")]
        course_id: Option<i64>,
        #[serde(default, deserialize_with = "optional_bool")]
        verified: Option<bool>,
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        batch_id: Option<Option<i64>>,
    }

    #[test]
    fn test_filters_from_strings() {
        let f: Filters = serde_json::from_str(r#"{"course_id":"7","verified":"true"}"#).unwrap();
        assert_eq!(f.course_id, Some(7));
        assert_eq!(f.verified, Some(true));

        let f: Filters = serde_json::from_str(r#"{"course_id":"","verified":""}"#).unwrap();
        assert_eq!(f.course_id, None);
        assert_eq!(f.verified, None);

        assert!(serde_json::from_str::<Filters>(r#"{"course_id":"abc"}"#).is_err());
    }

    #[test]
    fn test_deserialize_some_distinguishes_null() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.batch_id, None);
        let p: Patch = serde_json::from_str(r#"{"batch_id":null}"#).unwrap();
        assert_eq!(p.batch_id, Some(None));
        let p: Patch = serde_json::from_str(r#"{"batch_id":3}"#).unwrap();
        assert_eq!(p.batch_id, Some(Some(3)));
    }
}
