//! 日期与时间辅助函数

use chrono::{NaiveDate, NaiveTime};

/// 解析 `HH:MM` 或 `HH:MM:SS`
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// 12 小时制，例如 `09:30 AM`
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// 选择考勤日期：无法解析时取今天，未来日期也回落到今天
pub fn resolve_attendance_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .map(|date| date.min(today))
        .unwrap_or(today)
}

/// `NaiveTime` 以 `HH:MM` 读写
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: '{raw}'")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => crate::utils::time::parse_time_of_day(&raw)
                    .map(Some)
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid time of day: '{raw}'"))
                    }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("09:30"),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("17:05:10"),
            NaiveTime::from_hms_opt(17, 5, 10)
        );
        assert_eq!(parse_time_of_day("9am"), None);
    }

    #[test]
    fn test_format_12h() {
        let t = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        assert_eq!(format_12h(t), "02:00 PM");
        let t = NaiveTime::from_hms_opt(9, 15, 0).unwrap();
        assert_eq!(format_12h(t), "09:15 AM");
    }

    #[test]
    fn test_resolve_attendance_date() {
        let today = d("2024-05-10");
        assert_eq!(resolve_attendance_date(None, today), today);
        assert_eq!(resolve_attendance_date(Some("garbage"), today), today);
        assert_eq!(resolve_attendance_date(Some("2024-06-01"), today), today);
        assert_eq!(
            resolve_attendance_date(Some("2024-05-01"), today),
            d("2024-05-01")
        );
    }
}
