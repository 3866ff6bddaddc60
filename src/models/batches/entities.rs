use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::time::{format_12h, hhmm};

/// 批次：某位教职工名下的一个上课时间段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct Batch {
    pub batch_id: i64,
    pub staff_id: i64,
    pub batch_name: String,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub end_time: NaiveTime,
}

impl Batch {
    /// `Morning (09:00 AM - 11:00 AM)`
    pub fn display_name(&self) -> String {
        format!(
            "{} ({} - {})",
            self.batch_name,
            format_12h(self.start_time),
            format_12h(self.end_time)
        )
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchWithStaff {
    #[serde(flatten)]
    #[ts(flatten)]
    pub batch: Batch,
    pub display_name: String,
    pub staff_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let batch = Batch {
            batch_id: 1,
            staff_id: 1,
            batch_name: "Morning".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
        };
        assert_eq!(batch.display_name(), "Morning (09:00 AM - 01:30 PM)");
    }

    #[test]
    fn test_times_serialize_as_hhmm() {
        let batch = Batch {
            batch_id: 1,
            staff_id: 2,
            batch_name: "Evening".into(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 15, 0).unwrap(),
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["start_time"], "18:00");
        assert_eq!(json["end_time"], "19:15");
    }
}
