use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 上课方式，数据库中以布尔存储（true = 线下）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "student.ts")]
pub enum StudentMode {
    #[default]
    Offline,
    Online,
}

impl StudentMode {
    pub fn from_flag(offline: bool) -> Self {
        if offline { Self::Offline } else { Self::Online }
    }

    pub fn as_flag(self) -> bool {
        matches!(self, Self::Offline)
    }
}

impl std::fmt::Display for StudentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentMode::Offline => write!(f, "Offline"),
            StudentMode::Online => write!(f, "Online"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub student_id: i64,
    pub student_name: String,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub course_id: i64,
    pub staff_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub student_email: String,
    pub student_contact: String,
    pub mode: StudentMode,
}

// 列表展示用，附带关联名称
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentWithNames {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub course_name: String,
    pub staff_name: Option<String>,
    /// 批次展示名
    pub batch_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag_mapping() {
        assert_eq!(StudentMode::from_flag(true), StudentMode::Offline);
        assert_eq!(StudentMode::from_flag(false), StudentMode::Online);
        assert!(StudentMode::Offline.as_flag());
        assert!(!StudentMode::Online.as_flag());
        assert_eq!(StudentMode::Online.to_string(), "Online");
    }

    #[test]
    fn test_mode_wire_format() {
        assert_eq!(serde_json::to_string(&StudentMode::Offline).unwrap(), r#""offline""#);
        let mode: StudentMode = serde_json::from_str(r#""online""#).unwrap();
        assert_eq!(mode, StudentMode::Online);
    }
}
