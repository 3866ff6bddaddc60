use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::time::hhmm;

/// 教职工考勤记录，同一天最多一条已验证、一条未验证
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StaffAttendance {
    pub id: i64,
    pub staff_id: i64,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub time: NaiveTime,
    pub wifi_verified: bool,
}

/// 学生考勤记录，每人每天一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendance {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub time: NaiveTime,
    /// true = 出勤
    pub status: Option<bool>,
}

/// 登录打卡结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "attendance.ts")]
pub enum AttendanceOutcome {
    /// 今天已有 WiFi 验证记录，不做任何事
    AlreadyVerified,
    MarkedVerified,
    MarkedUnverified,
    /// 今天已有未验证记录且本次仍未验证
    AlreadyUnverified,
}

impl AttendanceOutcome {
    pub fn decide(verified_exists: bool, unverified_exists: bool, wifi_verified: bool) -> Self {
        if verified_exists {
            Self::AlreadyVerified
        } else if wifi_verified {
            Self::MarkedVerified
        } else if unverified_exists {
            Self::AlreadyUnverified
        } else {
            Self::MarkedUnverified
        }
    }

    /// 需要新写入的记录的验证状态
    pub fn record_to_create(self) -> Option<bool> {
        match self {
            Self::MarkedVerified => Some(true),
            Self::MarkedUnverified => Some(false),
            Self::AlreadyVerified | Self::AlreadyUnverified => None,
        }
    }
}

/// 表单中 "present" 为出勤，其余值均为缺勤
pub fn parse_status(raw: &str) -> bool {
    raw == "present"
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StaffAttendanceItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: StaffAttendance,
    pub staff_name: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: StudentAttendance,
    pub student_name: String,
    pub course_name: String,
    pub staff_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_verified_record_short_circuits() {
        for unverified in [false, true] {
            for wifi in [false, true] {
                assert_eq!(
                    AttendanceOutcome::decide(true, unverified, wifi),
                    AttendanceOutcome::AlreadyVerified
                );
            }
        }
    }

    #[test]
    fn test_decide_wifi_upgrades_unverified_day() {
        let outcome = AttendanceOutcome::decide(false, true, true);
        assert_eq!(outcome, AttendanceOutcome::MarkedVerified);
        assert_eq!(outcome.record_to_create(), Some(true));
    }

    #[test]
    fn test_decide_unverified_once_per_day() {
        let first = AttendanceOutcome::decide(false, false, false);
        assert_eq!(first, AttendanceOutcome::MarkedUnverified);
        assert_eq!(first.record_to_create(), Some(false));

        let second = AttendanceOutcome::decide(false, true, false);
        assert_eq!(second, AttendanceOutcome::AlreadyUnverified);
        assert_eq!(second.record_to_create(), None);
    }

    #[test]
    fn test_parse_status() {
        assert!(parse_status("present"));
        assert!(!parse_status("absent"));
        assert!(!parse_status("Present"));
        assert!(!parse_status(""));
    }
}
