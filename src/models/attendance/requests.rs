use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, query};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StaffAttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub staff_id: Option<i64>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "query::optional_bool")]
    pub wifi_verified: Option<bool>,
    /// 教职工姓名
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_bool")]
    pub status: Option<bool>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub staff_id: Option<i64>,
    /// 学生、教职工或课程名称
    pub search: Option<String>,
}

/// `?date=YYYY-MM-DD`，无法解析时使用今天
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceDateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkStudentAttendanceRequest {
    #[serde(default)]
    pub date: Option<String>,
    /// 学生 ID（字符串键）-> "present" / 其他
    pub statuses: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct StaffAttendanceListQuery {
    pub page: u64,
    pub size: u64,
    pub staff_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub wifi_verified: Option<bool>,
    pub search: Option<String>,
}

impl From<StaffAttendanceListParams> for StaffAttendanceListQuery {
    fn from(params: StaffAttendanceListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            staff_id: params.staff_id,
            date: params.date,
            wifi_verified: params.wifi_verified,
            search: params.search,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentAttendanceListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<bool>,
    pub date: Option<NaiveDate>,
    pub course_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub search: Option<String>,
}

impl From<StudentAttendanceListParams> for StudentAttendanceListQuery {
    fn from(params: StudentAttendanceListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            status: params.status,
            date: params.date,
            course_id: params.course_id,
            staff_id: params.staff_id,
            search: params.search,
        }
    }
}
