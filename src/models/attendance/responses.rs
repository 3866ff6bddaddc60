use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{StaffAttendanceItem, StudentAttendance, StudentAttendanceItem};
use crate::models::batches::entities::Batch;
use crate::models::common::PaginationInfo;
use crate::models::students::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StaffAttendanceListResponse {
    pub items: Vec<StaffAttendanceItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceListResponse {
    pub items: Vec<StudentAttendanceItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRow {
    pub student: Student,
    pub record: Option<StudentAttendance>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct BatchAttendanceResponse {
    pub batch: Batch,
    pub date: NaiveDate,
    pub rows: Vec<AttendanceRow>,
}
