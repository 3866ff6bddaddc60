use super::entities::StaffWithCourses;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct StaffListResponse {
    pub items: Vec<StaffWithCourses>,
    pub pagination: PaginationInfo,
}
