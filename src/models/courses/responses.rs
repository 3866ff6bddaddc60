use super::entities::CourseWithStaff;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub items: Vec<CourseWithStaff>,
    pub pagination: PaginationInfo,
}
