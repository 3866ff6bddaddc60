use super::entities::{ProgressListItem, ProgressRow, TopicWithProgress};
use crate::models::common::PaginationInfo;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct StudentDetailResponse {
    pub student: Student,
    pub course_name: String,
    pub topics: Vec<TopicWithProgress>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressSheetResponse {
    pub student: Student,
    pub rows: Vec<ProgressRow>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressListResponse {
    pub items: Vec<ProgressListItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressUpdateResponse {
    /// 实际写入的行数
    pub updated: usize,
}
