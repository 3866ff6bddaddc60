use super::entities::{Student, StudentWithNames};
use crate::models::attendance::entities::StaffAttendance;
use crate::models::batches::entities::Batch;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentWithNames>,
    pub pagination: PaginationInfo,
}

// 门户：批次学生列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct BatchStudentsResponse {
    pub batch: Batch,
    pub students: Vec<Student>,
    pub batches: Vec<Batch>,
    /// 本人今天最近一条打卡记录
    pub today_attendance: Option<StaffAttendance>,
}
