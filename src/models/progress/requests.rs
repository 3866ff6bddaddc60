use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, query};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressEntry {
    pub progress_id: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub marks: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct UpdateProgressRequest {
    pub entries: Vec<ProgressEntry>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub course_id: Option<i64>,
    pub module_name: Option<String>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub staff_id: Option<i64>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub student_id: Option<i64>,
    /// 匹配学生姓名、知识点或签名
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProgressListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub module_name: Option<String>,
    pub staff_id: Option<i64>,
    pub student_id: Option<i64>,
    pub search: Option<String>,
}

impl From<ProgressListParams> for ProgressListQuery {
    fn from(params: ProgressListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            course_id: params.course_id,
            module_name: params.module_name,
            staff_id: params.staff_id,
            student_id: params.student_id,
            search: params.search,
        }
    }
}
