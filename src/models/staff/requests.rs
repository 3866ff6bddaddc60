use crate::models::common::{PaginationQuery, query};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct StaffListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub course_id: Option<i64>,
    /// 邮箱域名，例如 `college.edu`
    pub email_domain: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct CreateStaffRequest {
    pub user_id: i64,
    pub staff_name: String,
    #[serde(default)]
    pub contact: String,
    pub staff_email: String,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct UpdateStaffRequest {
    pub staff_name: Option<String>,
    pub contact: Option<String>,
    pub staff_email: Option<String>,
    /// 提供时整体替换授课课程
    pub course_ids: Option<Vec<i64>>,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub email_domain: Option<String>,
    pub search: Option<String>,
}

impl From<StaffListParams> for StaffListQuery {
    fn from(params: StaffListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            course_id: params.course_id,
            email_domain: params.email_domain,
            search: params.search,
        }
    }
}
