use chrono::NaiveTime;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, query};
use crate::utils::time::hhmm;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub staff_id: Option<i64>,
    pub search: Option<String>,
}

/// 教职工在门户中为自己添加批次
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct AddBatchRequest {
    pub batch_name: String,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub end_time: NaiveTime,
}

/// 管理员为任意教职工创建批次
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct CreateBatchRequest {
    pub staff_id: i64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub batch: AddBatchRequest,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct UpdateBatchRequest {
    pub staff_id: Option<i64>,
    pub batch_name: Option<String>,
    #[serde(default, with = "hhmm::option")]
    #[ts(type = "string | null")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    #[ts(type = "string | null")]
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchListQuery {
    pub page: u64,
    pub size: u64,
    pub staff_id: Option<i64>,
    pub search: Option<String>,
}

impl From<BatchListParams> for BatchListQuery {
    fn from(params: BatchListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            staff_id: params.staff_id,
            search: params.search,
        }
    }
}
