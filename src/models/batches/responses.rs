use super::entities::BatchWithStaff;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchListResponse {
    pub items: Vec<BatchWithStaff>,
    pub pagination: PaginationInfo,
}
