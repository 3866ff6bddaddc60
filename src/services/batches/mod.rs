pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    batches::requests::{AddBatchRequest, BatchListParams, CreateBatchRequest, UpdateBatchRequest},
};
use crate::storage::Storage;
use crate::utils::validate::validate_time_range;

pub struct BatchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BatchService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_batches(
        &self,
        query: BatchListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_batches(self, query, request).await
    }

    pub async fn create_batch(
        &self,
        data: CreateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_batch(self, data, request).await
    }

    pub async fn update_batch(
        &self,
        batch_id: i64,
        data: UpdateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_batch(self, batch_id, data, request).await
    }

    pub async fn delete_batch(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_batch(self, batch_id, request).await
    }
}

pub(crate) fn validate_batch_name(name: &str) -> Result<(), (ErrorCode, &'static str)> {
    if name.is_empty() || name.chars().count() > 50 {
        return Err((
            ErrorCode::ValidationFailed,
            "Batch name must be between 1 and 50 characters",
        ));
    }
    Ok(())
}

/// 管理端与门户共用：去空白后校验名称与时间
pub(crate) fn normalize_batch(
    mut batch: AddBatchRequest,
) -> Result<AddBatchRequest, (ErrorCode, &'static str)> {
    batch.batch_name = batch.batch_name.trim().to_string();
    validate_batch_name(&batch.batch_name)?;
    validate_time_range(batch.start_time, batch.end_time)
        .map_err(|msg| (ErrorCode::BatchTimeInvalid, msg))?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn batch(name: &str, start: u32, end: u32) -> AddBatchRequest {
        AddBatchRequest {
            batch_name: name.into(),
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_normalize_batch() {
        assert_eq!(
            normalize_batch(batch("  Morning ", 9, 11)).unwrap().batch_name,
            "Morning"
        );
        assert_eq!(
            normalize_batch(batch("Evening", 18, 18)).unwrap_err().0,
            ErrorCode::BatchTimeInvalid
        );
        assert_eq!(
            normalize_batch(batch(" ", 9, 11)).unwrap_err().0,
            ErrorCode::ValidationFailed
        );
    }
}
