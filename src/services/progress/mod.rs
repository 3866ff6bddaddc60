pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::progress::requests::ProgressListParams;
use crate::storage::Storage;

/// 管理端知识点进度查询
pub struct ProgressService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgressService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_progress(
        &self,
        query: ProgressListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_progress(self, query, request).await
    }
}
