use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProgressService;
use crate::models::{
    ApiResponse, ErrorCode,
    progress::requests::{ProgressListParams, ProgressListQuery},
};
use crate::services::error_response;

pub async fn list_progress(
    service: &ProgressService,
    query: ProgressListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_progress_with_pagination(ProgressListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Progress list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
