use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BatchService, normalize_batch};
use crate::models::{ApiResponse, ErrorCode, batches::requests::CreateBatchRequest};
use crate::services::error_response;

pub async fn create_batch(
    service: &BatchService,
    data: CreateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let batch = match normalize_batch(data.batch) {
        Ok(batch) => batch,
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    let storage = service.get_storage(request)?;

    match storage.get_staff_by_id(data.staff_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::StaffNotFound,
                "Staff not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    }

    match storage.create_batch(data.staff_id, batch).await {
        Ok(batch) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(batch, "Batch created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::BatchAlreadyExists)),
    }
}
