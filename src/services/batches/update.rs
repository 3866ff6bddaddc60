use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BatchService, validate_batch_name};
use crate::models::{ApiResponse, ErrorCode, batches::requests::UpdateBatchRequest};
use crate::services::error_response;
use crate::utils::validate::validate_time_range;

pub async fn update_batch(
    service: &BatchService,
    batch_id: i64,
    mut data: UpdateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = data.batch_name.as_mut() {
        *name = name.trim().to_string();
        if let Err((code, msg)) = validate_batch_name(name) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    }

    let storage = service.get_storage(request)?;

    let existing = match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => batch,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BatchNotFound,
                "Batch not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    // 与现有值合并后再校验时间顺序
    let start = data.start_time.unwrap_or(existing.start_time);
    let end = data.end_time.unwrap_or(existing.end_time);
    if let Err(msg) = validate_time_range(start, end) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BatchTimeInvalid, msg)));
    }

    if let Some(staff_id) = data.staff_id.filter(|id| *id != existing.staff_id) {
        match storage.get_staff_by_id(staff_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StaffNotFound,
                    "Staff not found",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        }
    }

    match storage.update_batch(batch_id, data).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batch,
            "Batch updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::BatchAlreadyExists)),
    }
}
