use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StaffService, validate_profile};
use crate::models::{ApiResponse, ErrorCode, staff::requests::UpdateStaffRequest};
use crate::services::error_response;

pub async fn update_staff(
    service: &StaffService,
    staff_id: i64,
    mut data: UpdateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for field in [&mut data.staff_name, &mut data.contact, &mut data.staff_email] {
        if let Some(value) = field.as_mut() {
            *value = value.trim().to_string();
        }
    }

    if let Err((code, msg)) = validate_profile(
        data.staff_name.as_deref(),
        data.contact.as_deref(),
        data.staff_email.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request)?;

    match storage.update_staff(staff_id, data).await {
        Ok(Some(staff)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            staff,
            "Staff updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "Staff not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::StaffAlreadyExists)),
    }
}
