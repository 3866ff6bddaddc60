use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StaffService, validate_profile};
use crate::models::{ApiResponse, ErrorCode, staff::requests::CreateStaffRequest};
use crate::services::error_response;

pub async fn create_staff(
    service: &StaffService,
    mut data: CreateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    data.staff_name = data.staff_name.trim().to_string();
    data.contact = data.contact.trim().to_string();
    data.staff_email = data.staff_email.trim().to_string();

    if let Err((code, msg)) = validate_profile(
        Some(&data.staff_name),
        Some(&data.contact),
        Some(&data.staff_email),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(data.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Linked account does not exist",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::StaffAlreadyExists)),
    }
    match storage.get_staff_by_user_id(data.user_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StaffAlreadyExists,
                "This account already has a staff profile",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::StaffAlreadyExists)),
    }

    match storage.create_staff(data).await {
        Ok(staff) => {
            tracing::info!(
                "Staff profile {} created for account {}",
                staff.staff.staff_id,
                staff.staff.user_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(staff, "Staff created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::StaffAlreadyExists)),
    }
}
