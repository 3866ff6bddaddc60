use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{Assignment, StudentService, check_assignment, validate_contact_fields};
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::error_response;

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    mut data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for field in [
        &mut data.student_name,
        &mut data.student_email,
        &mut data.student_contact,
    ] {
        if let Some(value) = field.as_mut() {
            *value = value.trim().to_string();
        }
    }

    if let Err((code, msg)) = validate_contact_fields(
        data.student_name.as_deref(),
        data.student_email.as_deref(),
        data.student_contact.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request)?;

    let existing = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    let assignment = Assignment {
        course_id: data.course_id.unwrap_or(existing.course_id),
        staff_id: data.staff_id.unwrap_or(existing.staff_id),
        batch_id: data.batch_id.unwrap_or(existing.batch_id),
        join_date: data.join_date.unwrap_or(existing.join_date),
        end_date: data.end_date.unwrap_or(existing.end_date),
    };
    if let Err(rejection) = check_assignment(storage.as_ref(), assignment).await {
        return Ok(rejection.into_response());
    }

    match storage.update_student(student_id, data).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::StudentAlreadyExists)),
    }
}
