use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, normalize_course_name};
use crate::models::{ApiResponse, ErrorCode, courses::requests::CourseRequest};
use crate::services::error_response;

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    data: CourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = match normalize_course_name(&data.course_name) {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request)?;

    match storage.update_course(course_id, &name).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseAlreadyExists)),
    }
}
