use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, normalize_course_name};
use crate::models::{ApiResponse, ErrorCode, courses::requests::CourseRequest};
use crate::services::error_response;

pub async fn create_course(
    service: &CourseService,
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

    match storage.create_course(&name).await {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseAlreadyExists)),
    }
}
