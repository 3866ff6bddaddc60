use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TopicService, normalize_module, normalize_topic};
use crate::models::{ApiResponse, ErrorCode, topics::requests::CreateTopicRequest};
use crate::services::error_response;

pub async fn create_topic(
    service: &TopicService,
    mut data: CreateTopicRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match (normalize_module(&data.module_name), normalize_topic(&data.topic_name)) {
        (Ok(module), Ok(topic)) => {
            data.module_name = module;
            data.topic_name = topic;
        }
        (Err(msg), _) | (_, Err(msg)) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    let storage = service.get_storage(request)?;

    match storage.get_course_by_id(data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    }

    match storage.create_topic(data).await {
        Ok(topic) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(topic, "Topic created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::TopicAlreadyExists)),
    }
}
