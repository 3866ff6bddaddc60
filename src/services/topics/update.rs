use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TopicService, normalize_module, normalize_topic};
use crate::models::{ApiResponse, ErrorCode, topics::requests::UpdateTopicRequest};
use crate::services::error_response;

pub async fn update_topic(
    service: &TopicService,
    topic_id: i64,
    mut data: UpdateTopicRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let normalized = data
        .module_name
        .as_deref()
        .map(normalize_module)
        .transpose()
        .and_then(|module| {
            let topic = data.topic_name.as_deref().map(normalize_topic).transpose()?;
            Ok((module, topic))
        });
    match normalized {
        Ok((module, topic)) => {
            data.module_name = module;
            data.topic_name = topic;
        }
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    let storage = service.get_storage(request)?;

    if let Some(course_id) = data.course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        }
    }

    match storage.update_topic(topic_id, data).await {
        Ok(Some(topic)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            topic,
            "Topic updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TopicNotFound,
            "Topic not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::TopicAlreadyExists)),
    }
}
