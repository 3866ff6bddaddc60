use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TopicService;
use crate::models::{
    ApiResponse, ErrorCode,
    topics::requests::{TopicListParams, TopicListQuery},
};
use crate::services::error_response;

pub async fn list_topics(
    service: &TopicService,
    query: TopicListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_topics_with_pagination(TopicListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Topic list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
