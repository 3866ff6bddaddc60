use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::topics::requests::{CreateTopicRequest, TopicListParams, UpdateTopicRequest};
use crate::models::users::entities::UserRole;
use crate::services::TopicService;
use crate::utils::SafeIDI64;

static TOPIC_SERVICE: Lazy<TopicService> = Lazy::new(TopicService::new_lazy);

pub async fn list_topics(
    req: HttpRequest,
    query: web::Query<TopicListParams>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.list_topics(query.into_inner(), &req).await
}

pub async fn create_topic(
    req: HttpRequest,
    data: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.create_topic(data.into_inner(), &req).await
}

pub async fn get_topic(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.get_topic(id.0, &req).await
}

pub async fn update_topic(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.update_topic(id.0, data.into_inner(), &req).await
}

pub async fn delete_topic(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.delete_topic(id.0, &req).await
}

pub fn configure_topic_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/topics")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_topics))
            .route("", web::post().to(create_topic))
            .route("/{id}", web::get().to(get_topic))
            .route("/{id}", web::put().to(update_topic))
            .route("/{id}", web::delete().to(delete_topic)),
    );
}
