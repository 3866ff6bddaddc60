use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::progress::requests::ProgressListParams;
use crate::models::users::entities::UserRole;
use crate::services::ProgressService;

static PROGRESS_SERVICE: Lazy<ProgressService> = Lazy::new(ProgressService::new_lazy);

pub async fn list_progress(
    req: HttpRequest,
    query: web::Query<ProgressListParams>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.list_progress(query.into_inner(), &req).await
}

pub fn configure_progress_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/progress")
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_progress)),
    );
}
