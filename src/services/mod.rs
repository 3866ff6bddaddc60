pub mod attendance;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod portal;
pub mod progress;
pub mod staff;
pub mod students;
pub mod topics;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use batches::BatchService;
pub use courses::CourseService;
pub use portal::PortalService;
pub use progress::ProgressService;
pub use staff::StaffService;
pub use students::StudentService;
pub use topics::TopicService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::TesdbError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 取存储实例
pub(crate) fn app_storage(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not configured")
        })
}

/// 账号信息变更后清空认证缓存
pub(crate) async fn invalidate_user_cache(request: &HttpRequest) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.invalidate_all().await;
    }
}

/// 存储层错误转 HTTP 响应；唯一冲突使用调用方给出的业务码
pub(crate) fn error_response(err: &TesdbError, conflict_code: ErrorCode) -> HttpResponse {
    match err {
        TesdbError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.clone())),
        TesdbError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, msg.clone())),
        TesdbError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict_code, msg.clone()))
        }
        TesdbError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.clone())),
        TesdbError::Authorization(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.clone())),
        other => {
            error!("{}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_response_status() {
        let cases = [
            (TesdbError::validation("x"), StatusCode::BAD_REQUEST),
            (TesdbError::not_found("x"), StatusCode::NOT_FOUND),
            (TesdbError::conflict("x"), StatusCode::CONFLICT),
            (TesdbError::authorization("x"), StatusCode::FORBIDDEN),
            (TesdbError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err, ErrorCode::Conflict).status(), status);
        }
    }
}
