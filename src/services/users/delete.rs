use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, invalidate_user_cache};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.delete_user(user_id).await {
        Ok(true) => {
            invalidate_user_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::seed_user;
    use actix_web::{HttpMessage, body::to_bytes, http::StatusCode, test::TestRequest};
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_user_rules() {
        let storage = SeaOrmStorage::in_memory().await;
        let admin = seed_user(&storage, "admin").await;
        let other = seed_user(&storage, "ravi").await;

        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(admin.clone());
        let service = UserService {
            storage: Some(Arc::new(storage)),
        };

        let resp = delete_user(&service, admin.id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], ErrorCode::CanNotDeleteCurrentUser as i32);

        let resp = delete_user(&service, other.id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = delete_user(&service, other.id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = delete_user(&service, 9999, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
