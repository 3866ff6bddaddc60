use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    attendance::entities::AttendanceOutcome,
    auth::{LoginRequest, LoginResponse},
    users::entities::UserStatus,
};
use crate::services::attendance::mark_staff_attendance;
use crate::storage::Storage;
use crate::utils::client_ip::client_ip;
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 根据用户名或邮箱获取账号
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(auth_failed());
    }
    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Account is not active",
        )));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    let refresh_days = if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };
    let token_pair = match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    // 5. 教职工打卡
    let attendance = staff_check_in(storage.as_ref(), user.id, request).await;

    info!("User {} logged in successfully", user.username);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        attendance,
        created_at: chrono::Utc::now(),
    };
    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

/// 打卡失败只记日志，不影响登录
async fn staff_check_in(
    storage: &dyn Storage,
    user_id: i64,
    request: &HttpRequest,
) -> Option<AttendanceOutcome> {
    let staff = match storage.get_staff_by_user_id(user_id).await {
        Ok(Some(staff)) => staff,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to load staff profile for user {}: {}", user_id, e);
            return None;
        }
    };

    let config = crate::config::AppConfig::get();
    let ip = client_ip(request);
    let wifi_verified = config.is_wifi_ip(&ip);
    let now = config.local_now();
    info!(
        "Staff {} login from {} (wifi verified: {})",
        staff.staff_id, ip, wifi_verified
    );

    match mark_staff_attendance(storage, staff.staff_id, now.date(), now.time(), wifi_verified)
        .await
    {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("Attendance marking failed for staff {}: {}", staff.staff_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_staff};
    use crate::utils::password::hash_password;
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest};
    use std::sync::Arc;

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn test_login_without_staff_profile() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_user_impl(CreateUserRequest {
                username: "admin".into(),
                email: "admin@example.com".into(),
                password: hash_password("correct-horse").unwrap(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        let service = AuthService {
            storage: Some(Arc::new(storage)),
        };
        let req = TestRequest::default().to_http_request();

        let resp = service.login(login("admin", "wrong-horse"), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = service
            .login(login("admin@example.com", "correct-horse"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.cookies().any(|c| c.name() == "tesdb_refresh"));
        let body: serde_json::Value =
            serde_json::from_slice(&to_bytes(resp.into_body()).await.unwrap()).unwrap();
        assert!(body["data"]["access_token"].is_string());
        assert!(body["data"].get("attendance").is_none());
        assert!(body["data"]["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_staff_login_records_attendance() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        // 测试请求没有对端地址，不在白名单内
        let req = TestRequest::default().to_http_request();
        let first = staff_check_in(storage.as_ref(), ravi.user_id, &req).await;
        assert_eq!(first, Some(AttendanceOutcome::MarkedUnverified));
        let second = staff_check_in(storage.as_ref(), ravi.user_id, &req).await;
        assert_eq!(second, Some(AttendanceOutcome::AlreadyUnverified));
    }
}
