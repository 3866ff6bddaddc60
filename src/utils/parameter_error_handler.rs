use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一结构
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("JSON payload error on {}: {}", req.path(), err);
    let body = ApiResponse::error_empty(ErrorCode::BadRequest, format!("Invalid JSON body: {err}"));
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// 查询参数解析失败时返回统一结构
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Query error on {}: {}", req.path(), err);
    let body = ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    );
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
