use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{AttendanceDateQuery, MarkStudentAttendanceRequest};
use crate::models::batches::requests::AddBatchRequest;
use crate::models::progress::requests::UpdateProgressRequest;
use crate::models::students::requests::PortalStudentUpdate;
use crate::services::PortalService;
use crate::utils::{SafeBatchIdI64, SafeStudentIdI64};

static PORTAL_SERVICE: Lazy<PortalService> = Lazy::new(PortalService::new_lazy);

pub async fn list_batches(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.list_batches(&req).await
}

pub async fn add_batch(
    req: HttpRequest,
    data: web::Json<AddBatchRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.add_batch(data.into_inner(), &req).await
}

pub async fn student_list(req: HttpRequest, batch_id: SafeBatchIdI64) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.student_list(batch_id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    batch_id: SafeBatchIdI64,
    student_id: SafeStudentIdI64,
    data: web::Json<PortalStudentUpdate>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .update_student(batch_id.0, student_id.0, data.into_inner(), &req)
        .await
}

pub async fn student_detail(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.student_detail(student_id.0, &req).await
}

pub async fn progress_sheet(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.progress_sheet(student_id.0, &req).await
}

pub async fn update_progress(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    data: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .update_progress(student_id.0, data.into_inner(), &req)
        .await
}

pub async fn student_attendance(
    req: HttpRequest,
    batch_id: SafeBatchIdI64,
    query: web::Query<AttendanceDateQuery>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .student_attendance(batch_id.0, query.into_inner(), &req)
        .await
}

pub async fn mark_student_attendance(
    req: HttpRequest,
    batch_id: SafeBatchIdI64,
    data: web::Json<MarkStudentAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .mark_student_attendance(batch_id.0, data.into_inner(), &req)
        .await
}

// 教职工门户，任何已登录账号可进入，服务层再校验教职工档案
pub fn configure_portal_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/portal")
            .wrap(middlewares::RequireJWT)
            .route("/batches", web::get().to(list_batches))
            .route("/batches", web::post().to(add_batch))
            .route("/batches/{batch_id}/students", web::get().to(student_list))
            .route(
                "/batches/{batch_id}/students/{student_id}",
                web::put().to(update_student),
            )
            .route(
                "/batches/{batch_id}/attendance",
                web::get().to(student_attendance),
            )
            .route(
                "/batches/{batch_id}/attendance",
                web::post().to(mark_student_attendance),
            )
            .route("/students/{student_id}", web::get().to(student_detail))
            .route(
                "/students/{student_id}/progress",
                web::get().to(progress_sheet),
            )
            .route(
                "/students/{student_id}/progress",
                web::put().to(update_progress),
            ),
    );
}
