use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    StaffAttendanceListParams, StudentAttendanceListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_staff_attendance(
    req: HttpRequest,
    query: web::Query<StaffAttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_staff_attendance(query.into_inner(), &req)
        .await
}

pub async fn delete_staff_attendance(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_staff_attendance(id.0, &req).await
}

pub async fn list_student_attendance(
    req: HttpRequest,
    query: web::Query<StudentAttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_student_attendance(query.into_inner(), &req)
        .await
}

pub async fn delete_student_attendance(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_student_attendance(id.0, &req).await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/attendance")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .route("/staff", web::get().to(list_staff_attendance))
            .route("/staff/{id}", web::delete().to(delete_staff_attendance))
            .route("/students", web::get().to(list_student_attendance))
            .route("/students/{id}", web::delete().to(delete_student_attendance)),
    );
}
