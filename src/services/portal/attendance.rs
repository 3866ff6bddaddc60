use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::PortalService;
use crate::config::AppConfig;
use crate::errors::TesdbError;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::parse_status,
        requests::{AttendanceDateQuery, MarkStudentAttendanceRequest},
        responses::{AttendanceRow, BatchAttendanceResponse},
    },
};
use crate::services::error_response;
use crate::utils::time::resolve_attendance_date;

pub async fn student_attendance(
    service: &PortalService,
    batch_id: i64,
    query: AttendanceDateQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let batch = match ctx.owned_batch(batch_id).await {
        Ok(batch) => batch,
        Err(response) => return Ok(response),
    };

    let date = resolve_attendance_date(query.date.as_deref(), AppConfig::get().today());
    let loaded = async {
        let students = ctx
            .storage
            .list_students_in_batch(ctx.staff.staff_id, batch_id)
            .await?;
        let ids: Vec<i64> = students.iter().map(|s| s.student_id).collect();
        let records = ctx.storage.list_student_attendance_for_date(&ids, date).await?;
        Ok::<_, TesdbError>((students, records))
    }
    .await;

    match loaded {
        Ok((students, records)) => {
            let mut by_student: HashMap<i64, _> =
                records.into_iter().map(|r| (r.student_id, r)).collect();
            let rows = students
                .into_iter()
                .map(|student| AttendanceRow {
                    record: by_student.remove(&student.student_id),
                    student,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BatchAttendanceResponse { batch, date, rows },
                "Attendance retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

/// 只处理本批次中提交了状态的学生，其他键忽略
pub async fn mark_student_attendance(
    service: &PortalService,
    batch_id: i64,
    data: MarkStudentAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let batch = match ctx.owned_batch(batch_id).await {
        Ok(batch) => batch,
        Err(response) => return Ok(response),
    };

    let config = AppConfig::get();
    let date = resolve_attendance_date(data.date.as_deref(), config.today());
    let now = config.local_now().time();

    let saved = async {
        let students = ctx
            .storage
            .list_students_in_batch(ctx.staff.staff_id, batch_id)
            .await?;
        let mut rows = Vec::new();
        for student in students {
            let Some(raw) = data.statuses.get(&student.student_id.to_string()) else {
                continue;
            };
            let record = ctx
                .storage
                .upsert_student_attendance(student.student_id, date, now, parse_status(raw))
                .await?;
            rows.push(AttendanceRow {
                student,
                record: Some(record),
            });
        }
        Ok::<_, TesdbError>(rows)
    }
    .await;

    match saved {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BatchAttendanceResponse { batch, date, rows },
            "Attendance saved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
