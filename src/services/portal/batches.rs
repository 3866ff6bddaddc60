use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PortalService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    batches::requests::AddBatchRequest,
    students::{
        requests::{PortalStudentUpdate, UpdateStudentRequest},
        responses::BatchStudentsResponse,
    },
};
use crate::services::{batches::normalize_batch, error_response};

pub async fn list_batches(
    service: &PortalService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    match ctx.storage.list_batches_for_staff(ctx.staff.staff_id).await {
        Ok(batches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batches,
            "Batches retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn add_batch(
    service: &PortalService,
    data: AddBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let batch = match normalize_batch(data) {
        Ok(batch) => batch,
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    match ctx.storage.create_batch(ctx.staff.staff_id, batch).await {
        Ok(batch) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(batch, "Batch added successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::BatchAlreadyExists)),
    }
}

pub async fn student_list(
    service: &PortalService,
    batch_id: i64,
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

    let staff_id = ctx.staff.staff_id;
    let today = AppConfig::get().today();
    let loaded = async {
        let students = ctx.storage.list_students_in_batch(staff_id, batch_id).await?;
        let batches = ctx.storage.list_batches_for_staff(staff_id).await?;
        let records = ctx
            .storage
            .list_staff_attendance_for_date(staff_id, today)
            .await?;
        Ok::<_, crate::errors::TesdbError>((students, batches, records))
    }
    .await;

    match loaded {
        Ok((students, batches, records)) => {
            // 按时间升序，取最后一条
            let today_attendance = records.into_iter().last();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BatchStudentsResponse {
                    batch,
                    students,
                    batches,
                    today_attendance,
                },
                "Students retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn update_student(
    service: &PortalService,
    batch_id: i64,
    student_id: i64,
    data: PortalStudentUpdate,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ctx.owned_batch(batch_id).await {
        return Ok(response);
    }
    if let Err(response) = ctx.owned_student(student_id).await {
        return Ok(response);
    }

    if let Some(new_batch) = data.batch_id
        && let Err(response) = ctx.owned_batch(new_batch).await
    {
        return Ok(response);
    }

    let update = UpdateStudentRequest {
        batch_id: data.batch_id.map(Some),
        mode: data.mode,
        ..Default::default()
    };

    match ctx.storage.update_student(student_id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
