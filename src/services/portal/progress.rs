use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::info;

use super::PortalService;
use crate::errors::TesdbError;
use crate::models::{
    ApiResponse, ErrorCode,
    progress::{
        entities::TopicWithProgress,
        requests::UpdateProgressRequest,
        responses::{ProgressSheetResponse, ProgressUpdateResponse, StudentDetailResponse},
    },
};
use crate::services::error_response;
use crate::utils::validate::validate_progress_dates;

pub async fn student_detail(
    service: &PortalService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let student = match ctx.owned_student(student_id).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let loaded = async {
        let course = ctx.storage.get_course_by_id(student.course_id).await?;
        let topics = ctx.storage.list_topics_for_course(student.course_id).await?;
        let progress = ctx.storage.list_progress_for_student(student.student_id).await?;
        Ok::<_, TesdbError>((course, topics, progress))
    }
    .await;

    match loaded {
        Ok((course, topics, progress)) => {
            let mut by_topic: HashMap<i64, _> =
                progress.into_iter().map(|p| (p.topic_id, p)).collect();
            let topics = topics
                .into_iter()
                .map(|topic| TopicWithProgress {
                    progress: by_topic.remove(&topic.topic_id),
                    topic,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentDetailResponse {
                    student,
                    course_name: course.map(|c| c.course_name).unwrap_or_default(),
                    topics,
                },
                "Student detail retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn progress_sheet(
    service: &PortalService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let student = match ctx.owned_student(student_id).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    match ctx
        .storage
        .ensure_progress_rows(student.student_id, student.course_id)
        .await
    {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProgressSheetResponse { student, rows },
            "Progress retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn update_progress(
    service: &PortalService,
    student_id: i64,
    data: UpdateProgressRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 全部校验通过才写入
    for entry in &data.entries {
        if let Err(msg) = validate_progress_dates(entry.start_date, entry.end_date) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ProgressDateInvalid,
                format!("Progress {}: {}", entry.progress_id, msg),
            )));
        }
    }

    let ctx = match service.context(request).await? {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let student = match ctx.owned_student(student_id).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    match ctx
        .storage
        .update_progress_entries(student.student_id, data.entries, &ctx.staff.staff_name)
        .await
    {
        Ok(updated) => {
            info!(
                "{} updated {} progress rows for student {}",
                ctx.staff.staff_name, updated, student.student_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ProgressUpdateResponse { updated },
                "Progress updated successfully",
            )))
        }
        Err(TesdbError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ProgressNotFound, msg))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
