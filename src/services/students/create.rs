use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::info;

use super::{Assignment, StudentService, check_assignment, validate_contact_fields};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::notify::{LogMailer, Mailer, notify_student_assignment};
use crate::services::error_response;

pub async fn create_student(
    service: &StudentService,
    mut data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    data.student_name = data.student_name.trim().to_string();
    data.student_email = data.student_email.trim().to_string();
    data.student_contact = data.student_contact.trim().to_string();

    if let Err((code, msg)) = validate_contact_fields(
        Some(&data.student_name),
        Some(&data.student_email),
        Some(&data.student_contact),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request)?;

    let assignment = Assignment {
        course_id: data.course_id,
        staff_id: data.staff_id,
        batch_id: data.batch_id,
        join_date: data.join_date,
        end_date: data.end_date,
    };
    if let Err(rejection) = check_assignment(storage.as_ref(), assignment).await {
        return Ok(rejection.into_response());
    }

    let student = match storage.create_student(data).await {
        Ok(student) => student,
        Err(e) => return Ok(error_response(&e, ErrorCode::StudentAlreadyExists)),
    };

    if student.staff_id.is_some() {
        let mailer = request
            .app_data::<web::Data<Arc<dyn Mailer>>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_else(|| Arc::new(LogMailer::from_config(AppConfig::get())));
        info!(
            "Queueing assignment mail for student {} (staff {:?})",
            student.student_id, student.staff_id
        );
        actix_web::rt::spawn(notify_student_assignment(
            mailer,
            storage.clone(),
            student.clone(),
        ));
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student created successfully")))
}
