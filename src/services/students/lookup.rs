//! 学生表单的级联下拉：课程 -> 教职工 -> 批次

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode, staff::entities::SelectOption, students::requests::LookupParams,
};
use crate::services::error_response;

pub async fn staff_for_course(
    service: &StudentService,
    query: LookupParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(course_id) = query.course_id() else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<SelectOption>::new(),
            "Staff options retrieved successfully",
        )));
    };

    let storage = service.get_storage(request)?;

    match storage.list_staff_for_course(course_id).await {
        Ok(staff) => {
            let options: Vec<SelectOption> = staff
                .into_iter()
                .map(|s| SelectOption {
                    id: s.staff_id,
                    name: s.staff_name,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                options,
                "Staff options retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn batches_for_staff(
    service: &StudentService,
    query: LookupParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(staff_id) = query.staff_id() else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<SelectOption>::new(),
            "Batch options retrieved successfully",
        )));
    };

    let storage = service.get_storage(request)?;

    match storage.list_batches_for_staff(staff_id).await {
        Ok(batches) => {
            let options: Vec<SelectOption> = batches
                .iter()
                .map(|b| SelectOption {
                    id: b.batch_id,
                    name: b.display_name(),
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                options,
                "Batch options retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
