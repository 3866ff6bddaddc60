//! 教职工门户
//!
//! 所有操作先解析当前账号对应的教职工档案，再按档案过滤数据：
//! 批次、学生只能访问自己名下的。

pub mod attendance;
pub mod batches;
pub mod progress;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::requests::{AttendanceDateQuery, MarkStudentAttendanceRequest},
    batches::{entities::Batch, requests::AddBatchRequest},
    progress::requests::UpdateProgressRequest,
    staff::entities::Staff,
    students::{entities::Student, requests::PortalStudentUpdate},
};
use crate::storage::Storage;

use super::error_response;

pub struct PortalService {
    storage: Option<Arc<dyn Storage>>,
}

/// 当前请求的存储与教职工档案
pub(crate) struct PortalContext {
    pub storage: Arc<dyn Storage>,
    pub staff: Staff,
}

impl PortalContext {
    /// 自己名下的批次，否则 404
    pub(crate) async fn owned_batch(&self, batch_id: i64) -> Result<Batch, HttpResponse> {
        match self.storage.get_batch_by_id(batch_id).await {
            Ok(Some(batch)) if batch.staff_id == self.staff.staff_id => Ok(batch),
            Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BatchNotFound,
                "Batch not found",
            ))),
            Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
        }
    }

    /// 自己名下的学生；不存在 404，不属于自己 403
    pub(crate) async fn owned_student(&self, student_id: i64) -> Result<Student, HttpResponse> {
        match self.storage.get_student_by_id(student_id).await {
            Ok(Some(student)) if student.staff_id == Some(self.staff.staff_id) => Ok(student),
            Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentPermissionDenied,
                "You do not have permission to access this student",
            ))),
            Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            ))),
            Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
        }
    }
}

impl PortalService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    /// 解析当前教职工；没有档案的账号不能使用门户
    pub(crate) async fn context(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<Result<PortalContext, HttpResponse>> {
        let storage = self.get_storage(request)?;
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            ))));
        };

        Ok(match storage.get_staff_by_user_id(user_id).await {
            Ok(Some(staff)) => Ok(PortalContext { storage, staff }),
            Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StaffProfileMissing,
                "No staff profile is linked to this account",
            ))),
            Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
        })
    }

    pub async fn list_batches(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        batches::list_batches(self, request).await
    }

    pub async fn add_batch(
        &self,
        data: AddBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batches::add_batch(self, data, request).await
    }

    pub async fn student_list(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batches::student_list(self, batch_id, request).await
    }

    pub async fn update_student(
        &self,
        batch_id: i64,
        student_id: i64,
        data: PortalStudentUpdate,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batches::update_student(self, batch_id, student_id, data, request).await
    }

    pub async fn student_detail(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        progress::student_detail(self, student_id, request).await
    }

    pub async fn progress_sheet(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        progress::progress_sheet(self, student_id, request).await
    }

    pub async fn update_progress(
        &self,
        student_id: i64,
        data: UpdateProgressRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        progress::update_progress(self, student_id, data, request).await
    }

    pub async fn student_attendance(
        &self,
        batch_id: i64,
        query: AttendanceDateQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::student_attendance(self, batch_id, query, request).await
    }

    pub async fn mark_student_attendance(
        &self,
        batch_id: i64,
        data: MarkStudentAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::mark_student_attendance(self, batch_id, data, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::requests::ProgressEntry;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{
        seed_batch, seed_course, seed_staff, seed_student, seed_topic, seed_user,
    };
    use actix_web::{HttpMessage, body::to_bytes, http::StatusCode, test::TestRequest};
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::collections::HashMap;

    async fn request_as(storage: &SeaOrmStorage, user_id: i64) -> HttpRequest {
        let user = storage.get_user_by_id_impl(user_id).await.unwrap().unwrap();
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(user);
        req
    }

    async fn body_json(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_account_without_profile_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        let plain = seed_user(&storage, "plain").await;
        let req = request_as(&storage, plain.id).await;
        let service = PortalService {
            storage: Some(Arc::new(storage)),
        };

        let resp = service.list_batches(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::StaffProfileMissing as i32);
    }

    #[tokio::test]
    async fn test_foreign_student_and_batch_are_hidden() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let asha = seed_staff(&storage, "Asha", &[java.course_id]).await;
        let asha_batch = seed_batch(&storage, asha.staff_id, "Morning", 9, 11).await;
        let kiran = seed_student(
            &storage,
            "Kiran",
            java.course_id,
            Some(asha.staff_id),
            Some(asha_batch.batch_id),
        )
        .await;

        let req = request_as(&storage, ravi.user_id).await;
        let service = PortalService {
            storage: Some(Arc::new(storage)),
        };

        let resp = service.student_detail(kiran.student_id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = service.student_list(asha_batch.batch_id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = service.student_detail(9999, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_progress_sheet_and_signed_update() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        seed_topic(&storage, java.course_id, "Basics", "Loops").await;
        let kiran =
            seed_student(&storage, "Kiran", java.course_id, Some(ravi.staff_id), None).await;

        let req = request_as(&storage, ravi.user_id).await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let service = PortalService {
            storage: Some(storage.clone()),
        };

        let resp = service.progress_sheet(kiran.student_id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let rows = body["data"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["topic_name"], "Variables");
        let first = rows[0]["id"].as_i64().unwrap();
        let second = rows[1]["id"].as_i64().unwrap();

        let d = |day| NaiveDate::from_ymd_opt(2024, 2, day);
        // 第二条非法，整批不写
        let bad = UpdateProgressRequest {
            entries: vec![
                ProgressEntry {
                    progress_id: first,
                    start_date: d(1),
                    end_date: d(5),
                    marks: Some(8),
                },
                ProgressEntry {
                    progress_id: second,
                    start_date: None,
                    end_date: d(5),
                    marks: None,
                },
            ],
        };
        let resp = service
            .update_progress(kiran.student_id, bad, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let untouched = storage.list_progress_for_student(kiran.student_id).await.unwrap();
        assert!(untouched.iter().all(|p| p.marks.is_none() && p.sign.is_empty()));

        let good = UpdateProgressRequest {
            entries: vec![ProgressEntry {
                progress_id: first,
                start_date: d(1),
                end_date: d(5),
                marks: Some(8),
            }],
        };
        let resp = service
            .update_progress(kiran.student_id, good, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["updated"], 1);

        let saved = storage.list_progress_for_student(kiran.student_id).await.unwrap();
        let row = saved.iter().find(|p| p.id == first).unwrap();
        assert_eq!(row.marks, Some(8));
        assert_eq!(row.sign, "Ravi");

        let resp = service.student_detail(kiran.student_id, &req).await.unwrap();
        let body = body_json(resp).await;
        let topics = body["data"]["topics"].as_array().unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0]["progress"]["sign"], "Ravi");
        assert_eq!(body["data"]["course_name"], "Java");
    }

    #[tokio::test]
    async fn test_mark_attendance_only_for_batch_students() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let morning = seed_batch(&storage, ravi.staff_id, "Morning", 9, 11).await;
        let evening = seed_batch(&storage, ravi.staff_id, "Evening", 18, 19).await;
        let kiran = seed_student(
            &storage,
            "Kiran",
            java.course_id,
            Some(ravi.staff_id),
            Some(morning.batch_id),
        )
        .await;
        let meena = seed_student(
            &storage,
            "Meena",
            java.course_id,
            Some(ravi.staff_id),
            Some(evening.batch_id),
        )
        .await;

        let req = request_as(&storage, ravi.user_id).await;
        let service = PortalService {
            storage: Some(Arc::new(storage)),
        };

        let statuses = HashMap::from([
            (kiran.student_id.to_string(), "present".to_string()),
            (meena.student_id.to_string(), "present".to_string()),
        ]);
        let data = MarkStudentAttendanceRequest {
            date: Some("2024-03-04".into()),
            statuses,
        };
        let resp = service
            .mark_student_attendance(morning.batch_id, data, &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let rows = body["data"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["student"]["student_id"], kiran.student_id);
        assert_eq!(rows[0]["record"]["status"], true);
        assert_eq!(body["data"]["date"], "2024-03-04");

        let query = AttendanceDateQuery {
            date: Some("2024-03-04".into()),
        };
        let resp = service
            .student_attendance(morning.batch_id, query, &req)
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["rows"][0]["record"]["status"], true);
    }
}
