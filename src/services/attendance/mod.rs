pub mod mark;
pub mod staff_records;
pub mod student_records;

pub use mark::mark_staff_attendance;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    StaffAttendanceListParams, StudentAttendanceListParams,
};
use crate::storage::Storage;

/// 管理端考勤记录
pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_staff_attendance(
        &self,
        query: StaffAttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        staff_records::list_staff_attendance(self, query, request).await
    }

    pub async fn delete_staff_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        staff_records::delete_staff_attendance(self, id, request).await
    }

    pub async fn list_student_attendance(
        &self,
        query: StudentAttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_records::list_student_attendance(self, query, request).await
    }

    pub async fn delete_student_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_records::delete_student_attendance(self, id, request).await
    }
}
