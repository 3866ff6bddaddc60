pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod lookup;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::TesdbError;
use crate::models::{
    ApiResponse, ErrorCode,
    students::requests::{
        CreateStudentRequest, LookupParams, StudentListParams, UpdateStudentRequest,
    },
};
use crate::storage::Storage;
use crate::utils::validate::validate_email;

use super::error_response;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, data, request).await
    }

    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, data, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id, request).await
    }

    pub async fn staff_for_course(
        &self,
        query: LookupParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lookup::staff_for_course(self, query, request).await
    }

    pub async fn batches_for_staff(
        &self,
        query: LookupParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lookup::batches_for_staff(self, query, request).await
    }
}

/// 学生归属校验失败的原因
#[derive(Debug)]
pub(crate) enum AssignmentRejection {
    Invalid(ErrorCode, &'static str),
    Storage(TesdbError),
}

impl From<TesdbError> for AssignmentRejection {
    fn from(err: TesdbError) -> Self {
        Self::Storage(err)
    }
}

impl AssignmentRejection {
    pub(crate) fn into_response(self) -> HttpResponse {
        match self {
            Self::Invalid(code, msg) => {
                HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
            }
            Self::Storage(e) => error_response(&e, ErrorCode::Conflict),
        }
    }
}

/// 合并后的归属信息
#[derive(Debug, Clone, Copy)]
pub(crate) struct Assignment {
    pub course_id: i64,
    pub staff_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// 级联校验：课程 -> 教职工 -> 批次，以及结束日期不早于入学日期
pub(crate) async fn check_assignment(
    storage: &dyn Storage,
    assignment: Assignment,
) -> Result<(), AssignmentRejection> {
    use AssignmentRejection::Invalid;

    if let Some(end) = assignment.end_date
        && end < assignment.join_date
    {
        return Err(Invalid(
            ErrorCode::ValidationFailed,
            "End date cannot be before join date",
        ));
    }

    if storage.get_course_by_id(assignment.course_id).await?.is_none() {
        return Err(Invalid(ErrorCode::CourseNotFound, "Course not found"));
    }

    let Some(staff_id) = assignment.staff_id else {
        if assignment.batch_id.is_some() {
            return Err(Invalid(
                ErrorCode::StudentAssignmentInvalid,
                "A batch can only be set together with a staff member",
            ));
        }
        return Ok(());
    };

    if storage.get_staff_by_id(staff_id).await?.is_none() {
        return Err(Invalid(ErrorCode::StaffNotFound, "Staff not found"));
    }
    if !storage
        .staff_teaches_course(staff_id, assignment.course_id)
        .await?
    {
        return Err(Invalid(
            ErrorCode::StudentAssignmentInvalid,
            "Selected staff does not teach this course",
        ));
    }

    if let Some(batch_id) = assignment.batch_id {
        match storage.get_batch_by_id(batch_id).await? {
            None => return Err(Invalid(ErrorCode::BatchNotFound, "Batch not found")),
            Some(batch) if batch.staff_id != staff_id => {
                return Err(Invalid(
                    ErrorCode::StudentAssignmentInvalid,
                    "Selected batch does not belong to the selected staff",
                ));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// 姓名、邮箱、电话的格式校验
pub(crate) fn validate_contact_fields(
    name: Option<&str>,
    email: Option<&str>,
    contact: Option<&str>,
) -> Result<(), (ErrorCode, &'static str)> {
    if let Some(name) = name
        && (name.is_empty() || name.chars().count() > 100)
    {
        return Err((
            ErrorCode::ValidationFailed,
            "Student name must be between 1 and 100 characters",
        ));
    }
    if let Some(email) = email {
        validate_email(email).map_err(|msg| (ErrorCode::ValidationFailed, msg))?;
    }
    // 学生电话可为空，只限长度
    if let Some(contact) = contact
        && contact.chars().count() > 20
    {
        return Err((
            ErrorCode::ValidationFailed,
            "Contact number must be at most 20 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_batch, seed_course, seed_staff};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rejection_code(result: Result<(), AssignmentRejection>) -> ErrorCode {
        match result {
            Err(AssignmentRejection::Invalid(code, _)) => code,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_assignment_cascade() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let python = seed_course(&storage, "Python").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let asha = seed_staff(&storage, "Asha", &[java.course_id]).await;
        let morning = seed_batch(&storage, ravi.staff_id, "Morning", 9, 11).await;

        let base = Assignment {
            course_id: java.course_id,
            staff_id: Some(ravi.staff_id),
            batch_id: Some(morning.batch_id),
            join_date: date(2024, 1, 15),
            end_date: None,
        };
        assert!(check_assignment(&storage, base).await.is_ok());

        let wrong_course = Assignment {
            course_id: python.course_id,
            ..base
        };
        assert_eq!(
            rejection_code(check_assignment(&storage, wrong_course).await),
            ErrorCode::StudentAssignmentInvalid
        );

        let foreign_batch = Assignment {
            staff_id: Some(asha.staff_id),
            ..base
        };
        assert_eq!(
            rejection_code(check_assignment(&storage, foreign_batch).await),
            ErrorCode::StudentAssignmentInvalid
        );

        let batch_without_staff = Assignment {
            staff_id: None,
            ..base
        };
        assert_eq!(
            rejection_code(check_assignment(&storage, batch_without_staff).await),
            ErrorCode::StudentAssignmentInvalid
        );

        let ends_early = Assignment {
            end_date: Some(date(2024, 1, 14)),
            ..base
        };
        assert_eq!(
            rejection_code(check_assignment(&storage, ends_early).await),
            ErrorCode::ValidationFailed
        );

        let unassigned = Assignment {
            staff_id: None,
            batch_id: None,
            end_date: Some(date(2024, 1, 15)),
            ..base
        };
        assert!(check_assignment(&storage, unassigned).await.is_ok());
    }

    #[test]
    fn test_validate_contact_fields() {
        assert!(validate_contact_fields(Some("Kiran"), Some("k@x.in"), Some("9876543210")).is_ok());
        assert!(validate_contact_fields(None, None, None).is_ok());
        assert!(validate_contact_fields(Some(""), None, None).is_err());
        assert!(validate_contact_fields(None, Some("nope"), None).is_err());
        assert!(validate_contact_fields(None, None, Some("")).is_ok());
        assert!(validate_contact_fields(None, None, Some("+91 98765 43210")).is_ok());
        assert!(validate_contact_fields(None, None, Some(&"9".repeat(21))).is_err());
    }
}
