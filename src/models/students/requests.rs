use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::StudentMode;
use crate::models::common::{PaginationQuery, query};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub staff_id: Option<i64>,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub batch_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub student_name: String,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub course_id: i64,
    #[serde(default)]
    pub staff_id: Option<i64>,
    #[serde(default)]
    pub batch_id: Option<i64>,
    pub student_email: String,
    #[serde(default)]
    pub student_contact: String,
    #[serde(default)]
    pub mode: StudentMode,
}

/// 可清空字段使用 `Option<Option<_>>`：缺省不改，null 清空
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub student_name: Option<String>,
    pub join_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "query::deserialize_some")]
    #[ts(type = "string | null")]
    pub end_date: Option<Option<NaiveDate>>,
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "query::deserialize_some")]
    #[ts(type = "number | null")]
    pub staff_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "query::deserialize_some")]
    #[ts(type = "number | null")]
    pub batch_id: Option<Option<i64>>,
    pub student_email: Option<String>,
    pub student_contact: Option<String>,
    pub mode: Option<StudentMode>,
}

/// 门户中教职工可改的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct PortalStudentUpdate {
    pub batch_id: Option<i64>,
    pub mode: Option<StudentMode>,
}

/// 级联下拉参数，非数字 ID 视为空结果
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct LookupParams {
    pub course_id: Option<String>,
    pub staff_id: Option<String>,
}

impl LookupParams {
    pub fn course_id(&self) -> Option<i64> {
        self.course_id.as_deref().and_then(|s| s.trim().parse().ok())
    }

    pub fn staff_id(&self) -> Option<i64> {
        self.staff_id.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            course_id: params.course_id,
            staff_id: params.staff_id,
            batch_id: params.batch_id,
            search: params.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_params_lenient() {
        let p = LookupParams {
            course_id: Some("12".into()),
            staff_id: Some("abc".into()),
        };
        assert_eq!(p.course_id(), Some(12));
        assert_eq!(p.staff_id(), None);
    }

    #[test]
    fn test_create_request_contact_optional() {
        let req: CreateStudentRequest = serde_json::from_str(
            r#"{"student_name":"Kiran","join_date":"2024-06-01","course_id":1,"student_email":"k@x.in"}"#,
        )
        .unwrap();
        assert_eq!(req.student_contact, "");
        assert_eq!(req.mode, StudentMode::Offline);
    }

    #[test]
    fn test_update_request_clears_batch() {
        let req: UpdateStudentRequest =
            serde_json::from_str(r#"{"batch_id":null,"mode":"online"}"#).unwrap();
        assert_eq!(req.batch_id, Some(None));
        assert_eq!(req.staff_id, None);
        assert_eq!(req.mode, Some(StudentMode::Online));
    }
}
