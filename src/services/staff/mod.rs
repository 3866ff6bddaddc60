pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::staff::requests::{CreateStaffRequest, StaffListParams, UpdateStaffRequest};
use crate::storage::Storage;

/// 管理端：教职工档案
pub struct StaffService {
    storage: Option<Arc<dyn Storage>>,
}

impl StaffService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_staff(
        &self,
        query: StaffListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_staff(self, query, request).await
    }

    pub async fn create_staff(
        &self,
        data: CreateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_staff(self, data, request).await
    }

    pub async fn get_staff(
        &self,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_staff(self, staff_id, request).await
    }

    pub async fn update_staff(
        &self,
        staff_id: i64,
        data: UpdateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_staff(self, staff_id, data, request).await
    }

    pub async fn delete_staff(
        &self,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_staff(self, staff_id, request).await
    }
}

/// 档案字段校验，返回第一条错误
pub(crate) fn validate_profile(
    staff_name: Option<&str>,
    contact: Option<&str>,
    staff_email: Option<&str>,
) -> Result<(), (crate::models::ErrorCode, &'static str)> {
    use crate::models::ErrorCode;
    use crate::utils::validate::{validate_email, validate_mobile};

    if let Some(name) = staff_name
        && (name.trim().is_empty() || name.chars().count() > 100)
    {
        return Err((
            ErrorCode::ValidationFailed,
            "Staff name must be between 1 and 100 characters",
        ));
    }
    if let Some(contact) = contact {
        validate_mobile(contact).map_err(|msg| (ErrorCode::StaffContactInvalid, msg))?;
    }
    if let Some(email) = staff_email {
        validate_email(email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;

    #[test]
    fn test_validate_profile() {
        assert!(validate_profile(Some("Ravi"), Some(""), Some("ravi@inst.in")).is_ok());
        assert!(validate_profile(None, None, None).is_ok());
        assert_eq!(
            validate_profile(Some("Ravi"), Some("12345"), None).unwrap_err().0,
            ErrorCode::StaffContactInvalid
        );
        assert_eq!(
            validate_profile(Some("  "), None, None).unwrap_err().0,
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            validate_profile(None, None, Some("nope")).unwrap_err().0,
            ErrorCode::UserEmailInvalid
        );
    }
}
