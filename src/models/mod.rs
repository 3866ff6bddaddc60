pub mod attendance;
pub mod auth;
pub mod batches;
pub mod common;
pub mod courses;
pub mod progress;
pub mod staff;
pub mod students;
pub mod topics;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;
use ts_rs::TS;

/// 业务错误码
///
/// - 0: 成功
/// - 1xxx: 通用错误
/// - 2xxx: 认证与账号
/// - 3xxx: 教职工 / 课程 / 批次
/// - 4xxx: 学生 / 知识点 / 进度
/// - 5xxx: 考勤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "error_code.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1999,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    PasswordMismatch = 2002,
    PasswordTooShort = 2003,
    UserNotFound = 2010,
    UserNameInvalid = 2011,
    UserEmailInvalid = 2012,
    UserNameAlreadyExists = 2013,
    UserEmailAlreadyExists = 2014,
    CanNotDeleteCurrentUser = 2015,

    StaffNotFound = 3000,
    StaffProfileMissing = 3001,
    StaffAlreadyExists = 3002,
    StaffContactInvalid = 3003,
    CourseNotFound = 3010,
    CourseAlreadyExists = 3011,
    BatchNotFound = 3020,
    BatchAlreadyExists = 3021,
    BatchTimeInvalid = 3022,

    StudentNotFound = 4000,
    StudentAlreadyExists = 4001,
    StudentPermissionDenied = 4002,
    StudentAssignmentInvalid = 4003,
    TopicNotFound = 4010,
    TopicAlreadyExists = 4011,
    ProgressNotFound = 4020,
    ProgressDateInvalid = 4021,

    AttendanceNotFound = 5000,
}
