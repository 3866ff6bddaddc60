use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::courses::entities::Course;

// 教职工档案，与登录账号一对一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct Staff {
    pub staff_id: i64,
    pub user_id: i64,
    pub staff_name: String,
    pub contact: String,
    pub staff_email: String,
}

// 带授课课程的教职工
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct StaffWithCourses {
    #[serde(flatten)]
    #[ts(flatten)]
    pub staff: Staff,
    pub courses: Vec<Course>,
}

// 级联下拉选项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct SelectOption {
    pub id: i64,
    pub name: String,
}
