use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
}

// 课程及其授课教职工姓名
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseWithStaff {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub staff_names: Vec<String>,
}
