use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct CourseTopic {
    pub topic_id: i64,
    pub course_id: i64,
    pub module_name: String,
    pub topic_name: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct CourseTopicWithCourse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub topic: CourseTopic,
    pub course_name: String,
}
