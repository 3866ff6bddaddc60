use super::entities::CourseTopicWithCourse;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct TopicListResponse {
    pub items: Vec<CourseTopicWithCourse>,
    pub pagination: PaginationInfo,
}
