use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, query};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct TopicListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "query::optional_i64")]
    pub course_id: Option<i64>,
    pub module_name: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct CreateTopicRequest {
    pub course_id: i64,
    pub module_name: String,
    pub topic_name: String,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "topic.ts")]
pub struct UpdateTopicRequest {
    pub course_id: Option<i64>,
    pub module_name: Option<String>,
    pub topic_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub module_name: Option<String>,
    pub search: Option<String>,
}

impl From<TopicListParams> for TopicListQuery {
    fn from(params: TopicListParams) -> Self {
        let (page, size) = params.pagination.clamped();
        Self {
            page,
            size,
            course_id: params.course_id,
            module_name: params.module_name,
            search: params.search,
        }
    }
}
