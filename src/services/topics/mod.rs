pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::topics::requests::{CreateTopicRequest, TopicListParams, UpdateTopicRequest};
use crate::storage::Storage;
use crate::utils::validate::capitalize;

/// 课程知识点（模块 + 知识点名）
pub struct TopicService {
    storage: Option<Arc<dyn Storage>>,
}

impl TopicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_storage(request),
        }
    }

    pub async fn list_topics(
        &self,
        query: TopicListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_topics(self, query, request).await
    }

    pub async fn create_topic(
        &self,
        data: CreateTopicRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_topic(self, data, request).await
    }

    pub async fn get_topic(
        &self,
        topic_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_topic(self, topic_id, request).await
    }

    pub async fn update_topic(
        &self,
        topic_id: i64,
        data: UpdateTopicRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_topic(self, topic_id, data, request).await
    }

    pub async fn delete_topic(
        &self,
        topic_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_topic(self, topic_id, request).await
    }
}

fn normalize_part(raw: &str, label: &'static str) -> Result<String, String> {
    let value = capitalize(raw);
    if value.is_empty() || value.chars().count() > 100 {
        return Err(format!("{label} must be between 1 and 100 characters"));
    }
    Ok(value)
}

pub(crate) fn normalize_module(raw: &str) -> Result<String, String> {
    normalize_part(raw, "Module name")
}

pub(crate) fn normalize_topic(raw: &str) -> Result<String, String> {
    normalize_part(raw, "Topic name")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_parts() {
        assert_eq!(normalize_module(" core JAVA ").unwrap(), "Core java");
        assert_eq!(normalize_topic("loops").unwrap(), "Loops");
        assert!(normalize_topic("").unwrap_err().starts_with("Topic name"));
    }
}
