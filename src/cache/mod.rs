//! 缓存层
//!
//! 目前只有进程内 moka 实现，用于缓存已认证用户，避免每个请求都查库。

pub mod object_cache;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 已认证用户的缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

pub fn create_cache(config: &AppConfig) -> Arc<dyn ObjectCache> {
    Arc::new(object_cache::moka::MokaCacheWrapper::new(
        config.cache.max_capacity,
        config.cache.default_ttl,
    ))
}
