//! TESDB - 培训机构教务记录后端
//!
//! 基于 Actix Web 与 SeaORM，管理教职工、课程、批次、学生、知识点进度与考勤。
//!
//! # 架构
//! - `cache`: 认证账号缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、角色与限流中间件
//! - `models`: 数据模型定义
//! - `notify`: 学生分配邮件通知
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod notify;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
