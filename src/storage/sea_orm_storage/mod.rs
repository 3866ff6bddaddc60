//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod batches;
mod courses;
mod progress;
mod staff;
mod staff_attendance;
mod student_attendance;
mod students;
mod topics;
mod users;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::AppConfig;
use crate::errors::{TesdbError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// 分页参数兜底：页码从 1 开始，每页 1..=100
fn page_params(page: u64, size: u64) -> (u64, u64) {
    (page.max(1), size.clamp(1, 100))
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TesdbError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 测试用内存数据库，已执行迁移
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        // 内存库每个连接独立，必须只用一个连接
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TesdbError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TesdbError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TesdbError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TesdbError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


// Storage trait 实现
use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    attendance::{
        entities::{StaffAttendance, StudentAttendance},
        requests::{StaffAttendanceListQuery, StudentAttendanceListQuery},
        responses::{StaffAttendanceListResponse, StudentAttendanceListResponse},
    },
    batches::{
        entities::Batch,
        requests::{AddBatchRequest, BatchListQuery, UpdateBatchRequest},
        responses::BatchListResponse,
    },
    courses::{entities::Course, requests::CourseListQuery, responses::CourseListResponse},
    progress::{
        entities::{ProgressRow, TopicProgress},
        requests::{ProgressEntry, ProgressListQuery},
        responses::ProgressListResponse,
    },
    staff::{
        entities::{Staff, StaffWithCourses},
        requests::{CreateStaffRequest, StaffListQuery, UpdateStaffRequest},
        responses::StaffListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    topics::{
        entities::CourseTopic,
        requests::{CreateTopicRequest, TopicListQuery, UpdateTopicRequest},
        responses::TopicListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<StaffWithCourses> {
        self.create_staff_impl(staff).await
    }

    async fn get_staff_by_id(&self, staff_id: i64) -> Result<Option<StaffWithCourses>> {
        self.get_staff_by_id_impl(staff_id).await
    }

    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<Staff>> {
        self.get_staff_by_user_id_impl(user_id).await
    }

    async fn list_staff_with_pagination(&self, query: StaffListQuery) -> Result<StaffListResponse> {
        self.list_staff_with_pagination_impl(query).await
    }

    async fn update_staff(
        &self,
        staff_id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<StaffWithCourses>> {
        self.update_staff_impl(staff_id, update).await
    }

    async fn delete_staff(&self, staff_id: i64) -> Result<bool> {
        self.delete_staff_impl(staff_id).await
    }

    async fn list_staff_for_course(&self, course_id: i64) -> Result<Vec<Staff>> {
        self.list_staff_for_course_impl(course_id).await
    }

    async fn staff_teaches_course(&self, staff_id: i64, course_id: i64) -> Result<bool> {
        self.staff_teaches_course_impl(staff_id, course_id).await
    }

    async fn create_course(&self, course_name: &str) -> Result<Course> {
        self.create_course_impl(course_name).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, course_id: i64, course_name: &str) -> Result<Option<Course>> {
        self.update_course_impl(course_id, course_name).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn create_batch(&self, staff_id: i64, batch: AddBatchRequest) -> Result<Batch> {
        self.create_batch_impl(staff_id, batch).await
    }

    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(batch_id).await
    }

    async fn list_batches_for_staff(&self, staff_id: i64) -> Result<Vec<Batch>> {
        self.list_batches_for_staff_impl(staff_id).await
    }

    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        self.list_batches_with_pagination_impl(query).await
    }

    async fn update_batch(
        &self,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        self.update_batch_impl(batch_id, update).await
    }

    async fn delete_batch(&self, batch_id: i64) -> Result<bool> {
        self.delete_batch_impl(batch_id).await
    }

    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_in_batch(&self, staff_id: i64, batch_id: i64) -> Result<Vec<Student>> {
        self.list_students_in_batch_impl(staff_id, batch_id).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<CourseTopic> {
        self.create_topic_impl(topic).await
    }

    async fn get_topic_by_id(&self, topic_id: i64) -> Result<Option<CourseTopic>> {
        self.get_topic_by_id_impl(topic_id).await
    }

    async fn list_topics_for_course(&self, course_id: i64) -> Result<Vec<CourseTopic>> {
        self.list_topics_for_course_impl(course_id).await
    }

    async fn list_topics_with_pagination(
        &self,
        query: TopicListQuery,
    ) -> Result<TopicListResponse> {
        self.list_topics_with_pagination_impl(query).await
    }

    async fn update_topic(
        &self,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<CourseTopic>> {
        self.update_topic_impl(topic_id, update).await
    }

    async fn delete_topic(&self, topic_id: i64) -> Result<bool> {
        self.delete_topic_impl(topic_id).await
    }

    async fn list_progress_for_student(&self, student_id: i64) -> Result<Vec<TopicProgress>> {
        self.list_progress_for_student_impl(student_id).await
    }

    async fn ensure_progress_rows(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<ProgressRow>> {
        self.ensure_progress_rows_impl(student_id, course_id).await
    }

    async fn update_progress_entries(
        &self,
        student_id: i64,
        entries: Vec<ProgressEntry>,
        sign: &str,
    ) -> Result<usize> {
        self.update_progress_entries_impl(student_id, entries, sign).await
    }

    async fn list_progress_with_pagination(
        &self,
        query: ProgressListQuery,
    ) -> Result<ProgressListResponse> {
        self.list_progress_with_pagination_impl(query).await
    }

    async fn list_staff_attendance_for_date(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<StaffAttendance>> {
        self.list_staff_attendance_for_date_impl(staff_id, date).await
    }

    async fn create_staff_attendance(
        &self,
        staff_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        wifi_verified: bool,
    ) -> Result<StaffAttendance> {
        self.create_staff_attendance_impl(staff_id, date, time, wifi_verified).await
    }

    async fn list_staff_attendance_with_pagination(
        &self,
        query: StaffAttendanceListQuery,
    ) -> Result<StaffAttendanceListResponse> {
        self.list_staff_attendance_with_pagination_impl(query).await
    }

    async fn delete_staff_attendance(&self, id: i64) -> Result<bool> {
        self.delete_staff_attendance_impl(id).await
    }

    async fn list_student_attendance_for_date(
        &self,
        student_ids: &[i64],
        date: NaiveDate,
    ) -> Result<Vec<StudentAttendance>> {
        self.list_student_attendance_for_date_impl(student_ids, date).await
    }

    async fn upsert_student_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        status: bool,
    ) -> Result<StudentAttendance> {
        self.upsert_student_attendance_impl(student_id, date, time, status).await
    }

    async fn list_student_attendance_with_pagination(
        &self,
        query: StudentAttendanceListQuery,
    ) -> Result<StudentAttendanceListResponse> {
        self.list_student_attendance_with_pagination_impl(query).await
    }

    async fn delete_student_attendance(&self, id: i64) -> Result<bool> {
        self.delete_student_attendance_impl(id).await
    }
}
