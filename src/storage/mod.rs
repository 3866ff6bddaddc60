use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法（密码字段传入时已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取账号
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 教职工管理方法
    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<StaffWithCourses>;
    async fn get_staff_by_id(&self, staff_id: i64) -> Result<Option<StaffWithCourses>>;
    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<Staff>>;
    async fn list_staff_with_pagination(&self, query: StaffListQuery)
    -> Result<StaffListResponse>;
    async fn update_staff(
        &self,
        staff_id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<StaffWithCourses>>;
    async fn delete_staff(&self, staff_id: i64) -> Result<bool>;
    // 教授某课程的教职工，按姓名排序
    async fn list_staff_for_course(&self, course_id: i64) -> Result<Vec<Staff>>;
    async fn staff_teaches_course(&self, staff_id: i64, course_id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course_name: &str) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, course_id: i64, course_name: &str) -> Result<Option<Course>>;
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 批次管理方法
    async fn create_batch(&self, staff_id: i64, batch: AddBatchRequest) -> Result<Batch>;
    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>>;
    // 某教职工的全部批次，按开始时间排序
    async fn list_batches_for_staff(&self, staff_id: i64) -> Result<Vec<Batch>>;
    async fn list_batches_with_pagination(&self, query: BatchListQuery)
    -> Result<BatchListResponse>;
    async fn update_batch(&self, batch_id: i64, update: UpdateBatchRequest)
    -> Result<Option<Batch>>;
    async fn delete_batch(&self, batch_id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 某教职工名下、指定批次中的学生
    async fn list_students_in_batch(&self, staff_id: i64, batch_id: i64) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 课程知识点方法
    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<CourseTopic>;
    async fn get_topic_by_id(&self, topic_id: i64) -> Result<Option<CourseTopic>>;
    async fn list_topics_for_course(&self, course_id: i64) -> Result<Vec<CourseTopic>>;
    async fn list_topics_with_pagination(&self, query: TopicListQuery)
    -> Result<TopicListResponse>;
    async fn update_topic(
        &self,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<CourseTopic>>;
    async fn delete_topic(&self, topic_id: i64) -> Result<bool>;

    /// 知识点进度方法
    async fn list_progress_for_student(&self, student_id: i64) -> Result<Vec<TopicProgress>>;
    // 为课程每个知识点补齐进度行，按知识点 ID 返回
    async fn ensure_progress_rows(&self, student_id: i64, course_id: i64)
    -> Result<Vec<ProgressRow>>;
    // 事务内写入有变化的行，返回写入行数
    async fn update_progress_entries(
        &self,
        student_id: i64,
        entries: Vec<ProgressEntry>,
        sign: &str,
    ) -> Result<usize>;
    async fn list_progress_with_pagination(
        &self,
        query: ProgressListQuery,
    ) -> Result<ProgressListResponse>;

    /// 教职工考勤方法
    async fn list_staff_attendance_for_date(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<StaffAttendance>>;
    async fn create_staff_attendance(
        &self,
        staff_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        wifi_verified: bool,
    ) -> Result<StaffAttendance>;
    async fn list_staff_attendance_with_pagination(
        &self,
        query: StaffAttendanceListQuery,
    ) -> Result<StaffAttendanceListResponse>;
    async fn delete_staff_attendance(&self, id: i64) -> Result<bool>;

    /// 学生考勤方法
    async fn list_student_attendance_for_date(
        &self,
        student_ids: &[i64],
        date: NaiveDate,
    ) -> Result<Vec<StudentAttendance>>;
    // 已有记录时只改状态，保留原时间
    async fn upsert_student_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        status: bool,
    ) -> Result<StudentAttendance>;
    async fn list_student_attendance_with_pagination(
        &self,
        query: StudentAttendanceListQuery,
    ) -> Result<StudentAttendanceListResponse>;
    async fn delete_student_attendance(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
