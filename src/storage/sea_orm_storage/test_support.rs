//! 测试数据构造

use chrono::{NaiveDate, NaiveTime};

use super::SeaOrmStorage;
use crate::models::{
    batches::{entities::Batch, requests::AddBatchRequest},
    courses::entities::Course,
    staff::{entities::Staff, requests::CreateStaffRequest},
    students::{
        entities::{Student, StudentMode},
        requests::CreateStudentRequest,
    },
    topics::{entities::CourseTopic, requests::CreateTopicRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

pub(crate) async fn seed_user(storage: &SeaOrmStorage, username: &str) -> User {
    storage
        .create_user_impl(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role: UserRole::Staff,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_course(storage: &SeaOrmStorage, name: &str) -> Course {
    storage.create_course_impl(name).await.unwrap()
}

pub(crate) async fn seed_staff(storage: &SeaOrmStorage, name: &str, course_ids: &[i64]) -> Staff {
    let login = name.to_lowercase();
    let user = seed_user(storage, &login).await;
    storage
        .create_staff_impl(CreateStaffRequest {
            user_id: user.id,
            staff_name: name.to_string(),
            contact: String::new(),
            staff_email: format!("{login}@staff.example.com"),
            course_ids: course_ids.to_vec(),
        })
        .await
        .unwrap()
        .staff
}

pub(crate) async fn seed_batch(
    storage: &SeaOrmStorage,
    staff_id: i64,
    name: &str,
    start_hour: u32,
    end_hour: u32,
) -> Batch {
    storage
        .create_batch_impl(
            staff_id,
            AddBatchRequest {
                batch_name: name.to_string(),
                start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
            },
        )
        .await
        .unwrap()
}

pub(crate) async fn seed_student(
    storage: &SeaOrmStorage,
    name: &str,
    course_id: i64,
    staff_id: Option<i64>,
    batch_id: Option<i64>,
) -> Student {
    storage
        .create_student_impl(CreateStudentRequest {
            student_name: name.to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: None,
            course_id,
            staff_id,
            batch_id,
            student_email: format!("{}@student.example.com", name.to_lowercase()),
            student_contact: "9876543210".to_string(),
            mode: StudentMode::Offline,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_topic(
    storage: &SeaOrmStorage,
    course_id: i64,
    module: &str,
    topic: &str,
) -> CourseTopic {
    storage
        .create_topic_impl(CreateTopicRequest {
            course_id,
            module_name: module.to_string(),
            topic_name: topic.to_string(),
        })
        .await
        .unwrap()
}
