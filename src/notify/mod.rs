//! 邮件通知
//!
//! 只负责组装邮件并交给 [`Mailer`]。内置的 [`LogMailer`] 把邮件写入日志，
//! 接入真实投递时实现 `Mailer` 并注册到 `web::Data<Arc<dyn Mailer>>` 即可。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    batches::entities::Batch, staff::entities::Staff, students::entities::Student,
};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// 写日志的 Mailer，`mail.enabled = false` 时静默丢弃
pub struct LogMailer {
    enabled: bool,
}

impl LogMailer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.mail.enabled)
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        if !self.enabled {
            info!("Mail disabled, dropping '{}' to {}", mail.subject, mail.to);
            return Ok(());
        }
        info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            "Outgoing mail\n{}",
            mail.body
        );
        Ok(())
    }
}

/// 收件人：档案邮箱，其次账号邮箱
pub fn assignment_recipient(staff: &Staff, account_email: Option<&str>) -> Option<String> {
    [Some(staff.staff_email.as_str()), account_email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|email| !email.is_empty())
        .map(str::to_string)
}

pub fn student_assignment_email(
    student: &Student,
    course_name: &str,
    staff: &Staff,
    batch: Option<&Batch>,
) -> (String, String) {
    let subject = format!("New Student Assigned: {}", student.student_name);
    let batch = batch.map(Batch::display_name).unwrap_or_else(|| "-".to_string());
    let end_date = student
        .end_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());

    let body = format!(
        "Hello {staff},\n\n\
         A new student has been assigned to you.\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Contact: {contact}\n\
         Course: {course_name}\n\
         Batch: {batch}\n\
         Mode: {mode}\n\
         Join Date: {join}\n\
         End Date: {end_date}\n",
        staff = staff.staff_name,
        name = student.student_name,
        email = student.student_email,
        contact = student.student_contact,
        mode = student.mode,
        join = student.join_date,
    );
    (subject, body)
}

/// 组装并发送分配通知，任何失败只记日志
pub async fn notify_student_assignment(
    mailer: Arc<dyn Mailer>,
    storage: Arc<dyn Storage>,
    student: Student,
) {
    let Some(staff_id) = student.staff_id else {
        return;
    };

    let mail = match build_assignment_mail(storage.as_ref(), &student, staff_id).await {
        Ok(Some(mail)) => mail,
        Ok(None) => {
            warn!(
                "No recipient for assignment of student {} to staff {}",
                student.student_id, staff_id
            );
            return;
        }
        Err(e) => {
            warn!("Failed to compose assignment mail: {}", e);
            return;
        }
    };

    if let Err(e) = mailer.send(&mail).await {
        warn!("Failed to send assignment mail to {}: {}", mail.to, e);
    }
}

async fn build_assignment_mail(
    storage: &dyn Storage,
    student: &Student,
    staff_id: i64,
) -> Result<Option<OutgoingMail>> {
    let Some(staff) = storage.get_staff_by_id(staff_id).await? else {
        return Ok(None);
    };
    let staff = staff.staff;
    let account_email = storage
        .get_user_by_id(staff.user_id)
        .await?
        .map(|user| user.email);
    let Some(to) = assignment_recipient(&staff, account_email.as_deref()) else {
        return Ok(None);
    };

    let course_name = storage
        .get_course_by_id(student.course_id)
        .await?
        .map(|c| c.course_name)
        .unwrap_or_default();
    let batch = match student.batch_id {
        Some(id) => storage.get_batch_by_id(id).await?,
        None => None,
    };

    let (subject, body) = student_assignment_email(student, &course_name, &staff, batch.as_ref());
    Ok(Some(OutgoingMail {
        from: AppConfig::get().mail.from.clone(),
        to,
        subject,
        body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentMode;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Mutex;

    fn staff(email: &str) -> Staff {
        Staff {
            staff_id: 1,
            user_id: 1,
            staff_name: "Ravi".into(),
            contact: String::new(),
            staff_email: email.into(),
        }
    }

    fn student() -> Student {
        Student {
            student_id: 3,
            student_name: "Kiran".into(),
            join_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            course_id: 1,
            staff_id: Some(1),
            batch_id: None,
            student_email: "kiran@example.com".into(),
            student_contact: "9876543210".into(),
            mode: StudentMode::Online,
        }
    }

    #[test]
    fn test_recipient_fallback() {
        assert_eq!(
            assignment_recipient(&staff("ravi@inst.in"), Some("acct@inst.in")).as_deref(),
            Some("ravi@inst.in")
        );
        assert_eq!(
            assignment_recipient(&staff(" "), Some("acct@inst.in")).as_deref(),
            Some("acct@inst.in")
        );
        assert_eq!(assignment_recipient(&staff(""), None), None);
    }

    #[test]
    fn test_email_labels() {
        let (subject, body) = student_assignment_email(&student(), "Java", &staff("r@x.in"), None);
        assert_eq!(subject, "New Student Assigned: Kiran");
        assert!(body.contains("Email: kiran@example.com"));
        assert!(body.contains("Contact: 9876543210"));
        assert!(body.contains("Course: Java"));
        assert!(body.contains("Batch: -"));
        assert!(body.contains("Mode: Online"));
        assert!(body.contains("Join Date: 2024-06-01"));
        assert!(body.contains("End Date: -"));

        let batch = Batch {
            batch_id: 2,
            staff_id: 1,
            batch_name: "Morning".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        };
        let (_, body) =
            student_assignment_email(&student(), "Java", &staff("r@x.in"), Some(&batch));
        assert!(body.contains("Batch: Morning (09:00 AM - 11:00 AM)"));
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: &OutgoingMail) -> Result<()> {
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_uses_stored_staff() {
        use crate::storage::sea_orm_storage::SeaOrmStorage;
        use crate::storage::sea_orm_storage::test_support::{
            seed_course, seed_staff, seed_student,
        };

        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let kiran =
            seed_student(&storage, "Kiran", java.course_id, Some(ravi.staff_id), None).await;

        let mailer = Arc::new(RecordingMailer::default());
        notify_student_assignment(mailer.clone(), Arc::new(storage), kiran).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ravi@staff.example.com");
        assert!(sent[0].body.contains("Course: Java"));
    }
}
