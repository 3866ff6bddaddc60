//! 登录时的教职工打卡

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::errors::{Result, TesdbError};
use crate::models::attendance::entities::AttendanceOutcome;
use crate::storage::Storage;

/// 按当天已有记录决定是否写入新记录。
/// 并发登录导致的唯一冲突视为记录已存在。
pub async fn mark_staff_attendance(
    storage: &dyn Storage,
    staff_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    wifi_verified: bool,
) -> Result<AttendanceOutcome> {
    let records = storage.list_staff_attendance_for_date(staff_id, date).await?;
    let verified_exists = records.iter().any(|r| r.wifi_verified);
    let unverified_exists = records.iter().any(|r| !r.wifi_verified);

    let mut outcome = AttendanceOutcome::decide(verified_exists, unverified_exists, wifi_verified);

    if let Some(verified) = outcome.record_to_create() {
        match storage
            .create_staff_attendance(staff_id, date, time, verified)
            .await
        {
            Ok(_) => {}
            Err(TesdbError::Conflict(_)) => {
                outcome = if verified {
                    AttendanceOutcome::AlreadyVerified
                } else {
                    AttendanceOutcome::AlreadyUnverified
                };
            }
            Err(e) => return Err(e),
        }
    }

    match outcome {
        AttendanceOutcome::AlreadyVerified => {
            info!("Staff {} already has WiFi-verified attendance on {}", staff_id, date)
        }
        AttendanceOutcome::MarkedVerified => {
            info!("Staff {} marked present (WiFi verified) on {}", staff_id, date)
        }
        AttendanceOutcome::MarkedUnverified => {
            info!("Staff {} marked present (not on WiFi) on {}", staff_id, date)
        }
        AttendanceOutcome::AlreadyUnverified => {
            info!("Staff {} already has unverified attendance on {}", staff_id, date)
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_staff};

    #[tokio::test]
    async fn test_login_sequence_over_one_day() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();

        let steps = [
            (at(9), false, AttendanceOutcome::MarkedUnverified),
            (at(10), false, AttendanceOutcome::AlreadyUnverified),
            (at(11), true, AttendanceOutcome::MarkedVerified),
            (at(12), true, AttendanceOutcome::AlreadyVerified),
            (at(13), false, AttendanceOutcome::AlreadyVerified),
        ];
        for (time, wifi, expected) in steps {
            let outcome = mark_staff_attendance(&storage, ravi.staff_id, day, time, wifi)
                .await
                .unwrap();
            assert_eq!(outcome, expected, "login at {time} (wifi: {wifi})");
        }

        let records = storage
            .list_staff_attendance_for_date(ravi.staff_id, day)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].wifi_verified);
        assert!(records[1].wifi_verified);
    }

    #[tokio::test]
    async fn test_next_day_starts_fresh() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        for day in [2, 3] {
            let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
            let outcome = mark_staff_attendance(&storage, ravi.staff_id, date, nine, true)
                .await
                .unwrap();
            assert_eq!(outcome, AttendanceOutcome::MarkedVerified);
        }
    }
}
