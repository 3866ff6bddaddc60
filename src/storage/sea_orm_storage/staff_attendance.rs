use chrono::{NaiveDate, NaiveTime};

use super::{SeaOrmStorage, page_params};
use crate::entity::prelude::Staff as StaffEntity;
use crate::entity::staff;
use crate::entity::staff_attendance::{ActiveModel, Column, Entity as StaffAttendanceEntity};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{StaffAttendance, StaffAttendanceItem},
        requests::StaffAttendanceListQuery,
        responses::StaffAttendanceListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_staff_attendance_for_date_impl(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<StaffAttendance>> {
        let models = StaffAttendanceEntity::find()
            .filter(Column::StaffId.eq(staff_id))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::Time)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_staff_attendance()).collect())
    }

    /// (staff_id, date, wifi_verified) 唯一，重复写入返回 Conflict
    pub async fn create_staff_attendance_impl(
        &self,
        staff_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        wifi_verified: bool,
    ) -> Result<StaffAttendance> {
        let model = ActiveModel {
            staff_id: Set(staff_id),
            date: Set(date),
            time: Set(time),
            wifi_verified: Set(wifi_verified),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("写入考勤记录失败", e))?;

        Ok(created.into_staff_attendance())
    }

    pub async fn list_staff_attendance_with_pagination_impl(
        &self,
        query: StaffAttendanceListQuery,
    ) -> Result<StaffAttendanceListResponse> {
        let mut select = StaffAttendanceEntity::find().find_also_related(StaffEntity);

        if let Some(staff_id) = query.staff_id {
            select = select.filter(Column::StaffId.eq(staff_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(verified) = query.wifi_verified {
            select = select.filter(Column::WifiVerified.eq(verified));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(staff::Column::StaffName.like(contains_pattern(search)));
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Time)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询考勤总数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询考勤列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .map(|(record, member)| StaffAttendanceItem {
                record: record.into_staff_attendance(),
                staff_name: member.map(|s| s.staff_name).unwrap_or_default(),
            })
            .collect();

        Ok(StaffAttendanceListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn delete_staff_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = StaffAttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除考勤记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::attendance::requests::StaffAttendanceListQuery;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::seed_staff;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_one_record_per_verification_state() {
        let storage = SeaOrmStorage::in_memory().await;
        let staff = seed_staff(&storage, "Ravi", &[]).await;

        storage
            .create_staff_attendance_impl(staff.staff_id, date(), at(9), false)
            .await
            .unwrap();
        storage
            .create_staff_attendance_impl(staff.staff_id, date(), at(10), true)
            .await
            .unwrap();
        let err = storage
            .create_staff_attendance_impl(staff.staff_id, date(), at(11), false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");

        let records = storage
            .list_staff_attendance_for_date_impl(staff.staff_id, date())
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].wifi_verified);
        assert!(records[1].wifi_verified);
    }

    #[tokio::test]
    async fn test_admin_list_filters_and_delete() {
        let storage = SeaOrmStorage::in_memory().await;
        let ravi = seed_staff(&storage, "Ravi", &[]).await;
        let anu = seed_staff(&storage, "Anu", &[]).await;
        let kept = storage
            .create_staff_attendance_impl(ravi.staff_id, date(), at(9), true)
            .await
            .unwrap();
        storage
            .create_staff_attendance_impl(anu.staff_id, date(), at(9), false)
            .await
            .unwrap();

        let verified = storage
            .list_staff_attendance_with_pagination_impl(StaffAttendanceListQuery {
                page: 1,
                size: 10,
                wifi_verified: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(verified.pagination.total, 1);
        assert_eq!(verified.items[0].staff_name, "Ravi");

        let searched = storage
            .list_staff_attendance_with_pagination_impl(StaffAttendanceListQuery {
                page: 1,
                size: 10,
                search: Some("an".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].record.staff_id, anu.staff_id);

        assert!(storage.delete_staff_attendance_impl(kept.id).await.unwrap());
        assert!(!storage.delete_staff_attendance_impl(kept.id).await.unwrap());
    }
}
