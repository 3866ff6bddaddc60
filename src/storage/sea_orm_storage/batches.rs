use super::{SeaOrmStorage, page_params};
use crate::entity::batches::{ActiveModel, Column, Entity as Batches};
use crate::entity::prelude::Staff as StaffEntity;
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    batches::{
        entities::{Batch, BatchWithStaff},
        requests::{AddBatchRequest, BatchListQuery, UpdateBatchRequest},
        responses::BatchListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_batch_impl(&self, staff_id: i64, req: AddBatchRequest) -> Result<Batch> {
        let model = ActiveModel {
            staff_id: Set(staff_id),
            batch_name: Set(req.batch_name),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("创建批次失败", e))?;

        Ok(created.into_batch())
    }

    pub async fn get_batch_by_id_impl(&self, batch_id: i64) -> Result<Option<Batch>> {
        let found = Batches::find_by_id(batch_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(found.map(|m| m.into_batch()))
    }

    pub async fn list_batches_for_staff_impl(&self, staff_id: i64) -> Result<Vec<Batch>> {
        let models = Batches::find()
            .filter(Column::StaffId.eq(staff_id))
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::BatchName)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_batch()).collect())
    }

    pub async fn list_batches_with_pagination_impl(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        let mut select = Batches::find();

        if let Some(staff_id) = query.staff_id {
            select = select.filter(Column::StaffId.eq(staff_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::BatchName.like(contains_pattern(search)));
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .find_also_related(StaffEntity)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::BatchId)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次总数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .map(|(batch, owner)| {
                let batch = batch.into_batch();
                BatchWithStaff {
                    display_name: batch.display_name(),
                    staff_name: owner.map(|s| s.staff_name).unwrap_or_default(),
                    batch,
                }
            })
            .collect();

        Ok(BatchListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 调用方负责在合并新旧值后校验时间顺序
    pub async fn update_batch_impl(
        &self,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        let Some(existing) = Batches::find_by_id(batch_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(staff_id) = update.staff_id {
            model.staff_id = Set(staff_id);
        }
        if let Some(name) = update.batch_name {
            model.batch_name = Set(name);
        }
        if let Some(start) = update.start_time {
            model.start_time = Set(start);
        }
        if let Some(end) = update.end_time {
            model.end_time = Set(end);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("更新批次失败", e))?;

        Ok(Some(updated.into_batch()))
    }

    pub async fn delete_batch_impl(&self, batch_id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(batch_id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use crate::models::batches::requests::{AddBatchRequest, BatchListQuery};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::seed_staff;

    fn add(name: &str, start: (u32, u32), end: (u32, u32)) -> AddBatchRequest {
        AddBatchRequest {
            batch_name: name.to_string(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_batches_ordered_by_start_time() {
        let storage = SeaOrmStorage::in_memory().await;
        let staff = seed_staff(&storage, "Ravi", &[]).await;
        storage
            .create_batch_impl(staff.staff_id, add("Evening", (18, 0), (19, 0)))
            .await
            .unwrap();
        storage
            .create_batch_impl(staff.staff_id, add("Morning", (9, 0), (10, 30)))
            .await
            .unwrap();

        let batches = storage
            .list_batches_for_staff_impl(staff.staff_id)
            .await
            .unwrap();
        let names: Vec<_> = batches.iter().map(|b| b.batch_name.as_str()).collect();
        assert_eq!(names, vec!["Morning", "Evening"]);
        assert_eq!(batches[0].display_name(), "Morning (09:00 AM - 10:30 AM)");
    }

    #[tokio::test]
    async fn test_batch_name_unique_per_staff() {
        let storage = SeaOrmStorage::in_memory().await;
        let ravi = seed_staff(&storage, "Ravi", &[]).await;
        let anu = seed_staff(&storage, "Anu", &[]).await;

        storage
            .create_batch_impl(ravi.staff_id, add("Morning", (9, 0), (10, 0)))
            .await
            .unwrap();
        let err = storage
            .create_batch_impl(ravi.staff_id, add("Morning", (11, 0), (12, 0)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");

        // 不同教职工可以同名
        storage
            .create_batch_impl(anu.staff_id, add("Morning", (9, 0), (10, 0)))
            .await
            .unwrap();

        let list = storage
            .list_batches_with_pagination_impl(BatchListQuery {
                page: 1,
                size: 10,
                staff_id: Some(anu.staff_id),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].staff_name, "Anu");
    }

    #[tokio::test]
    async fn test_batches_removed_with_staff() {
        let storage = SeaOrmStorage::in_memory().await;
        let staff = seed_staff(&storage, "Ravi", &[]).await;
        let batch = storage
            .create_batch_impl(staff.staff_id, add("Morning", (9, 0), (10, 0)))
            .await
            .unwrap();

        assert!(storage.delete_staff_impl(staff.staff_id).await.unwrap());
        assert!(
            storage
                .get_batch_by_id_impl(batch.batch_id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
