use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, page_params};
use crate::entity::prelude::{Batches, Courses, Staff as StaffEntity};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::{batches, courses, staff};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentWithNames},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 关联名称查找表
#[derive(Default)]
pub(super) struct NameLookup {
    pub courses: HashMap<i64, String>,
    pub staff: HashMap<i64, String>,
    pub batches: HashMap<i64, String>,
}

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            student_name: Set(req.student_name),
            join_date: Set(req.join_date),
            end_date: Set(req.end_date),
            course_id: Set(req.course_id),
            staff_id: Set(req.staff_id),
            batch_id: Set(req.batch_id),
            student_email: Set(req.student_email),
            student_contact: Set(req.student_contact),
            mode: Set(req.mode.as_flag()),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("创建学生失败", e))?;

        Ok(created.into_student())
    }

    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let found = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(found.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(staff_id) = query.staff_id {
            select = select.filter(Column::StaffId.eq(staff_id));
        }
        if let Some(batch_id) = query.batch_id {
            select = select.filter(Column::BatchId.eq(batch_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::StudentName.like(contains_pattern(search)))
                    .add(Column::StudentEmail.like(contains_pattern(search))),
            );
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_asc(Column::StudentName)
            .order_by_asc(Column::StudentId)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生列表失败: {e}")))?;

        let students: Vec<Student> = models.into_iter().map(|m| m.into_student()).collect();
        let lookup = self
            .name_lookup(
                students.iter().map(|s| s.course_id),
                students.iter().filter_map(|s| s.staff_id),
                students.iter().filter_map(|s| s.batch_id),
            )
            .await?;

        let items = students
            .into_iter()
            .map(|student| StudentWithNames {
                course_name: lookup
                    .courses
                    .get(&student.course_id)
                    .cloned()
                    .unwrap_or_default(),
                staff_name: student.staff_id.and_then(|id| lookup.staff.get(&id).cloned()),
                batch_name: student
                    .batch_id
                    .and_then(|id| lookup.batches.get(&id).cloned()),
                student,
            })
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_students_in_batch_impl(
        &self,
        staff_id: i64,
        batch_id: i64,
    ) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::StaffId.eq(staff_id))
            .filter(Column::BatchId.eq(batch_id))
            .order_by_asc(Column::StudentName)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询批次学生失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.student_name {
            model.student_name = Set(name);
        }
        if let Some(join_date) = update.join_date {
            model.join_date = Set(join_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(staff_id) = update.staff_id {
            model.staff_id = Set(staff_id);
        }
        if let Some(batch_id) = update.batch_id {
            model.batch_id = Set(batch_id);
        }
        if let Some(email) = update.student_email {
            model.student_email = Set(email);
        }
        if let Some(contact) = update.student_contact {
            model.student_contact = Set(contact);
        }
        if let Some(mode) = update.mode {
            model.mode = Set(mode.as_flag());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("更新学生失败", e))?;

        Ok(Some(updated.into_student()))
    }

    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let result = Students::delete_by_id(student_id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量读取课程名、教职工名与批次展示名
    pub(super) async fn name_lookup(
        &self,
        course_ids: impl IntoIterator<Item = i64>,
        staff_ids: impl IntoIterator<Item = i64>,
        batch_ids: impl IntoIterator<Item = i64>,
    ) -> Result<NameLookup> {
        let course_ids: BTreeSet<i64> = course_ids.into_iter().collect();
        let staff_ids: BTreeSet<i64> = staff_ids.into_iter().collect();
        let batch_ids: BTreeSet<i64> = batch_ids.into_iter().collect();
        let mut lookup = NameLookup::default();

        if !course_ids.is_empty() {
            let rows = Courses::find()
                .filter(courses::Column::CourseId.is_in(course_ids))
                .all(&self.db)
                .await
                .map_err(|e| TesdbError::database_operation(format!("查询课程失败: {e}")))?;
            lookup.courses = rows.into_iter().map(|c| (c.course_id, c.course_name)).collect();
        }

        if !staff_ids.is_empty() {
            let rows = StaffEntity::find()
                .filter(staff::Column::StaffId.is_in(staff_ids))
                .all(&self.db)
                .await
                .map_err(|e| TesdbError::database_operation(format!("查询教职工失败: {e}")))?;
            lookup.staff = rows.into_iter().map(|s| (s.staff_id, s.staff_name)).collect();
        }

        if !batch_ids.is_empty() {
            let rows = Batches::find()
                .filter(batches::Column::BatchId.is_in(batch_ids))
                .all(&self.db)
                .await
                .map_err(|e| TesdbError::database_operation(format!("查询批次失败: {e}")))?;
            lookup.batches = rows
                .into_iter()
                .map(|b| {
                    let batch = b.into_batch();
                    (batch.batch_id, batch.display_name())
                })
                .collect();
        }

        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::students::entities::StudentMode;
    use crate::models::students::requests::{StudentListQuery, UpdateStudentRequest};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{
        seed_batch, seed_course, seed_staff, seed_student,
    };

    #[tokio::test]
    async fn test_list_with_names_and_filters() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let staff = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let batch = seed_batch(&storage, staff.staff_id, "Morning", 9, 11).await;
        seed_student(
            &storage,
            "Kiran",
            java.course_id,
            Some(staff.staff_id),
            Some(batch.batch_id),
        )
        .await;
        seed_student(&storage, "Lata", java.course_id, None, None).await;

        let all = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: 1,
                size: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);
        let kiran = &all.items[0];
        assert_eq!(kiran.student.student_name, "Kiran");
        assert_eq!(kiran.course_name, "Java");
        assert_eq!(kiran.staff_name.as_deref(), Some("Ravi"));
        assert_eq!(
            kiran.batch_name.as_deref(),
            Some("Morning (09:00 AM - 11:00 AM)")
        );
        assert_eq!(all.items[1].staff_name, None);

        let in_batch = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: 1,
                size: 10,
                batch_id: Some(batch.batch_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_batch.items.len(), 1);
    }

    #[tokio::test]
    async fn test_staff_delete_sets_null() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let staff = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let batch = seed_batch(&storage, staff.staff_id, "Morning", 9, 11).await;
        let student = seed_student(
            &storage,
            "Kiran",
            java.course_id,
            Some(staff.staff_id),
            Some(batch.batch_id),
        )
        .await;

        storage.delete_staff_impl(staff.staff_id).await.unwrap();
        let reloaded = storage
            .get_student_by_id_impl(student.student_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.staff_id, None);
        assert_eq!(reloaded.batch_id, None);
    }

    #[tokio::test]
    async fn test_course_delete_cascades() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let student = seed_student(&storage, "Kiran", java.course_id, None, None).await;

        storage.delete_course_impl(java.course_id).await.unwrap();
        assert!(
            storage
                .get_student_by_id_impl(student.student_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_clears_and_sets() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let staff = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let batch = seed_batch(&storage, staff.staff_id, "Morning", 9, 11).await;
        let student = seed_student(
            &storage,
            "Kiran",
            java.course_id,
            Some(staff.staff_id),
            Some(batch.batch_id),
        )
        .await;

        let updated = storage
            .update_student_impl(
                student.student_id,
                UpdateStudentRequest {
                    batch_id: Some(None),
                    mode: Some(StudentMode::Online),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.batch_id, None);
        assert_eq!(updated.staff_id, Some(staff.staff_id));
        assert_eq!(updated.mode, StudentMode::Online);

        let in_batch = storage
            .list_students_in_batch_impl(staff.staff_id, batch.batch_id)
            .await
            .unwrap();
        assert!(in_batch.is_empty());
    }
}
