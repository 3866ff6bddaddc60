use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, page_params};
use crate::entity::prelude::{CourseTopics, Students};
use crate::entity::student_topic_progress::{ActiveModel, Column, Entity as Progress, Relation};
use crate::entity::{course_topics, students};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    progress::{
        entities::{ProgressListItem, ProgressRow, TopicProgress},
        requests::{ProgressEntry, ProgressListQuery},
        responses::ProgressListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn list_progress_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<TopicProgress>> {
        let models = Progress::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::TopicId)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生进度失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_progress()).collect())
    }

    /// 补齐缺失的进度行后返回当前课程的进度表
    pub async fn ensure_progress_rows_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<ProgressRow>> {
        let topics = self.list_topics_for_course_impl(course_id).await?;
        let existing: HashSet<i64> = self
            .list_progress_for_student_impl(student_id)
            .await?
            .into_iter()
            .map(|p| p.topic_id)
            .collect();

        let missing: Vec<ActiveModel> = topics
            .iter()
            .filter(|t| !existing.contains(&t.topic_id))
            .map(|t| ActiveModel {
                student_id: Set(student_id),
                topic_id: Set(t.topic_id),
                start_date: Set(None),
                end_date: Set(None),
                marks: Set(None),
                sign: Set(String::new()),
                ..Default::default()
            })
            .collect();

        if !missing.is_empty() {
            let created = missing.len();
            Progress::insert_many(missing)
                .on_conflict(
                    OnConflict::columns([Column::StudentId, Column::TopicId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| TesdbError::database_operation(format!("创建进度行失败: {e}")))?;
            tracing::debug!("Created {} progress rows for student {}", created, student_id);
        }

        let rows = Progress::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(CourseTopics)
            .filter(course_topics::Column::CourseId.eq(course_id))
            .order_by_asc(Column::TopicId)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询进度表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(progress, topic)| {
                topic.map(|t| ProgressRow {
                    progress: progress.into_progress(),
                    module_name: t.module_name,
                    topic_name: t.topic_name,
                })
            })
            .collect())
    }

    /// 只写入值有变化的行，`sign` 记录修改人；任一行不属于该学生则整体失败
    pub async fn update_progress_entries_impl(
        &self,
        student_id: i64,
        entries: Vec<ProgressEntry>,
        sign: &str,
    ) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TesdbError::database_operation(format!("开启事务失败: {e}")))?;

        let ids: Vec<i64> = entries.iter().map(|e| e.progress_id).collect();
        let current: HashMap<i64, _> = Progress::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Id.is_in(ids))
            .all(&txn)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询进度行失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut written = 0;
        for entry in entries {
            let Some(model) = current.get(&entry.progress_id) else {
                return Err(TesdbError::not_found(format!(
                    "Progress row {} does not belong to student {}",
                    entry.progress_id, student_id
                )));
            };

            let snapshot = model.clone().into_progress();
            if !snapshot.differs_from(entry.start_date, entry.end_date, entry.marks) {
                continue;
            }

            let mut active: ActiveModel = model.clone().into();
            active.start_date = Set(entry.start_date);
            active.end_date = Set(entry.end_date);
            active.marks = Set(entry.marks);
            active.sign = Set(sign.to_string());
            active
                .update(&txn)
                .await
                .map_err(|e| TesdbError::from_db("更新进度失败", e))?;
            written += 1;
        }

        txn.commit()
            .await
            .map_err(|e| TesdbError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(written)
    }

    pub async fn list_progress_with_pagination_impl(
        &self,
        query: ProgressListQuery,
    ) -> Result<ProgressListResponse> {
        let mut select = Progress::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .join(JoinType::InnerJoin, Relation::Topic.def());

        if let Some(course_id) = query.course_id {
            select = select.filter(course_topics::Column::CourseId.eq(course_id));
        }
        if let Some(ref module) = query.module_name
            && !module.trim().is_empty()
        {
            select = select.filter(course_topics::Column::ModuleName.eq(module.trim()));
        }
        if let Some(staff_id) = query.staff_id {
            select = select.filter(students::Column::StaffId.eq(staff_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(students::Column::StudentName.like(contains_pattern(search)))
                    .add(course_topics::Column::TopicName.like(contains_pattern(search)))
                    .add(Column::Sign.like(contains_pattern(search))),
            );
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_asc(students::Column::StudentName)
            .order_by_asc(Column::TopicId)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询进度总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询进度列表失败: {e}")))?;

        let student_ids: HashSet<i64> = models.iter().map(|m| m.student_id).collect();
        let topic_ids: HashSet<i64> = models.iter().map(|m| m.topic_id).collect();

        let student_rows: HashMap<i64, students::Model> = Students::find()
            .filter(students::Column::StudentId.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.student_id, s))
            .collect();
        let topic_rows: HashMap<i64, course_topics::Model> = CourseTopics::find()
            .filter(course_topics::Column::TopicId.is_in(topic_ids))
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询知识点失败: {e}")))?
            .into_iter()
            .map(|t| (t.topic_id, t))
            .collect();

        let lookup = self
            .name_lookup(
                topic_rows.values().map(|t| t.course_id),
                student_rows.values().filter_map(|s| s.staff_id),
                std::iter::empty(),
            )
            .await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                let student = student_rows.get(&m.student_id)?;
                let topic = topic_rows.get(&m.topic_id)?;
                Some(ProgressListItem {
                    student_name: student.student_name.clone(),
                    staff_name: student.staff_id.and_then(|id| lookup.staff.get(&id).cloned()),
                    course_name: lookup
                        .courses
                        .get(&topic.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    module_name: topic.module_name.clone(),
                    topic_name: topic.topic_name.clone(),
                    progress: m.into_progress(),
                })
            })
            .collect();

        Ok(ProgressListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::progress::requests::{ProgressEntry, ProgressListQuery};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{
        seed_course, seed_staff, seed_student, seed_topic,
    };

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 4, d)
    }

    #[tokio::test]
    async fn test_ensure_rows_is_idempotent() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let t1 = seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        let t2 = seed_topic(&storage, java.course_id, "Basics", "Loops").await;
        let student = seed_student(&storage, "Kiran", java.course_id, None, None).await;

        let first = storage
            .ensure_progress_rows_impl(student.student_id, java.course_id)
            .await
            .unwrap();
        let second = storage
            .ensure_progress_rows_impl(student.student_id, java.course_id)
            .await
            .unwrap();

        let topic_ids: Vec<_> = first.iter().map(|r| r.progress.topic_id).collect();
        assert_eq!(topic_ids, vec![t1.topic_id, t2.topic_id]);
        assert_eq!(second.len(), 2);
        assert_eq!(first[0].progress.id, second[0].progress.id);
        assert_eq!(first[1].topic_name, "Loops");
    }

    #[tokio::test]
    async fn test_update_signs_only_changed_rows() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        seed_topic(&storage, java.course_id, "Basics", "Loops").await;
        let student = seed_student(&storage, "Kiran", java.course_id, None, None).await;
        let rows = storage
            .ensure_progress_rows_impl(student.student_id, java.course_id)
            .await
            .unwrap();

        let entries = vec![
            ProgressEntry {
                progress_id: rows[0].progress.id,
                start_date: day(1),
                end_date: day(5),
                marks: Some(8),
            },
            ProgressEntry {
                progress_id: rows[1].progress.id,
                start_date: None,
                end_date: None,
                marks: None,
            },
        ];
        let written = storage
            .update_progress_entries_impl(student.student_id, entries, "Ravi")
            .await
            .unwrap();
        assert_eq!(written, 1);

        let after = storage
            .list_progress_for_student_impl(student.student_id)
            .await
            .unwrap();
        assert_eq!(after[0].sign, "Ravi");
        assert_eq!(after[0].marks, Some(8));
        assert_eq!(after[1].sign, "");
    }

    #[tokio::test]
    async fn test_foreign_row_rejects_whole_batch() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        let a = seed_student(&storage, "Kiran", java.course_id, None, None).await;
        let b = seed_student(&storage, "Lata", java.course_id, None, None).await;
        let rows_a = storage
            .ensure_progress_rows_impl(a.student_id, java.course_id)
            .await
            .unwrap();
        let rows_b = storage
            .ensure_progress_rows_impl(b.student_id, java.course_id)
            .await
            .unwrap();

        let entries = vec![
            ProgressEntry {
                progress_id: rows_a[0].progress.id,
                start_date: day(1),
                end_date: None,
                marks: None,
            },
            ProgressEntry {
                progress_id: rows_b[0].progress.id,
                start_date: day(1),
                end_date: None,
                marks: None,
            },
        ];
        let err = storage
            .update_progress_entries_impl(a.student_id, entries, "Ravi")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let untouched = storage
            .list_progress_for_student_impl(a.student_id)
            .await
            .unwrap();
        assert_eq!(untouched[0].start_date, None);
    }

    #[tokio::test]
    async fn test_admin_list_with_names() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let staff = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        let student =
            seed_student(&storage, "Kiran", java.course_id, Some(staff.staff_id), None).await;
        storage
            .ensure_progress_rows_impl(student.student_id, java.course_id)
            .await
            .unwrap();

        let list = storage
            .list_progress_with_pagination_impl(ProgressListQuery {
                page: 1,
                size: 10,
                staff_id: Some(staff.staff_id),
                search: Some("vari".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);
        let item = &list.items[0];
        assert_eq!(item.student_name, "Kiran");
        assert_eq!(item.staff_name.as_deref(), Some("Ravi"));
        assert_eq!(item.course_name, "Java");
        assert_eq!(item.topic_name, "Variables");
    }
}
