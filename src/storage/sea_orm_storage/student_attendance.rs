use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};

use super::{SeaOrmStorage, page_params};
use crate::entity::prelude::Students;
use crate::entity::student_attendance::{ActiveModel, Column, Entity as StudentAttendanceEntity};
use crate::entity::{courses, staff, student_attendance, students};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{StudentAttendance, StudentAttendanceItem},
        requests::StudentAttendanceListQuery,
        responses::StudentAttendanceListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    pub async fn list_student_attendance_for_date_impl(
        &self,
        student_ids: &[i64],
        date: NaiveDate,
    ) -> Result<Vec<StudentAttendance>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StudentAttendanceEntity::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(Column::Date.eq(date))
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生考勤失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_student_attendance())
            .collect())
    }

    async fn find_student_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<student_attendance::Model>> {
        StudentAttendanceEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生考勤失败: {e}")))
    }

    async fn set_student_attendance_status(
        &self,
        existing: student_attendance::Model,
        status: bool,
    ) -> Result<StudentAttendance> {
        let mut model: ActiveModel = existing.into();
        model.status = Set(Some(status));
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("更新学生考勤失败", e))?;
        Ok(updated.into_student_attendance())
    }

    /// 每人每天一条，已有记录只改状态
    pub async fn upsert_student_attendance_impl(
        &self,
        student_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        status: bool,
    ) -> Result<StudentAttendance> {
        if let Some(existing) = self.find_student_attendance(student_id, date).await? {
            return self.set_student_attendance_status(existing, status).await;
        }

        let model = ActiveModel {
            student_id: Set(student_id),
            date: Set(date),
            time: Set(time),
            status: Set(Some(status)),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created.into_student_attendance()),
            Err(e) => match TesdbError::from_db("写入学生考勤失败", e) {
                // 并发写入同一天，改为更新
                TesdbError::Conflict(_) => {
                    let existing = self
                        .find_student_attendance(student_id, date)
                        .await?
                        .ok_or_else(|| TesdbError::not_found("学生考勤记录不存在"))?;
                    self.set_student_attendance_status(existing, status).await
                }
                other => Err(other),
            },
        }
    }

    pub async fn list_student_attendance_with_pagination_impl(
        &self,
        query: StudentAttendanceListQuery,
    ) -> Result<StudentAttendanceListResponse> {
        let mut select = StudentAttendanceEntity::find()
            .join(
                JoinType::InnerJoin,
                student_attendance::Relation::Student.def(),
            )
            .join(JoinType::InnerJoin, students::Relation::Course.def())
            .join(JoinType::LeftJoin, students::Relation::Staff.def());

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(students::Column::CourseId.eq(course_id));
        }
        if let Some(staff_id) = query.staff_id {
            select = select.filter(students::Column::StaffId.eq(staff_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(students::Column::StudentName.like(contains_pattern(search)))
                    .add(staff::Column::StaffName.like(contains_pattern(search)))
                    .add(courses::Column::CourseName.like(contains_pattern(search))),
            );
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_desc(Column::Date)
            .order_by_asc(students::Column::StudentName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生考勤总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生考勤列表失败: {e}")))?;

        let student_ids: HashSet<i64> = models.iter().map(|m| m.student_id).collect();
        let student_rows: HashMap<i64, students::Model> = Students::find()
            .filter(students::Column::StudentId.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.student_id, s))
            .collect();

        let lookup = self
            .name_lookup(
                student_rows.values().map(|s| s.course_id),
                student_rows.values().filter_map(|s| s.staff_id),
                std::iter::empty(),
            )
            .await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                let student = student_rows.get(&m.student_id)?;
                Some(StudentAttendanceItem {
                    student_name: student.student_name.clone(),
                    course_name: lookup
                        .courses
                        .get(&student.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    staff_name: student.staff_id.and_then(|id| lookup.staff.get(&id).cloned()),
                    record: m.into_student_attendance(),
                })
            })
            .collect();

        Ok(StudentAttendanceListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn delete_student_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = StudentAttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除学生考勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::attendance::requests::StudentAttendanceListQuery;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_staff, seed_student};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_keeps_first_time() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let student = seed_student(&storage, "Kiran", java.course_id, None, None).await;

        let first = storage
            .upsert_student_attendance_impl(student.student_id, date(), at(9), true)
            .await
            .unwrap();
        let second = storage
            .upsert_student_attendance_impl(student.student_id, date(), at(15), false)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.time, at(9));
        assert_eq!(second.status, Some(false));

        let day = storage
            .list_student_attendance_for_date_impl(&[student.student_id], date())
            .await
            .unwrap();
        assert_eq!(day.len(), 1);
        assert!(
            storage
                .list_student_attendance_for_date_impl(&[], date())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_admin_list_names_and_search() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let web = seed_course(&storage, "Web").await;
        let ravi = seed_staff(&storage, "Ravi", &[java.course_id]).await;
        let kiran =
            seed_student(&storage, "Kiran", java.course_id, Some(ravi.staff_id), None).await;
        let lata = seed_student(&storage, "Lata", web.course_id, None, None).await;
        storage
            .upsert_student_attendance_impl(kiran.student_id, date(), at(9), true)
            .await
            .unwrap();
        let absent = storage
            .upsert_student_attendance_impl(lata.student_id, date(), at(9), false)
            .await
            .unwrap();

        let by_staff = storage
            .list_student_attendance_with_pagination_impl(StudentAttendanceListQuery {
                page: 1,
                size: 10,
                search: Some("ravi".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_staff.pagination.total, 1);
        let item = &by_staff.items[0];
        assert_eq!(item.student_name, "Kiran");
        assert_eq!(item.course_name, "Java");
        assert_eq!(item.staff_name.as_deref(), Some("Ravi"));

        let absentees = storage
            .list_student_attendance_with_pagination_impl(StudentAttendanceListQuery {
                page: 1,
                size: 10,
                status: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(absentees.items.len(), 1);
        assert_eq!(absentees.items[0].staff_name, None);

        assert!(storage.delete_student_attendance_impl(absent.id).await.unwrap());
        let remaining = storage
            .list_student_attendance_with_pagination_impl(StudentAttendanceListQuery {
                page: 1,
                size: 10,
                course_id: Some(web.course_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(remaining.pagination.total, 0);
    }
}
