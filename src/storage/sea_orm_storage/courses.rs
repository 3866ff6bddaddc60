use std::collections::HashMap;

use super::{SeaOrmStorage, page_params};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::prelude::{Staff as StaffEntity, StaffCourses};
use crate::entity::{staff, staff_courses};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseWithStaff},
        requests::CourseListQuery,
        responses::CourseListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, course_name: &str) -> Result<Course> {
        let model = ActiveModel {
            course_name: Set(course_name.to_string()),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("创建课程失败", e))?;

        Ok(created.into_course())
    }

    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let found = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(found.map(|m| m.into_course()))
    }

    /// 分页列出课程，附带授课教职工姓名
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::CourseName.like(contains_pattern(search)));
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_asc(Column::CourseName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询课程总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询课程列表失败: {e}")))?;

        let ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let mut names = self.staff_names_by_course(&ids).await?;

        let items = models
            .into_iter()
            .map(|m| CourseWithStaff {
                staff_names: names.remove(&m.course_id).unwrap_or_default(),
                course: m.into_course(),
            })
            .collect();

        Ok(CourseListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_course_impl(
        &self,
        course_id: i64,
        course_name: &str,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            course_id: Set(course_id),
            course_name: Set(course_name.to_string()),
        };
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("更新课程失败", e))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn staff_names_by_course(&self, course_ids: &[i64]) -> Result<HashMap<i64, Vec<String>>> {
        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        if course_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = StaffCourses::find()
            .filter(staff_courses::Column::CourseId.is_in(course_ids.iter().copied()))
            .find_also_related(StaffEntity)
            .order_by_asc(staff::Column::StaffName)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询授课教职工失败: {e}")))?;

        for (link, member) in rows {
            if let Some(member) = member {
                grouped
                    .entry(link.course_id)
                    .or_default()
                    .push(member.staff_name);
            }
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::courses::requests::CourseListQuery;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_staff};

    #[tokio::test]
    async fn test_course_name_unique() {
        let storage = SeaOrmStorage::in_memory().await;
        storage.create_course_impl("Java").await.unwrap();
        let err = storage.create_course_impl("Java").await.unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[tokio::test]
    async fn test_list_includes_staff_names() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        seed_course(&storage, "Python").await;
        seed_staff(&storage, "Ravi", &[java.course_id]).await;
        seed_staff(&storage, "Anu", &[java.course_id]).await;

        let list = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: 1,
                size: 10,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 2);
        let java_row = list
            .items
            .iter()
            .find(|c| c.course.course_id == java.course_id)
            .unwrap();
        assert_eq!(java_row.staff_names, vec!["Anu", "Ravi"]);

        let searched = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: 1,
                size: 10,
                search: Some("pyt".into()),
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Java").await;
        let updated = storage
            .update_course_impl(course.course_id, "Kotlin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.course_name, "Kotlin");
        assert!(storage.update_course_impl(999, "X").await.unwrap().is_none());
        assert!(storage.delete_course_impl(course.course_id).await.unwrap());
        assert!(!storage.delete_course_impl(course.course_id).await.unwrap());
    }
}
