use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, page_params};
use crate::entity::prelude::{Courses, Staff as StaffEntity, StaffCourses};
use crate::entity::{courses, staff, staff_courses};
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    courses::entities::Course,
    staff::{
        entities::{Staff, StaffWithCourses},
        requests::{CreateStaffRequest, StaffListQuery, UpdateStaffRequest},
        responses::StaffListResponse,
    },
};
use crate::utils::{contains_pattern, ends_with_pattern};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教职工档案并绑定授课课程
    pub async fn create_staff_impl(&self, req: CreateStaffRequest) -> Result<StaffWithCourses> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TesdbError::database_operation(format!("开启事务失败: {e}")))?;

        let model = staff::ActiveModel {
            user_id: Set(req.user_id),
            staff_name: Set(req.staff_name),
            contact: Set(req.contact),
            staff_email: Set(req.staff_email),
            ..Default::default()
        };
        let created = model
            .insert(&txn)
            .await
            .map_err(|e| TesdbError::from_db("创建教职工失败", e))?;

        replace_staff_courses(&txn, created.staff_id, &req.course_ids).await?;

        txn.commit()
            .await
            .map_err(|e| TesdbError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_staff_by_id_impl(created.staff_id)
            .await?
            .ok_or_else(|| TesdbError::not_found("教职工创建后未找到"))
    }

    pub async fn get_staff_by_id_impl(&self, staff_id: i64) -> Result<Option<StaffWithCourses>> {
        let found = StaffEntity::find_by_id(staff_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询教职工失败: {e}")))?;

        let Some(model) = found else {
            return Ok(None);
        };
        let mut courses = self.courses_by_staff(&[staff_id]).await?;
        Ok(Some(StaffWithCourses {
            courses: courses.remove(&staff_id).unwrap_or_default(),
            staff: model.into_staff(),
        }))
    }

    pub async fn get_staff_by_user_id_impl(&self, user_id: i64) -> Result<Option<Staff>> {
        let found = StaffEntity::find()
            .filter(staff::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(found.map(|m| m.into_staff()))
    }

    pub async fn list_staff_with_pagination_impl(
        &self,
        query: StaffListQuery,
    ) -> Result<StaffListResponse> {
        let mut select = StaffEntity::find();

        if let Some(course_id) = query.course_id {
            let ids = self.staff_ids_for_course(course_id).await?;
            select = select.filter(staff::Column::StaffId.is_in(ids));
        }

        if let Some(ref domain) = query.email_domain
            && !domain.trim().is_empty()
        {
            let domain = domain.trim().trim_start_matches('@');
            let pattern = ends_with_pattern(&format!("@{domain}"));
            select = select.filter(staff::Column::StaffEmail.like(pattern));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(staff::Column::StaffName.like(contains_pattern(search)))
                    .add(staff::Column::StaffEmail.like(contains_pattern(search)))
                    .add(staff::Column::Contact.like(contains_pattern(search))),
            );
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .order_by_asc(staff::Column::StaffName)
            .order_by_asc(staff::Column::StaffId)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询教职工总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询教职工列表失败: {e}")))?;

        let ids: Vec<i64> = models.iter().map(|m| m.staff_id).collect();
        let mut courses = self.courses_by_staff(&ids).await?;

        let items = models
            .into_iter()
            .map(|m| StaffWithCourses {
                courses: courses.remove(&m.staff_id).unwrap_or_default(),
                staff: m.into_staff(),
            })
            .collect();

        Ok(StaffListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_staff_impl(
        &self,
        staff_id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<StaffWithCourses>> {
        let exists = StaffEntity::find_by_id(staff_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询教职工失败: {e}")))?;
        if exists.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TesdbError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = staff::ActiveModel {
            staff_id: Set(staff_id),
            ..Default::default()
        };
        let mut changed = false;
        if let Some(name) = update.staff_name {
            model.staff_name = Set(name);
            changed = true;
        }
        if let Some(contact) = update.contact {
            model.contact = Set(contact);
            changed = true;
        }
        if let Some(email) = update.staff_email {
            model.staff_email = Set(email);
            changed = true;
        }
        if changed {
            model
                .update(&txn)
                .await
                .map_err(|e| TesdbError::from_db("更新教职工失败", e))?;
        }

        if let Some(ref course_ids) = update.course_ids {
            replace_staff_courses(&txn, staff_id, course_ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| TesdbError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_staff_by_id_impl(staff_id).await
    }

    pub async fn delete_staff_impl(&self, staff_id: i64) -> Result<bool> {
        let result = StaffEntity::delete_by_id(staff_id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除教职工失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_staff_for_course_impl(&self, course_id: i64) -> Result<Vec<Staff>> {
        let ids = self.staff_ids_for_course(course_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StaffEntity::find()
            .filter(staff::Column::StaffId.is_in(ids))
            .order_by_asc(staff::Column::StaffName)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询课程教职工失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_staff()).collect())
    }

    pub async fn staff_teaches_course_impl(&self, staff_id: i64, course_id: i64) -> Result<bool> {
        let count = StaffCourses::find()
            .filter(staff_courses::Column::StaffId.eq(staff_id))
            .filter(staff_courses::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询授课关系失败: {e}")))?;

        Ok(count > 0)
    }

    async fn staff_ids_for_course(&self, course_id: i64) -> Result<Vec<i64>> {
        let links = StaffCourses::find()
            .filter(staff_courses::Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询授课关系失败: {e}")))?;

        Ok(links.into_iter().map(|l| l.staff_id).collect())
    }

    /// staff_id -> 按名称排序的课程
    pub(super) async fn courses_by_staff(
        &self,
        staff_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Course>>> {
        let mut grouped: HashMap<i64, Vec<Course>> = HashMap::new();
        if staff_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = StaffCourses::find()
            .filter(staff_courses::Column::StaffId.is_in(staff_ids.iter().copied()))
            .find_also_related(Courses)
            .order_by_asc(courses::Column::CourseName)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询授课课程失败: {e}")))?;

        for (link, course) in rows {
            if let Some(course) = course {
                grouped
                    .entry(link.staff_id)
                    .or_default()
                    .push(course.into_course());
            }
        }
        Ok(grouped)
    }
}

/// 用给定课程集合替换教职工的授课关系
async fn replace_staff_courses<C>(conn: &C, staff_id: i64, course_ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    StaffCourses::delete_many()
        .filter(staff_courses::Column::StaffId.eq(staff_id))
        .exec(conn)
        .await
        .map_err(|e| TesdbError::database_operation(format!("清除授课关系失败: {e}")))?;

    let unique: BTreeSet<i64> = course_ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }

    let links = unique.into_iter().map(|course_id| staff_courses::ActiveModel {
        staff_id: Set(staff_id),
        course_id: Set(course_id),
        ..Default::default()
    });
    StaffCourses::insert_many(links)
        .exec(conn)
        .await
        .map_err(|e| TesdbError::from_db("写入授课关系失败", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::staff::requests::{CreateStaffRequest, StaffListQuery, UpdateStaffRequest};
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_user};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_create_staff_with_courses() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = seed_user(&storage, "meena").await;
        let java = seed_course(&storage, "Java").await;
        let python = seed_course(&storage, "Python").await;

        let staff = storage
            .create_staff_impl(CreateStaffRequest {
                user_id: user.id,
                staff_name: "Meena".into(),
                contact: "9876543210".into(),
                staff_email: "meena@college.edu".into(),
                course_ids: vec![python.course_id, java.course_id, java.course_id],
            })
            .await
            .unwrap();

        let names: Vec<_> = staff.courses.iter().map(|c| c.course_name.as_str()).collect();
        assert_eq!(names, vec!["Java", "Python"]);
        assert!(
            storage
                .staff_teaches_course_impl(staff.staff.staff_id, java.course_id)
                .await
                .unwrap()
        );

        let by_user = storage.get_staff_by_user_id_impl(user.id).await.unwrap();
        assert_eq!(by_user.map(|s| s.staff_id), Some(staff.staff.staff_id));
    }

    #[tokio::test]
    async fn test_one_profile_per_account() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = seed_user(&storage, "meena").await;
        let req = |email: &str| CreateStaffRequest {
            user_id: user.id,
            staff_name: "Meena".into(),
            contact: String::new(),
            staff_email: email.into(),
            course_ids: vec![],
        };
        storage.create_staff_impl(req("a@x.edu")).await.unwrap();
        let err = storage.create_staff_impl(req("b@x.edu")).await.unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[tokio::test]
    async fn test_list_filters_and_course_replacement() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let web = seed_course(&storage, "Web").await;

        let u1 = seed_user(&storage, "anil").await;
        let u2 = seed_user(&storage, "bina").await;
        let anil = storage
            .create_staff_impl(CreateStaffRequest {
                user_id: u1.id,
                staff_name: "Anil".into(),
                contact: String::new(),
                staff_email: "anil@college.edu".into(),
                course_ids: vec![java.course_id],
            })
            .await
            .unwrap();
        storage
            .create_staff_impl(CreateStaffRequest {
                user_id: u2.id,
                staff_name: "Bina".into(),
                contact: String::new(),
                staff_email: "bina@gmail.com".into(),
                course_ids: vec![web.course_id],
            })
            .await
            .unwrap();

        let by_course = storage
            .list_staff_with_pagination_impl(StaffListQuery {
                page: 1,
                size: 10,
                course_id: Some(java.course_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_course.items.len(), 1);
        assert_eq!(by_course.items[0].staff.staff_name, "Anil");

        let by_domain = storage
            .list_staff_with_pagination_impl(StaffListQuery {
                page: 1,
                size: 10,
                email_domain: Some("@gmail.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_domain.items.len(), 1);
        assert_eq!(by_domain.items[0].staff.staff_name, "Bina");

        let updated = storage
            .update_staff_impl(
                anil.staff.staff_id,
                UpdateStaffRequest {
                    course_ids: Some(vec![web.course_id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.courses.len(), 1);
        assert_eq!(updated.courses[0].course_id, web.course_id);

        let for_web = storage.list_staff_for_course_impl(web.course_id).await.unwrap();
        let names: Vec<_> = for_web.iter().map(|s| s.staff_name.as_str()).collect();
        assert_eq!(names, vec!["Anil", "Bina"]);
        assert!(storage.list_staff_for_course_impl(java.course_id).await.unwrap().is_empty());
    }
}
