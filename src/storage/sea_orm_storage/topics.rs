use super::{SeaOrmStorage, page_params};
use crate::entity::course_topics::{ActiveModel, Column, Entity as CourseTopics};
use crate::entity::prelude::Courses;
use crate::errors::{Result, TesdbError};
use crate::models::{
    PaginationInfo,
    topics::{
        entities::{CourseTopic, CourseTopicWithCourse},
        requests::{CreateTopicRequest, TopicListQuery, UpdateTopicRequest},
        responses::TopicListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_topic_impl(&self, req: CreateTopicRequest) -> Result<CourseTopic> {
        let model = ActiveModel {
            course_id: Set(req.course_id),
            module_name: Set(req.module_name),
            topic_name: Set(req.topic_name),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("创建知识点失败", e))?;

        Ok(created.into_topic())
    }

    pub async fn get_topic_by_id_impl(&self, topic_id: i64) -> Result<Option<CourseTopic>> {
        let found = CourseTopics::find_by_id(topic_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询知识点失败: {e}")))?;

        Ok(found.map(|m| m.into_topic()))
    }

    /// 课程全部知识点，按 ID 排序
    pub async fn list_topics_for_course_impl(&self, course_id: i64) -> Result<Vec<CourseTopic>> {
        let models = CourseTopics::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::TopicId)
            .all(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询课程知识点失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_topic()).collect())
    }

    pub async fn list_topics_with_pagination_impl(
        &self,
        query: TopicListQuery,
    ) -> Result<TopicListResponse> {
        let mut select = CourseTopics::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(ref module) = query.module_name
            && !module.trim().is_empty()
        {
            select = select.filter(Column::ModuleName.eq(module.trim()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::ModuleName.like(contains_pattern(search)))
                    .add(Column::TopicName.like(contains_pattern(search))),
            );
        }

        let (page, size) = page_params(query.page, query.size);
        let paginator = select
            .find_also_related(Courses)
            .order_by_asc(Column::CourseId)
            .order_by_asc(Column::ModuleName)
            .order_by_asc(Column::TopicName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询知识点总数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询知识点列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .map(|(topic, course)| CourseTopicWithCourse {
                topic: topic.into_topic(),
                course_name: course.map(|c| c.course_name).unwrap_or_default(),
            })
            .collect();

        Ok(TopicListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_topic_impl(
        &self,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<CourseTopic>> {
        let Some(existing) = CourseTopics::find_by_id(topic_id)
            .one(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("查询知识点失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(module) = update.module_name {
            model.module_name = Set(module);
        }
        if let Some(topic) = update.topic_name {
            model.topic_name = Set(topic);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TesdbError::from_db("更新知识点失败", e))?;

        Ok(Some(updated.into_topic()))
    }

    pub async fn delete_topic_impl(&self, topic_id: i64) -> Result<bool> {
        let result = CourseTopics::delete_by_id(topic_id)
            .exec(&self.db)
            .await
            .map_err(|e| TesdbError::database_operation(format!("删除知识点失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::topics::requests::{CreateTopicRequest, TopicListQuery};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_course, seed_topic};

    #[tokio::test]
    async fn test_topic_triple_unique() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        seed_topic(&storage, java.course_id, "Basics", "Variables").await;

        let err = storage
            .create_topic_impl(CreateTopicRequest {
                course_id: java.course_id,
                module_name: "Basics".into(),
                topic_name: "Variables".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[tokio::test]
    async fn test_list_for_course_and_filters() {
        let storage = SeaOrmStorage::in_memory().await;
        let java = seed_course(&storage, "Java").await;
        let web = seed_course(&storage, "Web").await;
        let t1 = seed_topic(&storage, java.course_id, "Basics", "Variables").await;
        let t2 = seed_topic(&storage, java.course_id, "Oop", "Classes").await;
        seed_topic(&storage, web.course_id, "Html", "Tags").await;

        let ids: Vec<_> = storage
            .list_topics_for_course_impl(java.course_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.topic_id)
            .collect();
        assert_eq!(ids, vec![t1.topic_id, t2.topic_id]);

        let by_module = storage
            .list_topics_with_pagination_impl(TopicListQuery {
                page: 1,
                size: 10,
                module_name: Some("Oop".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_module.items.len(), 1);
        assert_eq!(by_module.items[0].course_name, "Java");
    }
}
