//! 教职工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub staff_id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub staff_name: String,
    pub contact: String,
    #[sea_orm(unique)]
    pub staff_email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::staff_courses::Entity")]
    StaffCourses,
    #[sea_orm(has_many = "super::batches::Entity")]
    Batches,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::staff_attendance::Entity")]
    Attendance,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

// 多对多：教职工 <-> 课程
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::staff_courses::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::staff_courses::Relation::Staff.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_staff(self) -> crate::models::staff::entities::Staff {
        crate::models::staff::entities::Staff {
            staff_id: self.staff_id,
            user_id: self.user_id,
            staff_name: self.staff_name,
            contact: self.contact,
            staff_email: self.staff_email,
        }
    }
}
