//! 学生考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    /// true = 出勤, false = 缺勤, NULL = 未记录
    pub status: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::StudentId"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_attendance(
        self,
    ) -> crate::models::attendance::entities::StudentAttendance {
        crate::models::attendance::entities::StudentAttendance {
            id: self.id,
            student_id: self.student_id,
            date: self.date,
            time: self.time,
            status: self.status,
        }
    }
}
