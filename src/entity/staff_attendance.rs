//! 教职工考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub staff_id: i64,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    pub wifi_verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::StaffId"
    )]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_staff_attendance(self) -> crate::models::attendance::entities::StaffAttendance {
        crate::models::attendance::entities::StaffAttendance {
            id: self.id,
            staff_id: self.staff_id,
            date: self.date,
            time: self.time,
            wifi_verified: self.wifi_verified,
        }
    }
}
