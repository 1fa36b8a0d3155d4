use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "doctor_specializations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub doctor_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub specialization_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
