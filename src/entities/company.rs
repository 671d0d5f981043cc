use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contact_email_address: String,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_company::Entity")]
    PersonCompany,
}

impl Related<super::person_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
