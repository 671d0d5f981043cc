use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub minimum_fee: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_film::Entity")]
    PersonFilm,
    #[sea_orm(has_many = "super::person_company::Entity")]
    PersonCompany,
}

impl Related<super::person_film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilm.def()
    }
}

impl Related<super::person_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
