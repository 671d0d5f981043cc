use sea_orm::entity::prelude::*;

/// Stored film row. `genres` holds the JSON-encoded list, see [`crate::genres`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub budget: Option<i32>,
    pub release_year: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub genres: Option<String>,
    pub company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_film::Entity")]
    PersonFilm,
}

impl Related<super::person_film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
