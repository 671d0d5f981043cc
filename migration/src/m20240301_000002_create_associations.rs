use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000001_create_entities::{Company, Film, Person};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PersonFilm::Table)
                    .if_not_exists()
                    .col(integer(PersonFilm::PersonId))
                    .col(integer(PersonFilm::FilmId))
                    .col(string_null(PersonFilm::Role))
                    .primary_key(Index::create().col(PersonFilm::PersonId).col(PersonFilm::FilmId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_film_person")
                            .from(PersonFilm::Table, PersonFilm::PersonId)
                            .to(Person::Table, Person::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_film_film")
                            .from(PersonFilm::Table, PersonFilm::FilmId)
                            .to(Film::Table, Film::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_film_film_id")
                    .table(PersonFilm::Table)
                    .col(PersonFilm::FilmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonCompany::Table)
                    .if_not_exists()
                    .col(integer(PersonCompany::PersonId))
                    .col(integer(PersonCompany::CompanyId))
                    .col(string_null(PersonCompany::Role))
                    .primary_key(
                        Index::create().col(PersonCompany::PersonId).col(PersonCompany::CompanyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_company_person")
                            .from(PersonCompany::Table, PersonCompany::PersonId)
                            .to(Person::Table, Person::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_company_company")
                            .from(PersonCompany::Table, PersonCompany::CompanyId)
                            .to(Company::Table, Company::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_company_company_id")
                    .table(PersonCompany::Table)
                    .col(PersonCompany::CompanyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PersonCompany::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PersonFilm::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PersonFilm {
    Table,
    PersonId,
    FilmId,
    Role,
}

#[derive(DeriveIden)]
enum PersonCompany {
    Table,
    PersonId,
    CompanyId,
    Role,
}
