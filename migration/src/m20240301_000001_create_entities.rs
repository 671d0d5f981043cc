use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(pk_auto(Person::Id))
                    .col(string(Person::FirstName))
                    .col(string_null(Person::LastName))
                    .col(string_uniq(Person::Email))
                    .col(integer(Person::MinimumFee))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_name")
                    .table(Person::Table)
                    .col(Person::FirstName)
                    .col(Person::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string(Company::Name))
                    .col(string(Company::ContactEmailAddress))
                    .col(string(Company::PhoneNumber))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_company_name")
                    .table(Company::Table)
                    .col(Company::Name)
                    .to_owned(),
            )
            .await?;

        // No foreign key on company_id: a film may reference a missing company.
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string(Film::Title))
                    .col(text_null(Film::Description))
                    .col(integer_null(Film::Budget))
                    .col(integer(Film::ReleaseYear))
                    .col(text_null(Film::Genres))
                    .col(integer_null(Film::CompanyId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_title")
                    .table(Film::Table)
                    .col(Film::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_company_id")
                    .table(Film::Table)
                    .col(Film::CompanyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Person {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    MinimumFee,
}

#[derive(DeriveIden)]
pub(crate) enum Company {
    Table,
    Id,
    Name,
    ContactEmailAddress,
    PhoneNumber,
}

#[derive(DeriveIden)]
pub(crate) enum Film {
    Table,
    Id,
    Title,
    Description,
    Budget,
    ReleaseYear,
    Genres,
    CompanyId,
}
