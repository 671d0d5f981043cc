use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, warn};
use validator::Validate;

use crate::{
    entities::{company, film, person, person_company, person_film},
    error::{AppError, AppResult},
    genres,
    models::{CompanyInput, Film, FilmInput, PersonInput},
};

/// Owns the connection pool. Every operation runs inside its own transaction.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub(crate) async fn begin(&self) -> AppResult<DatabaseTransaction> {
        Ok(self.db.begin().await?)
    }

    pub async fn create_person(&self, input: PersonInput) -> AppResult<person::Model> {
        input.validate()?;

        let model = person::ActiveModel {
            id: Default::default(),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            minimum_fee: Set(input.minimum_fee),
        };

        let txn = self.begin().await?;
        let result = model.insert(&txn).await;
        let created = finish(txn, result).await?;
        debug!(person_id = created.id, "created person");
        Ok(created)
    }

    pub async fn update_person(&self, id: i32, input: PersonInput) -> AppResult<person::Model> {
        input.validate()?;

        let txn = self.begin().await?;
        let Some(existing) = person::Entity::find_by_id(id).one(&txn).await? else {
            return Err(AppError::not_found("person", id));
        };

        let mut model: person::ActiveModel = existing.into();
        model.first_name = Set(input.first_name);
        model.last_name = Set(input.last_name);
        model.email = Set(input.email);
        model.minimum_fee = Set(input.minimum_fee);

        let result = model.update(&txn).await;
        let updated = finish(txn, result).await?;
        debug!(person_id = id, "updated person");
        Ok(updated)
    }

    /// Removes the person together with every film and company link it holds.
    pub async fn delete_person(&self, id: i32) -> AppResult<()> {
        let txn = self.begin().await?;
        if person::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("person", id));
        }

        let result = async {
            let films = person_film::Entity::delete_many()
                .filter(person_film::Column::PersonId.eq(id))
                .exec(&txn)
                .await?;
            let companies = person_company::Entity::delete_many()
                .filter(person_company::Column::PersonId.eq(id))
                .exec(&txn)
                .await?;
            person::Entity::delete_by_id(id).exec(&txn).await?;
            Ok::<_, sea_orm::DbErr>((films.rows_affected, companies.rows_affected))
        }
        .await;

        let (films, companies) = finish(txn, result).await?;
        debug!(person_id = id, films, companies, "deleted person and its links");
        Ok(())
    }

    pub async fn create_film(&self, input: FilmInput) -> AppResult<Film> {
        input.validate()?;

        let model = film::ActiveModel {
            id: Default::default(),
            title: Set(input.title),
            description: Set(input.description),
            budget: Set(input.budget),
            release_year: Set(input.release_year),
            genres: Set(Some(genres::encode(&input.genres)?)),
            company_id: Set(input.company_id),
        };

        let txn = self.begin().await?;
        let result = model.insert(&txn).await;
        let created = finish(txn, result).await?;
        debug!(film_id = created.id, "created film");
        Film::from_model(created)
    }

    pub async fn update_film(&self, id: i32, input: FilmInput) -> AppResult<Film> {
        input.validate()?;
        let encoded = genres::encode(&input.genres)?;

        let txn = self.begin().await?;
        let Some(existing) = film::Entity::find_by_id(id).one(&txn).await? else {
            return Err(AppError::not_found("film", id));
        };

        let mut model: film::ActiveModel = existing.into();
        model.title = Set(input.title);
        model.description = Set(input.description);
        model.budget = Set(input.budget);
        model.release_year = Set(input.release_year);
        model.genres = Set(Some(encoded));
        model.company_id = Set(input.company_id);

        let result = model.update(&txn).await;
        let updated = finish(txn, result).await?;
        debug!(film_id = id, "updated film");
        Film::from_model(updated)
    }

    pub async fn create_company(&self, input: CompanyInput) -> AppResult<company::Model> {
        let model = company::ActiveModel {
            id: Default::default(),
            name: Set(input.name),
            contact_email_address: Set(input.contact_email_address),
            phone_number: Set(input.phone_number),
        };

        let txn = self.begin().await?;
        let result = model.insert(&txn).await;
        let created = finish(txn, result).await?;
        debug!(company_id = created.id, "created company");
        Ok(created)
    }

    pub async fn update_company(&self, id: i32, input: CompanyInput) -> AppResult<company::Model> {
        let txn = self.begin().await?;
        let Some(existing) = company::Entity::find_by_id(id).one(&txn).await? else {
            return Err(AppError::not_found("company", id));
        };

        let mut model: company::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.contact_email_address = Set(input.contact_email_address);
        model.phone_number = Set(input.phone_number);

        let result = model.update(&txn).await;
        let updated = finish(txn, result).await?;
        debug!(company_id = id, "updated company");
        Ok(updated)
    }
}

/// Commits on success. On failure the transaction is rolled back before the error is
/// reported, so a rejected write never leaves partial state behind.
pub(crate) async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, sea_orm::DbErr>,
) -> AppResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        },
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                warn!(error = %rollback, "rollback failed");
            }
            Err(err.into())
        },
    }
}
