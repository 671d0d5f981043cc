//! Person links to films and companies.
//!
//! A pair is stored at most once: linking an already linked pair succeeds without
//! touching the existing row (its role included), and unlinking removes the pair's row.
//! Both endpoints are checked inside the same transaction as the write.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};
use tracing::debug;

use crate::{
    entities::{company, film, person, person_company, person_film},
    error::{AppError, AppResult},
    store::{Store, finish},
};

impl Store {
    pub async fn link_film(&self, person_id: i32, film_id: i32, role: Option<String>) -> AppResult<()> {
        let txn = self.begin().await?;
        require_person(&txn, person_id).await?;
        if film::Entity::find_by_id(film_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("film", film_id));
        }

        let link = person_film::ActiveModel {
            person_id: Set(person_id),
            film_id: Set(film_id),
            role: Set(role),
        };
        let result = person_film::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([person_film::Column::PersonId, person_film::Column::FilmId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await;

        let inserted = finish(txn, result).await?;
        debug!(person_id, film_id, inserted, "linked film");
        Ok(())
    }

    pub async fn unlink_film(&self, person_id: i32, film_id: i32) -> AppResult<()> {
        let txn = self.begin().await?;
        require_person(&txn, person_id).await?;
        if film::Entity::find_by_id(film_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("film", film_id));
        }

        let result = person_film::Entity::delete_many()
            .filter(person_film::Column::PersonId.eq(person_id))
            .filter(person_film::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await;

        let removed = finish(txn, result).await?.rows_affected;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "link between person {person_id} and film {film_id}"
            )));
        }
        debug!(person_id, film_id, "unlinked film");
        Ok(())
    }

    pub async fn link_company(
        &self,
        person_id: i32,
        company_id: i32,
        role: Option<String>,
    ) -> AppResult<()> {
        let txn = self.begin().await?;
        require_person(&txn, person_id).await?;
        if company::Entity::find_by_id(company_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("company", company_id));
        }

        let link = person_company::ActiveModel {
            person_id: Set(person_id),
            company_id: Set(company_id),
            role: Set(role),
        };
        let result = person_company::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    person_company::Column::PersonId,
                    person_company::Column::CompanyId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await;

        let inserted = finish(txn, result).await?;
        debug!(person_id, company_id, inserted, "linked company");
        Ok(())
    }

    pub async fn unlink_company(&self, person_id: i32, company_id: i32) -> AppResult<()> {
        let txn = self.begin().await?;
        require_person(&txn, person_id).await?;
        if company::Entity::find_by_id(company_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("company", company_id));
        }

        let result = person_company::Entity::delete_many()
            .filter(person_company::Column::PersonId.eq(person_id))
            .filter(person_company::Column::CompanyId.eq(company_id))
            .exec(&txn)
            .await;

        let removed = finish(txn, result).await?.rows_affected;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "link between person {person_id} and company {company_id}"
            )));
        }
        debug!(person_id, company_id, "unlinked company");
        Ok(())
    }
}

async fn require_person<C: ConnectionTrait>(conn: &C, person_id: i32) -> AppResult<()> {
    match person::Entity::find_by_id(person_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("person", person_id)),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::{
        db,
        models::CompanyInput,
        store::tests::{ada, proof},
    };

    async fn seeded() -> (Store, i32, i32, i32) {
        let store = Store::new(db::memory().await);
        let person = store.create_person(ada()).await.unwrap();
        let film = store.create_film(proof()).await.unwrap();
        let company = store
            .create_company(CompanyInput {
                name: "Analytical Pictures".into(),
                contact_email_address: "hello@analytical.example".into(),
                phone_number: "555-0100".into(),
            })
            .await
            .unwrap();
        (store, person.id, film.id, company.id)
    }

    async fn film_links(store: &Store) -> Vec<person_film::Model> {
        person_film::Entity::find().all(store.db()).await.unwrap()
    }

    #[tokio::test]
    async fn link_then_unlink_restores_prior_state() {
        let (store, person_id, film_id, _) = seeded().await;
        assert!(film_links(&store).await.is_empty());

        store.link_film(person_id, film_id, Some("lead".into())).await.unwrap();
        let links = film_links(&store).await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].role.as_deref(), Some("lead"));

        store.unlink_film(person_id, film_id).await.unwrap();
        assert!(film_links(&store).await.is_empty());
    }

    #[tokio::test]
    async fn relinking_a_pair_keeps_one_row_and_first_role() {
        let (store, person_id, film_id, _) = seeded().await;

        store.link_film(person_id, film_id, Some("lead".into())).await.unwrap();
        store.link_film(person_id, film_id, Some("extra".into())).await.unwrap();

        let links = film_links(&store).await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].role.as_deref(), Some("lead"));

        store.unlink_film(person_id, film_id).await.unwrap();
        assert!(film_links(&store).await.is_empty());
        let err = store.unlink_film(person_id, film_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
    }

    #[tokio::test]
    async fn missing_endpoints_create_nothing() {
        let (store, person_id, film_id, company_id) = seeded().await;

        for (p, f) in [(person_id + 100, film_id), (person_id, film_id + 100)] {
            let err = store.link_film(p, f, None).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
        }
        for (p, c) in [(person_id + 100, company_id), (person_id, company_id + 100)] {
            let err = store.link_company(p, c, None).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
        }

        assert!(film_links(&store).await.is_empty());
        assert_eq!(person_company::Entity::find().count(store.db()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unlink_with_missing_endpoint_is_not_found() {
        let (store, person_id, film_id, company_id) = seeded().await;
        store.link_film(person_id, film_id, None).await.unwrap();

        let err = store.unlink_film(person_id, film_id + 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
        let err = store.unlink_company(person_id + 1, company_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "{err:?}");

        assert_eq!(film_links(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn company_link_round_trip() {
        let (store, person_id, _, company_id) = seeded().await;

        store.link_company(person_id, company_id, Some("director".into())).await.unwrap();
        store.link_company(person_id, company_id, None).await.unwrap();
        assert_eq!(person_company::Entity::find().count(store.db()).await.unwrap(), 1);

        store.unlink_company(person_id, company_id).await.unwrap();
        assert_eq!(person_company::Entity::find().count(store.db()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_a_person_drops_its_links() {
        let (store, person_id, film_id, company_id) = seeded().await;
        store.link_film(person_id, film_id, None).await.unwrap();
        store.link_company(person_id, company_id, None).await.unwrap();

        store.delete_person(person_id).await.unwrap();

        assert!(film_links(&store).await.is_empty());
        assert_eq!(person_company::Entity::find().count(store.db()).await.unwrap(), 0);
        assert!(film::Entity::find_by_id(film_id).one(store.db()).await.unwrap().is_some());
    }
}
