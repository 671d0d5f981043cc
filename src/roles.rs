use std::collections::HashMap;

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use tracing::{debug, warn};

use crate::{
    entities::{company, film, person, person_company, person_film},
    error::AppResult,
    genres,
    models::{CompanyRole, FilmRole, PersonRoles},
    store::Store,
};

impl Store {
    /// Every person with the films and companies it is linked to.
    ///
    /// Three queries inside one read transaction regardless of how many people or links
    /// exist: the people, then each link table joined to its target. People come back in
    /// id order, their films and companies in film and company id order.
    pub async fn list_person_roles(&self) -> AppResult<Vec<PersonRoles>> {
        let txn = self.begin().await?;

        let people = person::Entity::find().order_by_asc(person::Column::Id).all(&txn).await?;
        let mut films = films_by_person(&txn).await?;
        let mut companies = companies_by_person(&txn).await?;
        txn.commit().await?;

        debug!(
            people = people.len(),
            with_films = films.len(),
            with_companies = companies.len(),
            "assembled person roles"
        );

        Ok(people
            .into_iter()
            .map(|p| PersonRoles {
                films: films.remove(&p.id).unwrap_or_default(),
                companies: companies.remove(&p.id).unwrap_or_default(),
                person_id: p.id,
                first_name: p.first_name,
                last_name: p.last_name,
                email: p.email,
                minimum_fee: p.minimum_fee,
            })
            .collect())
    }
}

async fn films_by_person<C: ConnectionTrait>(conn: &C) -> AppResult<HashMap<i32, Vec<FilmRole>>> {
    let rows = person_film::Entity::find()
        .find_also_related(film::Entity)
        .order_by_asc(person_film::Column::PersonId)
        .order_by_asc(person_film::Column::FilmId)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<FilmRole>> = HashMap::new();
    for (link, film) in rows {
        let Some(film) = film else {
            warn!(person_id = link.person_id, film_id = link.film_id, "link to missing film");
            continue;
        };
        grouped.entry(link.person_id).or_default().push(FilmRole {
            genres: genres::decode(film.genres.as_deref())?,
            title: film.title,
            description: film.description,
            budget: film.budget,
            release_year: film.release_year,
            role: link.role,
        });
    }
    Ok(grouped)
}

async fn companies_by_person<C: ConnectionTrait>(
    conn: &C,
) -> AppResult<HashMap<i32, Vec<CompanyRole>>> {
    let rows = person_company::Entity::find()
        .find_also_related(company::Entity)
        .order_by_asc(person_company::Column::PersonId)
        .order_by_asc(person_company::Column::CompanyId)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<CompanyRole>> = HashMap::new();
    for (link, company) in rows {
        let Some(company) = company else {
            warn!(
                person_id = link.person_id,
                company_id = link.company_id,
                "link to missing company"
            );
            continue;
        };
        grouped.entry(link.person_id).or_default().push(CompanyRole {
            name: company.name,
            contact_email_address: company.contact_email_address,
            phone_number: company.phone_number,
            role: link.role,
        });
    }
    Ok(grouped)
}
