use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{entities::film, error::AppResult, genres};

/// Every field of a person. Used for both create and full-replace update.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PersonInput {
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 0))]
    pub minimum_fee: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FilmInput {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget: Option<i32>,
    pub release_year: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub company_id: Option<i32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyInput {
    pub name: String,
    pub contact_email_address: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LinkParams {
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Film {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<i32>,
    pub release_year: i32,
    pub genres: Vec<String>,
    pub company_id: Option<i32>,
}

impl Film {
    pub fn from_model(model: film::Model) -> AppResult<Self> {
        let genres = genres::decode(model.genres.as_deref())?;
        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            budget: model.budget,
            release_year: model.release_year,
            genres,
            company_id: model.company_id,
        })
    }
}

/// A film as seen from one of its people: no id, no further associations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilmRole {
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<i32>,
    pub release_year: i32,
    pub genres: Vec<String>,
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyRole {
    pub name: String,
    pub contact_email_address: String,
    pub phone_number: String,
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonRoles {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub minimum_fee: i32,
    pub films: Vec<FilmRole>,
    pub companies: Vec<CompanyRole>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
