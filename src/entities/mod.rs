pub mod company;
pub mod film;
pub mod person;
pub mod person_company;
pub mod person_film;
