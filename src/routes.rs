use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;

use crate::{
    AppState,
    entities::{company, person},
    error::{AppError, AppResult},
    models::{CompanyInput, Film, FilmInput, LinkParams, Message, PersonInput, PersonRoles},
};

type Body<T> = WithRejection<Json<T>, AppError>;
type Id<T> = WithRejection<Path<T>, AppError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/persons", post(create_person))
        .route("/persons/{person_id}", put(update_person).delete(delete_person))
        .route("/persons/{person_id}/films/{film_id}", post(link_film).delete(unlink_film))
        .route(
            "/persons/{person_id}/companies/{company_id}",
            post(link_company).delete(unlink_company),
        )
        .route("/films", post(create_film))
        .route("/films/{film_id}", put(update_film))
        .route("/companies", post(create_company))
        .route("/companies/{company_id}", put(update_company))
        .route("/person-roles", get(person_roles))
        .with_state(state)
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(input), _): Body<PersonInput>,
) -> AppResult<Json<person::Model>> {
    Ok(Json(state.store.create_person(input).await?))
}

pub async fn update_person(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(person_id), _): Id<i32>,
    WithRejection(Json(input), _): Body<PersonInput>,
) -> AppResult<Json<person::Model>> {
    Ok(Json(state.store.update_person(person_id, input).await?))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(person_id), _): Id<i32>,
) -> AppResult<Json<Message>> {
    state.store.delete_person(person_id).await?;
    Ok(Json(Message::new("person deleted")))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(input), _): Body<FilmInput>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.store.create_film(input).await?))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): Id<i32>,
    WithRejection(Json(input), _): Body<FilmInput>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.store.update_film(film_id, input).await?))
}

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(input), _): Body<CompanyInput>,
) -> AppResult<Json<company::Model>> {
    Ok(Json(state.store.create_company(input).await?))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(company_id), _): Id<i32>,
    WithRejection(Json(input), _): Body<CompanyInput>,
) -> AppResult<Json<company::Model>> {
    Ok(Json(state.store.update_company(company_id, input).await?))
}

pub async fn link_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Path((person_id, film_id)), _): Id<(i32, i32)>,
    Query(params): Query<LinkParams>,
) -> AppResult<Json<Message>> {
    state.store.link_film(person_id, film_id, params.role).await?;
    Ok(Json(Message::new("film linked to person")))
}

pub async fn unlink_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Path((person_id, film_id)), _): Id<(i32, i32)>,
) -> AppResult<Json<Message>> {
    state.store.unlink_film(person_id, film_id).await?;
    Ok(Json(Message::new("film unlinked from person")))
}

pub async fn link_company(
    State(state): State<Arc<AppState>>,
    WithRejection(Path((person_id, company_id)), _): Id<(i32, i32)>,
    Query(params): Query<LinkParams>,
) -> AppResult<Json<Message>> {
    state.store.link_company(person_id, company_id, params.role).await?;
    Ok(Json(Message::new("company linked to person")))
}

pub async fn unlink_company(
    State(state): State<Arc<AppState>>,
    WithRejection(Path((person_id, company_id)), _): Id<(i32, i32)>,
) -> AppResult<Json<Message>> {
    state.store.unlink_company(person_id, company_id).await?;
    Ok(Json(Message::new("company unlinked from person")))
}

pub async fn person_roles(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<PersonRoles>>> {
    Ok(Json(state.store.list_person_roles().await?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body as HttpBody, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{db, store::Store};

    async fn app() -> Router {
        let store = Store::new(db::memory().await);
        router(Arc::new(AppState { store }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                req = req.header("content-type", "application/json");
                HttpBody::from(value.to_string())
            },
            None => HttpBody::empty(),
        };
        app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ada() -> Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "minimum_fee": 100
        })
    }

    #[tokio::test]
    async fn create_link_and_list() {
        let app = app().await;

        let resp = send(&app, "POST", "/persons", Some(ada())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["id"], 1);

        let film = json!({ "title": "Proof", "release_year": 1843, "genres": ["drama"] });
        let resp = send(&app, "POST", "/films", Some(film)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["genres"], json!(["drama"]));

        let resp = send(&app, "POST", "/persons/1/films/1?role=writer", None).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, "GET", "/person-roles", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            json!([{
                "person_id": 1,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "minimum_fee": 100,
                "films": [{
                    "title": "Proof",
                    "description": null,
                    "budget": null,
                    "release_year": 1843,
                    "genres": ["drama"],
                    "role": "writer"
                }],
                "companies": []
            }])
        );
    }

    #[tokio::test]
    async fn error_statuses() {
        let app = app().await;

        let resp = send(&app, "PUT", "/persons/9", Some(ada())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(resp).await["detail"], "person 9 not found");

        let mut bad = ada();
        bad["nickname"] = json!("Countess");
        let resp = send(&app, "POST", "/persons", Some(bad)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let mut bad = ada();
        bad["minimum_fee"] = json!(-1);
        let resp = send(&app, "POST", "/persons", Some(bad)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        send(&app, "POST", "/persons", Some(ada())).await;
        let resp = send(&app, "POST", "/persons", Some(ada())).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = send(&app, "POST", "/persons/1/companies/5", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&app, "DELETE", "/persons/1", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = send(&app, "DELETE", "/persons/1", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updates_reject_unknown_fields() {
        let app = app().await;
        send(&app, "POST", "/persons", Some(ada())).await;
        let film = json!({ "title": "Proof", "release_year": 1843 });
        send(&app, "POST", "/films", Some(film.clone())).await;
        let company = json!({
            "name": "Analytical Pictures",
            "contact_email_address": "hello@analytical.example",
            "phone_number": "555-0100"
        });
        send(&app, "POST", "/companies", Some(company.clone())).await;

        for (uri, mut body) in
            [("/persons/1", ada()), ("/films/1", film), ("/companies/1", company)]
        {
            body["rating"] = json!(5);
            let resp = send(&app, "PUT", uri, Some(body)).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(json_body(resp).await["detail"].is_string(), "{uri}");
        }

        let resp = send(&app, "GET", "/person-roles", None).await;
        assert_eq!(json_body(resp).await[0]["first_name"], "Ada");
    }

    #[tokio::test]
    async fn malformed_ids_answer_with_json_detail() {
        let app = app().await;

        for (method, uri) in [
            ("DELETE", "/persons/ada"),
            ("PUT", "/films/99999999999"),
            ("POST", "/persons/1/films/x"),
        ] {
            let body = (method == "PUT").then(|| json!({ "title": "Proof", "release_year": 1843 }));
            let resp = send(&app, method, uri, body).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(json_body(resp).await["detail"].is_string(), "{uri}");
        }
    }
}
