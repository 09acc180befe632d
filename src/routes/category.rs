//! Route handlers for creating, listing, updating, and deleting categories.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::Claims,
    models::{Category, CategoryColor, CategoryName, DatabaseID},
    ownership::authorize,
    stores::CategoryStore,
};

/// The payload for creating a category.
#[derive(Debug, Deserialize)]
pub(super) struct NewCategoryRequest {
    name: String,
    color: String,
}

/// The payload for updating a category.
#[derive(Debug, Deserialize)]
pub(super) struct UpdateCategoryRequest {
    id: DatabaseID,
    name: String,
    color: String,
}

/// The payload for deleting a category.
#[derive(Debug, Deserialize)]
pub(super) struct DeleteCategoryRequest {
    id: DatabaseID,
}

/// A route handler for creating a new category.
///
/// The category is owned by the authenticated user; any owner in the payload
/// is ignored.
pub(super) async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<NewCategoryRequest>,
) -> Result<Json<Category>, Error> {
    let name = CategoryName::new(&payload.name)?;
    let color = CategoryColor::new(&payload.color)?;

    let category = state.category_store.create(name, color, claims.user_id)?;

    Ok(Json(category))
}

/// A route handler for listing the authenticated user's categories.
pub(super) async fn list(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<Category>>, Error> {
    let categories = state.category_store.get_by_user(claims.user_id)?;

    Ok(Json(categories))
}

/// A route handler for renaming and recoloring a category.
pub(super) async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<StatusCode, Error> {
    let name = CategoryName::new(&payload.name)?;
    let color = CategoryColor::new(&payload.color)?;

    let category = state.category_store.get(payload.id)?;
    let category = authorize(claims.user_id, category)?;

    state.category_store.update(category.id(), name, color)?;

    Ok(StatusCode::OK)
}

/// A route handler for deleting a category.
///
/// Transactions recorded against the category are deleted with it.
pub(super) async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<DeleteCategoryRequest>,
) -> Result<StatusCode, Error> {
    let category = state.category_store.get(payload.id)?;
    let category = authorize(claims.user_id, category)?;

    state.category_store.delete(category.id())?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod category_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, models::Category, routes::build_router, routes::user::TokenResponse};

    fn new_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection, "a-test-secret")
            .expect("Could not initialize app state.");

        TestServer::new(build_router(state))
    }

    async fn sign_up(server: &TestServer, login: &str) -> String {
        server
            .post("/user/register")
            .json(&json!({ "login": login, "password": "hunter2" }))
            .await
            .assert_status_ok();

        server
            .post("/user/log_in")
            .json(&json!({ "login": login, "password": "hunter2" }))
            .await
            .json::<TokenResponse>()
            .token
    }

    async fn create_category(server: &TestServer, token: &str, name: &str) -> Category {
        let response = server
            .post("/category")
            .authorization_bearer(token)
            .json(&json!({ "name": name, "color": "#00ff00" }))
            .await;

        response.assert_status_ok();
        response.json::<Category>()
    }

    #[tokio::test]
    async fn create_and_list_categories() {
        let server = new_test_server();
        let token = sign_up(&server, "alice").await;

        let food = create_category(&server, &token, "Food").await;
        let transport = create_category(&server, &token, "Transport").await;

        let response = server.get("/category").authorization_bearer(&token).await;

        response.assert_status_ok();
        let got = response.json::<Vec<Category>>();
        assert_eq!(got, vec![food, transport]);
    }

    #[tokio::test]
    async fn create_rejects_an_empty_name() {
        let server = new_test_server();
        let token = sign_up(&server, "alice").await;

        server
            .post("/category")
            .authorization_bearer(&token)
            .json(&json!({ "name": "", "color": "#00ff00" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_requires_a_token() {
        let server = new_test_server();

        server
            .post("/category")
            .json(&json!({ "name": "Food", "color": "#00ff00" }))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn list_only_shows_the_callers_categories() {
        let server = new_test_server();
        let alice = sign_up(&server, "alice").await;
        let bob = sign_up(&server, "bob").await;

        create_category(&server, &alice, "Food").await;

        let response = server.get("/category").authorization_bearer(&bob).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Category>>(), Vec::new());
    }

    #[tokio::test]
    async fn update_renames_a_category() {
        let server = new_test_server();
        let token = sign_up(&server, "alice").await;
        let food = create_category(&server, &token, "Food").await;

        server
            .put("/category")
            .authorization_bearer(&token)
            .json(&json!({ "id": food.id(), "name": "Groceries", "color": "#008800" }))
            .await
            .assert_status_ok();

        let got = server
            .get("/category")
            .authorization_bearer(&token)
            .await
            .json::<Vec<Category>>();
        assert_eq!(got[0].name().as_ref(), "Groceries");
    }

    #[tokio::test]
    async fn update_of_another_users_category_reports_not_found() {
        let server = new_test_server();
        let alice = sign_up(&server, "alice").await;
        let bob = sign_up(&server, "bob").await;
        let food = create_category(&server, &alice, "Food").await;

        server
            .put("/category")
            .authorization_bearer(&bob)
            .json(&json!({ "id": food.id(), "name": "Mine now", "color": "#000000" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Alice's category is untouched.
        let got = server
            .get("/category")
            .authorization_bearer(&alice)
            .await
            .json::<Vec<Category>>();
        assert_eq!(got[0].name().as_ref(), "Food");
    }

    #[tokio::test]
    async fn delete_removes_a_category() {
        let server = new_test_server();
        let token = sign_up(&server, "alice").await;
        let food = create_category(&server, &token, "Food").await;
        let transport = create_category(&server, &token, "Transport").await;

        server
            .delete("/category")
            .authorization_bearer(&token)
            .json(&json!({ "id": transport.id() }))
            .await
            .assert_status_ok();

        let got = server
            .get("/category")
            .authorization_bearer(&token)
            .await
            .json::<Vec<Category>>();
        assert_eq!(got, vec![food]);
    }

    #[tokio::test]
    async fn delete_of_another_users_category_reports_not_found() {
        let server = new_test_server();
        let alice = sign_up(&server, "alice").await;
        let bob = sign_up(&server, "bob").await;
        let food = create_category(&server, &alice, "Food").await;

        server
            .delete("/category")
            .authorization_bearer(&bob)
            .json(&json!({ "id": food.id() }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // A delete of a category that does not exist at all looks identical.
        server
            .delete("/category")
            .authorization_bearer(&bob)
            .json(&json!({ "id": food.id() + 999 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
