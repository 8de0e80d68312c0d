//! Integration tests for recipe CRUD, ownership and filtering

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn pancakes() -> serde_json::Value {
    json!({
        "title": "Pancakes",
        "ingredients": [
            {"name": "Flour", "quantity": "200 g"},
            {"name": "Milk", "quantity": "300 ml"},
            {"name": "Egg", "quantity": "2"}
        ],
        "steps": ["Whisk everything", "Fry in a hot pan"],
        "dietaryPreferences": ["Vegetarian"],
        "cookingTime": "20 min",
        "cuisine": "European",
        "isPublic": true
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_and_get_recipe() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;

    let (status, created) = app.post("/api/v1/recipes", &user.token, pancakes()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Pancakes");
    assert_eq!(created["ingredients"].as_array().unwrap().len(), 3);
    assert_eq!(created["ingredients"][0]["name"], "Flour");
    assert_eq!(created["cuisine"], "European");
    assert_eq!(created["dietaryPreferences"][0], "Vegetarian");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/v1/recipes/{}", id), &user.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["steps"], json!(["Whisk everything", "Fry in a hot pan"]));
    assert_eq!(fetched["cookingTime"], "20 min");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_validation_errors_report_fields() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;

    let body = json!({
        "title": "",
        "ingredients": [{"name": "x".repeat(51)}],
        "steps": []
    });
    let (status, error) = app.post("/api/v1/recipes", &user.token, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = error["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"title".to_string()));
    assert!(fields.contains(&"ingredients[0].name".to_string()));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_only_returns_own_recipes() {
    let app = common::TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;

    let alice_recipe = app.create_recipe(&alice, pancakes()).await;
    app.create_recipe(&bob, pancakes()).await;

    let (status, list) = app.get("/api/v1/recipes", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = list.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![alice_recipe]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_replaces_fields_and_keeps_ingredients_when_absent() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;
    let id = app.create_recipe(&user, pancakes()).await;
    let path = format!("/api/v1/recipes/{}", id);

    let (status, updated) = app
        .put(&path, &user.token, json!({"title": "Crepes", "isPublic": false}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Crepes");
    assert_eq!(updated["isPublic"], false);
    assert_eq!(updated["steps"], json!([]));
    assert_eq!(updated["cuisine"], serde_json::Value::Null);
    assert_eq!(updated["ingredients"].as_array().unwrap().len(), 3);

    let (status, updated) = app
        .put(
            &path,
            &user.token,
            json!({"title": "Crepes", "ingredients": [{"name": "Buckwheat flour"}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(updated["ingredients"][0]["name"], "Buckwheat flour");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_other_users_cannot_modify() {
    let app = common::TestApp::new().await;
    let owner = app.register_user().await;
    let intruder = app.register_user().await;
    let id = app.create_recipe(&owner, pancakes()).await;
    let path = format!("/api/v1/recipes/{}", id);

    let (status, _) = app.put(&path, &intruder.token, pancakes()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&path, &intruder.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // missing recipes look the same to non-owners
    let (status, _) = app.delete("/api/v1/recipes/999999999", &intruder.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_can_modify_and_gets_404_for_missing() {
    let app = common::TestApp::new().await;
    let owner = app.register_user().await;
    let admin = app.register_admin().await;
    let id = app.create_recipe(&owner, pancakes()).await;

    let (status, _) = app.delete("/api/v1/recipes/999999999", &admin.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&format!("/api/v1/recipes/{}", id), &admin.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&format!("/api/v1/recipes/{}", id), &owner.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_filter_own_recipes() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;

    let pancakes_id = app.create_recipe(&user, pancakes()).await;
    app.create_recipe(
        &user,
        json!({
            "title": "Dal",
            "ingredients": [{"name": "Red lentils"}, {"name": "Turmeric"}],
            "dietaryPreferences": ["Vegan", "Gluten-Free"],
            "cuisine": "Asian"
        }),
    )
    .await;

    let (status, list) = app
        .get("/api/v1/recipes?ingredients=egg&ingredients=%20MILK", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = list.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![pancakes_id]);

    let (_, list) = app
        .get("/api/v1/recipes?cuisine=ASIAN&dietaryPreferences=Vegan", &user.token)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Dal");

    let (_, list) = app.get("/api/v1/recipes?isPublic=false", &user.token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Dal");
}
