//! Integration tests for the cross-source search, restricted to user recipes
//! so no third-party API is contacted

mod common;

use axum::http::StatusCode;
use fake::Fake;
use serde_json::json;

fn unique_ingredient() -> String {
    format!("ingredient{}", (0..u64::MAX).fake::<u64>())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_search_returns_public_user_recipes_only() {
    let app = common::TestApp::new().await;
    let cook = app.register_user().await;
    let searcher = app.register_user().await;
    let ingredient = unique_ingredient();

    let public_id = app
        .create_recipe(
            &cook,
            json!({"title": "Open", "ingredients": [{"name": ingredient}], "isPublic": true}),
        )
        .await;
    app.create_recipe(
        &cook,
        json!({"title": "Hidden", "ingredients": [{"name": ingredient}], "isPublic": false}),
    )
    .await;

    let (status, results) = app
        .get(
            &format!("/api/v1/recipes/search?source=user&ingredients={}", ingredient),
            &searcher.token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        results,
        json!([{"id": public_id.to_string(), "title": "Open", "imageSource": null, "source": "User"}])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_search_excludes_disliked() {
    let app = common::TestApp::new().await;
    let cook = app.register_user().await;
    let searcher = app.register_user().await;
    let ingredient = unique_ingredient();

    let disliked = app
        .create_recipe(
            &cook,
            json!({"title": "Meh", "ingredients": [{"name": ingredient}], "isPublic": true}),
        )
        .await;
    let liked = app
        .create_recipe(
            &cook,
            json!({"title": "Yum", "ingredients": [{"name": ingredient}], "isPublic": true}),
        )
        .await;

    app.put(
        &format!("/api/v1/opinions/User/{}", disliked),
        &searcher.token,
        json!({"userOpinion": "dislike"}),
    )
    .await;

    let base = format!("/api/v1/recipes/search?source=User&ingredients={}", ingredient);

    let (_, all) = app.get(&base, &searcher.token).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = app
        .get(&format!("{}&excludeDisliked=true", base), &searcher.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![liked.to_string()]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_search_rejects_too_many_ingredients() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;

    let query: Vec<String> = (0..11).map(|i| format!("ingredients=i{}", i)).collect();
    let (status, _) = app
        .get(&format!("/api/v1/recipes/search?source=User&{}", query.join("&")), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unknown_source_matches_nothing() {
    let app = common::TestApp::new().await;
    let user = app.register_user().await;

    let (status, results) = app
        .get("/api/v1/recipes/search?source=pinterest", &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(results, json!([]));
}
