mod common;

use recipehub::models::{Rating, RecipeLike};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};

#[tokio::test]
async fn like_toggle_returns_to_original_state() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "liked_author").await;
    let (_, token) = common::create_test_member(&app, "liker").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Pancakes").await;

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/like", recipe_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["like_count"], 1);

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/like", recipe_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["like_count"], 0);

    assert_eq!(RecipeLike::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn like_requires_auth_and_existing_recipe() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "like_edge").await;

    let resp = app
        .client
        .post(app.url("/recipes/1/like"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = app
        .client
        .post(app.url("/recipes/999/like"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn concurrent_likes_keep_one_row_per_member() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "race_author").await;
    let (_, token) = common::create_test_member(&app, "racer").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Race").await;

    let url = app.url(&format!("/recipes/{}/like", recipe_id));
    let requests = (0..4).map(|_| {
        app.client
            .post(url.clone())
            .bearer_auth(token.clone())
            .send()
    });
    for resp in common::send_all(requests).await {
        assert!(resp.status().is_success());
    }

    // Four toggles in any order: never more than one row
    assert!(RecipeLike::find().count(&app.db).await.unwrap() <= 1);
}

#[tokio::test]
async fn rating_upsert_keeps_latest_score() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "rated_author").await;
    let (_, token) = common::create_test_member(&app, "rater").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Curry").await;
    let url = app.url(&format!("/recipes/{}/rating", recipe_id));

    let resp = app
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "score": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["avg_score"], 5.0);
    assert_eq!(body["data"]["rating_count"], 1);

    let resp = app
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "score": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["avg_score"], 3.0);
    assert_eq!(body["data"]["rating_count"], 1);
    assert_eq!(body["data"]["my_score"], 3);

    assert_eq!(Rating::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn rating_aggregate_rounds_and_clears() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "avg_author").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Average").await;
    let url = app.url(&format!("/recipes/{}/rating", recipe_id));

    let mut tokens = Vec::new();
    for (i, score) in [5, 4, 4].into_iter().enumerate() {
        let (_, token) = common::create_test_member(&app, &format!("avg_rater{}", i)).await;
        let resp = app
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "score": score }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        tokens.push(token);
    }

    // 13 / 3 = 4.333..
    let resp = app.client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["avg_score"], 4.33);
    assert_eq!(body["data"]["rating_count"], 3);
    assert!(body["data"]["my_score"].is_null());

    // my_score shows up for a signed-in rater
    let resp = app
        .client
        .get(&url)
        .bearer_auth(&tokens[0])
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["my_score"], 5);

    for token in &tokens {
        let resp = app
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = app
        .client
        .get(app.url(&format!("/recipes/{}", recipe_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["avg_score"].is_null());
    assert_eq!(body["data"]["rating_count"], 0);
}

#[tokio::test]
async fn rating_rejects_out_of_range_and_missing_rows() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "range").await;
    let recipe_id = common::create_recipe(&app, &token, "Ranged").await;
    let url = app.url(&format!("/recipes/{}/rating", recipe_id));

    for score in [0, 6] {
        let resp = app
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "score": score }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }

    let resp = app
        .client
        .delete(&url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = app
        .client
        .post(app.url("/recipes/31337/rating"))
        .bearer_auth(&token)
        .json(&json!({ "score": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn concurrent_ratings_keep_one_row_per_member() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "rrace_author").await;
    let (_, token) = common::create_test_member(&app, "rracer").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Rated race").await;

    let url = app.url(&format!("/recipes/{}/rating", recipe_id));
    let requests = (1..=5).map(|score| {
        app.client
            .post(url.clone())
            .bearer_auth(token.clone())
            .json(&json!({ "score": score }))
            .send()
    });
    let statuses: Vec<u16> = common::send_all(requests)
        .await
        .iter()
        .map(|resp| resp.status().as_u16())
        .collect();
    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1, "{:?}", statuses);
    assert!(statuses.iter().all(|s| *s == 201 || *s == 200), "{:?}", statuses);

    assert_eq!(Rating::find().count(&app.db).await.unwrap(), 1);

    let resp = app.client.get(&url).bearer_auth(&token).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["rating_count"], 1);
    assert_eq!(body["data"]["avg_score"].as_f64(), body["data"]["my_score"].as_f64());
}

#[tokio::test]
async fn malformed_rating_body_is_a_validation_error() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "malformed").await;
    let recipe_id = common::create_recipe(&app, &token, "Malformed").await;
    let url = app.url(&format!("/recipes/{}/rating", recipe_id));

    for payload in [json!({ "score": "five" }), json!({ "score": 3.5 }), json!({})] {
        let resp = app
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "payload {}", payload);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["kind"], "validation");
    }

    let resp = app
        .client
        .post(&url)
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{\"score\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "validation");

    assert_eq!(Rating::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn anonymous_read_with_bad_token_is_rejected() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "badread").await;
    let recipe_id = common::create_recipe(&app, &token, "Readable").await;

    let resp = app
        .client
        .get(app.url(&format!("/recipes/{}/rating", recipe_id)))
        .bearer_auth("garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
