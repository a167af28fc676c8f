mod common;

use recipehub::models::{report, user_sanction, Report, ReportStatus, UserSanction};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};

#[tokio::test]
async fn duplicate_pending_report_conflicts() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "r_author").await;
    let (reporter_id, token) = common::create_test_member(&app, "reporter").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Suspicious").await;
    let url = app.url(&format!("/recipes/{}/report", recipe_id));

    let resp = app
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "reason": "Spam" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["target_type"], "RECIPE");
    assert_eq!(body["data"]["recipe_id"], recipe_id);
    assert_eq!(body["data"]["reporter_id"], reporter_id);
    assert!(body["data"]["comment_id"].is_null());

    let resp = app
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "reason": "Still spam" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "conflict");

    assert_eq!(Report::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_duplicate_reports_leave_one_pending() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "cr_author").await;
    let (_, token) = common::create_test_member(&app, "cr_reporter").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Contested").await;

    let url = app.url(&format!("/recipes/{}/report", recipe_id));
    let requests = (0..4).map(|i| {
        app.client
            .post(url.clone())
            .bearer_auth(token.clone())
            .json(&json!({ "reason": format!("spam #{}", i) }))
            .send()
    });
    let statuses: Vec<u16> = common::send_all(requests)
        .await
        .iter()
        .map(|resp| resp.status().as_u16())
        .collect();
    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1, "{:?}", statuses);
    assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 3, "{:?}", statuses);

    let pending = Report::find()
        .filter(report::Column::Status.eq(ReportStatus::Pending))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(pending, 1);
}

#[tokio::test]
async fn report_validation_and_missing_target() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "r_edge").await;
    let recipe_id = common::create_recipe(&app, &token, "Edge").await;

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/report", recipe_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = app
        .client
        .post(app.url("/comments/8080/report"))
        .bearer_auth(&token)
        .json(&json!({ "reason": "gone" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn admin_reports_are_admin_only() {
    let app = common::spawn_app().await;
    let (_, token) = common::create_test_member(&app, "not_admin").await;

    let resp = app
        .client
        .get(app.url("/admin/reports"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = app
        .client
        .patch(app.url("/admin/reports/1"))
        .bearer_auth(&token)
        .json(&json!({ "status": "RESOLVED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn listing_defaults_to_pending_newest_first() {
    let app = common::spawn_app().await;
    let (_, admin_token) = common::create_admin(&app).await;
    let (_, author_token) = common::create_test_member(&app, "l_author").await;
    let (_, token) = common::create_test_member(&app, "l_reporter").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Listed").await;
    let comment_id = common::create_comment(&app, &author_token, recipe_id, "meh").await;

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/report", recipe_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "first" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let first_report = body["data"]["report_id"].as_i64().unwrap();

    let resp = app
        .client
        .post(app.url(&format!("/comments/{}/report", comment_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "second" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let second_report = body["data"]["report_id"].as_i64().unwrap();
    assert_eq!(body["data"]["target_type"], "COMMENT");

    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", first_report)))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "REJECTED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .get(app.url("/admin/reports"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["report_id"], second_report);

    let resp = app
        .client
        .get(app.url("/admin/reports?status=REJECTED"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["items"][0]["report_id"], first_report);

    let resp = app
        .client
        .get(app.url("/admin/reports?status=BOGUS"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn resolving_issues_warning_to_content_owner() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_admin(&app).await;
    let (author_id, author_token) = common::create_test_member(&app, "offender").await;
    let (_, token) = common::create_test_member(&app, "whistle").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Offending").await;
    let comment_id = common::create_comment(&app, &author_token, recipe_id, "bad words").await;

    let resp = app
        .client
        .post(app.url(&format!("/comments/{}/report", comment_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "abusive" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let report_id = body["data"]["report_id"].as_i64().unwrap();

    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "RESOLVED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let report = &body["data"]["report"];
    assert_eq!(report["status"], "RESOLVED");
    assert_eq!(report["handled_by"], admin_id);
    assert!(report["handled_at"].is_string());

    let sanction = &body["data"]["sanction"];
    assert_eq!(sanction["member_id"], author_id);
    assert_eq!(sanction["sanction"], "WARNING");
    assert_eq!(
        sanction["reason"],
        format!("Sanction issued for report #{}", report_id)
    );
    assert_eq!(sanction["created_by"], admin_id);

    // Terminal: a second decision is refused
    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "REJECTED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let resp = app
        .client
        .get(app.url(&format!("/admin/members/{}/sanctions", author_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    assert_eq!(UserSanction::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_resolutions_issue_one_sanction() {
    let app = common::spawn_app().await;
    let (_, admin_token) = common::create_admin(&app).await;
    let (author_id, author_token) = common::create_test_member(&app, "cs_author").await;
    let (_, token) = common::create_test_member(&app, "cs_reporter").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Twice judged").await;

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/report", recipe_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "copied" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let report_id = body["data"]["report_id"].as_i64().unwrap();

    let url = app.url(&format!("/admin/reports/{}", report_id));
    let requests = (0..4).map(|_| {
        app.client
            .patch(url.clone())
            .bearer_auth(admin_token.clone())
            .json(&json!({ "status": "RESOLVED" }))
            .send()
    });
    let statuses: Vec<u16> = common::send_all(requests)
        .await
        .iter()
        .map(|resp| resp.status().as_u16())
        .collect();
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1, "{:?}", statuses);
    assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 3, "{:?}", statuses);

    let sanctions = UserSanction::find()
        .filter(user_sanction::Column::MemberId.eq(author_id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(sanctions, 1);
}

#[tokio::test]
async fn note_becomes_sanction_reason_and_rejection_issues_none() {
    let app = common::spawn_app().await;
    let (_, admin_token) = common::create_admin(&app).await;
    let (_, author_token) = common::create_test_member(&app, "noted").await;
    let (_, token) = common::create_test_member(&app, "noter").await;
    let kept = common::create_recipe(&app, &author_token, "Kept").await;
    let removed = common::create_recipe(&app, &author_token, "Removed").await;

    let mut report_ids = Vec::new();
    for recipe_id in [kept, removed] {
        let resp = app
            .client
            .post(app.url(&format!("/recipes/{}/report", recipe_id)))
            .bearer_auth(&token)
            .json(&json!({ "reason": "copied" }))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        report_ids.push(body["data"]["report_id"].as_i64().unwrap());
    }

    // Rejected: no sanction
    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_ids[0])))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "REJECTED", "handle_note": "  not copied  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["report"]["handle_note"], "not copied");
    assert!(body["data"]["sanction"].is_null());

    // Target deleted before resolution: status still changes, no sanction
    let resp = app
        .client
        .delete(app.url(&format!("/recipes/{}", removed)))
        .bearer_auth(&author_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_ids[1])))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "RESOLVED", "handle_note": "plagiarism" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["report"]["status"], "RESOLVED");
    assert!(body["data"]["report"]["recipe_id"].is_null());
    assert!(body["data"]["sanction"].is_null());

    assert_eq!(UserSanction::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn note_only_update_keeps_report_pending() {
    let app = common::spawn_app().await;
    let (_, admin_token) = common::create_admin(&app).await;
    let (_, author_token) = common::create_test_member(&app, "pending_a").await;
    let (_, token) = common::create_test_member(&app, "pending_r").await;
    let recipe_id = common::create_recipe(&app, &author_token, "Pending").await;

    let resp = app
        .client
        .post(app.url(&format!("/recipes/{}/report", recipe_id)))
        .bearer_auth(&token)
        .json(&json!({ "reason": "odd" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let report_id = body["data"]["report_id"].as_i64().unwrap();

    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "handle_note": "looking into it" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["report"]["status"], "PENDING");
    assert_eq!(body["data"]["report"]["handle_note"], "looking into it");
    assert!(body["data"]["sanction"].is_null());

    let resp = app
        .client
        .patch(app.url(&format!("/admin/reports/{}", report_id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "CLOSED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn deleting_several_reported_recipes_keeps_reports() {
    let app = common::spawn_app().await;
    let (_, author_token) = common::create_test_member(&app, "multi_a").await;
    let (_, token) = common::create_test_member(&app, "multi_r").await;

    for title in ["Gone one", "Gone two"] {
        let recipe_id = common::create_recipe(&app, &author_token, title).await;
        let resp = app
            .client
            .post(app.url(&format!("/recipes/{}/report", recipe_id)))
            .bearer_auth(&token)
            .json(&json!({ "reason": "dup" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let resp = app
            .client
            .delete(app.url(&format!("/recipes/{}", recipe_id)))
            .bearer_auth(&author_token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }

    assert_eq!(Report::find().count(&app.db).await.unwrap(), 2);
}
