//! End-to-end tests for the hiring pipeline over HTTP: workflow templates, job
//! assignment, stage overrides, application progress and rating cards.

mod common;

use axum::http::StatusCode;
use common::{error_paths, TestApp};
use serde_json::{json, Value};

async fn stage_ids(app: &TestApp, token: &str, job_id: &str) -> Vec<String> {
    let (status, body) = app
        .get(&format!("/api/v1/workflows/jobs/{job_id}"), token)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["stages"]
        .as_array()
        .map(|stages| {
            stages
                .iter()
                .filter_map(|s| s["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_stage_weight_above_ten_is_rejected() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;

    let (status, body) = app
        .post(
            &format!("/api/v1/workflows/company/{company_id}/templates"),
            &admin.token,
            json!({
                "name": "Weighted",
                "stages": [{
                    "name": "Interview",
                    "type": "INTERVIEW",
                    "order": 0,
                    "settings": { "scoringCriteria": [{ "name": "Depth", "weight": 11 }] },
                }],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_paths(&body),
        ["stages.0.settings.scoringCriteria.0.weight"]
    );
}

#[tokio::test]
async fn test_template_listing_shows_stage_previews() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    app.create_pipeline(&admin, &company_id).await;

    let (status, body) = app
        .get(
            &format!("/api/v1/workflows/company/{company_id}/templates"),
            &admin.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["stageCount"], 3);
    assert_eq!(body["data"][0]["stages"][1]["type"], "SCREENING");
}

#[tokio::test]
async fn test_reassignment_discards_stage_overrides() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let template_id = app.create_pipeline(&admin, &company_id).await;

    let assigned = app.assign(&admin, &job_id, &template_id).await;
    let first_stage = assigned["stages"][0]["id"].as_str().unwrap_or_default();

    let (status, body) = app
        .put(
            &format!("/api/v1/workflows/jobs/{job_id}/stages/{first_stage}/settings"),
            &admin.token,
            json!({ "settings": { "timeLimit": 5 } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["settings"]["timeLimit"], 5);

    let reassigned = app.assign(&admin, &job_id, &template_id).await;
    assert_eq!(reassigned["id"], assigned["id"]);
    let stages = reassigned["stages"].as_array().cloned().unwrap_or_default();
    assert_eq!(stages.len(), 3);
    assert!(stages.iter().all(|s| s["settings"] == json!({})));
    assert!(stages.iter().all(|s| s["id"] != first_stage));
}

#[tokio::test]
async fn test_override_of_foreign_stage_is_not_found() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let template_id = app.create_pipeline(&admin, &company_id).await;
    let job_a = app.create_job(&admin, &company_id).await;
    let job_b = app.create_job(&admin, &company_id).await;
    app.assign(&admin, &job_a, &template_id).await;
    app.assign(&admin, &job_b, &template_id).await;

    let foreign = stage_ids(&app, &admin.token, &job_b).await.remove(0);
    let (status, _) = app
        .put(
            &format!("/api/v1/workflows/jobs/{job_a}/stages/{foreign}/settings"),
            &admin.token,
            json!({ "settings": { "timeLimit": 5 } }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_application_progresses_through_stages() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let template_id = app.create_pipeline(&admin, &company_id).await;
    app.assign(&admin, &job_id, &template_id).await;
    let stages = stage_ids(&app, &admin.token, &job_id).await;

    let application_id = app.apply(&admin, &job_id, "ada@candidates.test").await;
    let (_, body) = app
        .get(&format!("/api/v1/applications/{application_id}"), &admin.token)
        .await;
    assert_eq!(body["data"]["currentStageId"], stages[0].as_str());

    let (status, body) = app
        .post(
            &format!("/api/v1/workflows/applications/{application_id}/progress"),
            &admin.token,
            json!({ "action": "PROGRESS", "comment": "Strong CV" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["application"]["currentStageId"], stages[1].as_str());
    assert_eq!(body["data"]["transition"]["fromStageId"], stages[0].as_str());

    let (status, body) = app
        .post(
            &format!("/api/v1/workflows/applications/{application_id}/progress"),
            &admin.token,
            json!({ "action": "COMPLETE" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["application"]["status"], "HIRED");

    let (status, body) = app
        .get(
            &format!("/api/v1/workflows/applications/{application_id}/history"),
            &admin.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

async fn rating_setup(app: &TestApp, card_type: &str) -> (common::Session, String, String, Value) {
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let template_id = app.create_pipeline(&admin, &company_id).await;
    app.assign(&admin, &job_id, &template_id).await;
    let stage_id = stage_ids(app, &admin.token, &job_id).await.remove(0);
    let application_id = app.apply(&admin, &job_id, "ada@candidates.test").await;

    let (status, card) = app
        .post(
            &format!("/api/v1/ratings/company/{company_id}/templates"),
            &admin.token,
            json!({
                "name": "Interview card",
                "type": card_type,
                "categories": [
                    { "name": "Skills", "order": 0 },
                    { "name": "Culture", "order": 1 },
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{card}");
    (admin, application_id, stage_id, card["data"].clone())
}

#[tokio::test]
async fn test_overall_score_above_five_is_rejected() {
    let app = TestApp::new();
    let (admin, application_id, stage_id, card) = rating_setup(&app, "BASIC").await;

    let (status, body) = app
        .post(
            &format!("/api/v1/ratings/applications/{application_id}"),
            &admin.token,
            json!({
                "templateId": card["id"],
                "jobWorkflowStageId": stage_id,
                "overallScore": 6,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_paths(&body), ["overallScore"]);
}

#[tokio::test]
async fn test_categorized_card_requires_category_scores() {
    let app = TestApp::new();
    let (admin, application_id, stage_id, card) = rating_setup(&app, "CATEGORIZED").await;
    let uri = format!("/api/v1/ratings/applications/{application_id}");

    let (status, body) = app
        .post(
            &uri,
            &admin.token,
            json!({
                "templateId": card["id"],
                "jobWorkflowStageId": stage_id,
                "overallScore": 4,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_paths(&body), ["categoryScores"]);

    let (status, body) = app
        .post(
            &uri,
            &admin.token,
            json!({
                "templateId": card["id"],
                "jobWorkflowStageId": stage_id,
                "overallScore": 4,
                "comments": "Solid",
                "categoryScores": [
                    { "categoryId": card["categories"][0]["id"], "score": 5 },
                    { "categoryId": card["categories"][1]["id"], "score": 3 },
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app.get(&uri, &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["overallScore"], 4);
}
