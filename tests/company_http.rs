//! End-to-end tests for company-scoped resources over HTTP: membership, candidates
//! and résumés, the question bank, notifications, calendars and the careers page.

mod common;

use axum::http::{Method, StatusCode};
use common::{Session, TestApp};
use serde_json::json;

async fn add_hiring_manager(
    app: &TestApp,
    admin: &Session,
    company_id: &str,
    job_id: &str,
) -> Session {
    let manager = app.register("manager@acme.test").await;
    let (status, body) = app
        .post(
            &format!("/api/v1/companies/{company_id}/members"),
            &admin.token,
            json!({ "email": "manager@acme.test", "role": "HIRING_MANAGER" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app
        .post(
            &format!("/api/v1/jobs/{job_id}/hiring-team"),
            &admin.token,
            json!({ "userId": manager.user_id, "role": "HIRING_MANAGER" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    manager
}

#[tokio::test]
async fn test_members_see_their_companies() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let manager = add_hiring_manager(&app, &admin, &company_id, &job_id).await;

    let (status, body) = app.get("/api/v1/my-companies", &manager.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], company_id.as_str());

    let (status, _) = app
        .post(
            &format!("/api/v1/companies/{company_id}/members"),
            &admin.token,
            json!({ "email": "manager@acme.test", "role": "REVIEWER" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let outsider = app.register("outsider@else.test").await;
    let (status, _) = app
        .get(&format!("/api/v1/companies/{company_id}"), &outsider.token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_candidate_upload_preview_and_download() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let resume = b"Ada Lovelace, analytical engines";

    let (status, body) = app
        .submit_candidate(&admin, &job_id, "ada@candidates.test", Some(("cv.txt", resume)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let candidate_id = body["data"]["id"].as_str().unwrap_or_default().to_string();
    let resume_url = body["data"]["resumeUrl"].as_str().unwrap_or_default();
    assert!(resume_url.starts_with("/uploads/resumes/"), "{resume_url}");
    assert!(resume_url.ends_with(".txt"));
    assert_eq!(body["data"]["applications"][0]["status"], "ACTIVE");

    let (status, body) = app
        .get(&format!("/api/v1/candidates/{candidate_id}"), &admin.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["resumeContent"], "Ada Lovelace, analytical engines");

    let (status, body) = app
        .get(
            &format!("/api/v1/candidates/{candidate_id}/download-cv"),
            &admin.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ada Lovelace, analytical engines");

    let (status, _) = app
        .submit_candidate(&admin, &job_id, "ADA@candidates.test", None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_candidate_without_resume_has_nothing_to_download() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;

    let (status, body) = app
        .submit_candidate(&admin, &job_id, "grace@candidates.test", None)
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let candidate_id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = app
        .get(
            &format!("/api/v1/candidates/{candidate_id}/download-cv"),
            &admin.token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_candidate_form_is_validated() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    app.create_job(&admin, &company_id).await;

    let (status, body) = app
        .submit_candidate(&admin, "not-a-job", "not-an-email", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(common::error_paths(&body).contains(&"email".to_string()), "{body}");
}

#[tokio::test]
async fn test_question_in_a_set_cannot_be_deleted() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;

    let (status, body) = app
        .post(
            &format!("/api/v1/questions/company/{company_id}"),
            &admin.token,
            json!({ "text": "Why do you want this role?", "responseType": "paragraph" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let question_id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = app
        .post(
            &format!("/api/v1/questions/company/{company_id}/sets"),
            &admin.token,
            json!({ "name": "Screening", "questionIds": [question_id] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let set_id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let question_uri = format!("/api/v1/questions/{question_id}");
    let (status, body) = app.delete(&question_uri, &admin.token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot delete question: it is used in one or more question sets."
    );

    let (status, _) = app
        .delete(&format!("/api/v1/questions/sets/{set_id}"), &admin.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&question_uri, &admin.token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dropdown_question_needs_options() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/questions/company/{company_id}"),
            &admin.token,
            json!({ "text": "Preferred office", "responseType": "dropdown" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_candidate_notifies_hiring_team() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let manager = add_hiring_manager(&app, &admin, &company_id, &job_id).await;

    app.apply(&admin, &job_id, "ada@candidates.test").await;
    app.apply(&admin, &job_id, "grace@candidates.test").await;

    let (status, body) = app.get("/api/v1/notifications", &manager.token).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["unreadCount"], 2);
    assert_eq!(body["pagination"]["totalItems"], 2);
    assert_eq!(body["data"][0]["type"], "NEW_CANDIDATE");

    let first = body["data"][0]["id"].as_str().unwrap_or_default().to_string();
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v1/notifications/{first}/read"),
            Some(&manager.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isRead"], true);

    let (_, body) = app
        .get("/api/v1/notifications?unreadOnly=true", &manager.token)
        .await;
    assert_eq!(body["unreadCount"], 1);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/v1/notifications/read-all",
            Some(&manager.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "1 notifications marked as read.");
}

#[tokio::test]
async fn test_manual_notifications_need_platform_admin() {
    let app = TestApp::new();
    let (admin, _) = app.admin_with_company("owner@acme.test").await;
    let user = app.register("someone@acme.test").await;
    let payload = json!({
        "userId": user.user_id,
        "type": "GENERAL",
        "message": "Welcome aboard",
    });

    let (status, _) = app
        .post("/api/v1/notifications", &user.token, payload.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.post("/api/v1/notifications", &admin.token, payload).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let (_, body) = app.get("/api/v1/notifications", &user.token).await;
    assert_eq!(body["unreadCount"], 1);
}

#[tokio::test]
async fn test_calendar_connect_and_callback() {
    let app = TestApp::new();
    let user = app.register("calendar@acme.test").await;

    let (status, body) = app
        .post(
            "/api/v1/integrations/calendar/GOOGLE_WORKSPACE/connect",
            &user.token,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let auth_url = body["data"]["authUrl"].as_str().unwrap_or_default();
    assert!(auth_url.starts_with("https://accounts.google.com/"), "{auth_url}");
    assert!(auth_url.contains(&format!("state={}", user.user_id)), "{auth_url}");

    let (status, body) = app
        .call(
            Method::GET,
            &format!(
                "/api/v1/integrations/calendar/GOOGLE_WORKSPACE/callback?code=abc123&state={}",
                user.user_id
            ),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["provider"], "GOOGLE_WORKSPACE");
    assert!(body["data"]["accessTokenEncrypted"].is_null());

    let (_, body) = app.get("/api/v1/integrations/calendar", &user.token).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, _) = app
        .delete(
            "/api/v1/integrations/calendar/GOOGLE_WORKSPACE",
            &user.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/v1/integrations/calendar", &user.token).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_unconfigured_calendar_provider_fails() {
    let app = TestApp::new();
    let user = app.register("calendar@acme.test").await;
    let (status, _) = app
        .post(
            "/api/v1/integrations/calendar/MS_365_OUTLOOK/connect",
            &user.token,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_careers_page_lists_published_jobs_publicly() {
    let app = TestApp::new();
    let (admin, company_id) = app.admin_with_company("owner@acme.test").await;
    let job_id = app.create_job(&admin, &company_id).await;
    let (status, _) = app
        .post(
            &format!("/api/v1/jobs/company/{company_id}"),
            &admin.token,
            json!({
                "title": "Draft role",
                "description": "Not yet public",
                "employmentType": "PART_TIME",
                "workType": "ONSITE",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/v1/careers-page/company/{company_id}/jobs"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["data"][0]["id"], job_id.as_str());

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/v1/careers-page/jobs/{job_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Backend Engineer");
}
