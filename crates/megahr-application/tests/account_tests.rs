//! Accounts, candidates and calendar connections

mod common;

use megahr_application::dto::{CreateCandidateCommand, LoginCommand, RegisterCommand, ResumeUpload};
use megahr_application::errors::ApplicationError;
use megahr_domain::entities::{CalendarProvider, NotificationType};
use megahr_domain::repositories::{IntegrationRepository, NotificationRepository};
use megahr_domain::roles::{CompanyMemberRole, UserRole};

use common::world;

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let w = world();
    let registered = w
        .services
        .auth
        .register(RegisterCommand {
            email: "New.Hire@Acme.test".into(),
            password: "password123".into(),
            first_name: "New".into(),
            last_name: "Hire".into(),
            job_title: None,
        })
        .await
        .unwrap();
    assert_eq!(registered.user.email, "new.hire@acme.test");
    assert_eq!(registered.user.role, UserRole::Standard);

    let login = w
        .services
        .auth
        .login(LoginCommand {
            email: "new.hire@acme.test".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, registered.user.id);

    let err = w
        .services
        .auth
        .login(LoginCommand {
            email: "new.hire@acme.test".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn test_register_existing_email_is_rejected() {
    let w = world();
    w.user("taken@acme.test", UserRole::Standard).await;

    let err = w
        .services
        .auth
        .register(RegisterCommand {
            email: "taken@acme.test".into(),
            password: "password123".into(),
            first_name: "Dup".into(),
            last_name: "Licate".into(),
            job_title: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::conflict("User already exists with this email."));
}

// ============================================================================
// Candidates
// ============================================================================

#[tokio::test]
async fn test_candidate_with_text_resume() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let manager = w.user("hm@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    w.join(&company, &manager, CompanyMemberRole::HiringManager).await;
    let job = w.job(&owner, &company, &[&manager]).await;

    let created = w
        .services
        .candidates
        .create(
            &owner,
            CreateCandidateCommand {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: "grace@example.com".into(),
                job_id: job.id.to_string(),
                resume: Some(ResumeUpload {
                    file_name: "cv.txt".into(),
                    bytes: b"COBOL, compilers".to_vec(),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.applications.len(), 1);
    // No workflow yet, so the application has no stage
    assert_eq!(created.applications[0].current_stage_id, None);

    let details = w
        .services
        .candidates
        .get(&manager, created.candidate.id)
        .await
        .unwrap();
    assert_eq!(details.resume_content.as_deref(), Some("COBOL, compilers"));

    let file = w
        .services
        .candidates
        .download_cv(&manager, created.candidate.id)
        .await
        .unwrap();
    assert_eq!(file.bytes, b"COBOL, compilers");

    let inbox = w
        .repos
        .notifications
        .list_for_user(manager.user_id, false)
        .await
        .unwrap();
    assert_eq!(inbox[0].notification_type, NotificationType::NewCandidate);

    w.services
        .candidates
        .delete(&owner, created.candidate.id)
        .await
        .unwrap();
    assert!(w.resumes.files.read().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_candidate_email_conflicts() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    let job = w.job(&owner, &company, &[]).await;
    w.apply(&owner, &job, "ada@example.com").await;

    let err = w
        .services
        .candidates
        .create(
            &owner,
            CreateCandidateCommand {
                first_name: "Ada".into(),
                last_name: "Again".into(),
                email: "ADA@example.com".into(),
                job_id: job.id.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn test_member_role_cannot_add_candidates() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let member = w.user("member@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    w.join(&company, &member, CompanyMemberRole::Member).await;
    let job = w.job(&owner, &company, &[]).await;

    let err = w
        .services
        .candidates
        .create(
            &member,
            CreateCandidateCommand {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                job_id: job.id.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

// ============================================================================
// Calendar integrations
// ============================================================================

#[tokio::test]
async fn test_calendar_connect_stores_encrypted_tokens() {
    let w = world();
    let user = w.user("cal@acme.test", UserRole::Standard).await;
    let integrations = &w.services.integrations;

    let connect = integrations
        .connect(&user, CalendarProvider::GoogleWorkspace)
        .unwrap();
    assert!(connect.auth_url.ends_with(&user.user_id.to_string()));

    let stored = integrations
        .complete(
            CalendarProvider::GoogleWorkspace,
            "abc",
            &user.user_id.to_string(),
        )
        .await
        .unwrap();
    assert_eq!(stored.access_token_encrypted, "cba-ssecca");

    let again = integrations
        .complete(
            CalendarProvider::GoogleWorkspace,
            "xyz",
            &user.user_id.to_string(),
        )
        .await
        .unwrap();
    assert_eq!(again.id, stored.id);
    assert_eq!(integrations.list(&user).await.unwrap().len(), 1);

    integrations
        .disconnect(&user, CalendarProvider::GoogleWorkspace)
        .await
        .unwrap();
    assert!(w
        .repos
        .integrations
        .list_calendars(user.user_id)
        .await
        .unwrap()
        .is_empty());
    let err = integrations
        .disconnect(&user, CalendarProvider::GoogleWorkspace)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn test_calendar_callback_rejects_unknown_state() {
    let w = world();
    let err = w
        .services
        .integrations
        .complete(CalendarProvider::GoogleWorkspace, "abc", "not-a-user")
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::bad_request("Invalid OAuth state."));
}
