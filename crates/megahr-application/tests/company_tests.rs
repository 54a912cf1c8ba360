//! Company membership, message templates and the question bank

mod common;

use megahr_application::dto::{
    AddMemberCommand, MessageTemplateCommand, QuestionCommand, QuestionSetCommand,
    UpdateMemberCommand,
};
use megahr_application::errors::ApplicationError;
use megahr_domain::entities::QuestionResponseType;
use megahr_domain::roles::{CompanyMemberRole, UserRole};

use common::world;

fn add(email: &str, role: &str) -> AddMemberCommand {
    AddMemberCommand {
        email: email.into(),
        role: role.into(),
    }
}

// ============================================================================
// Membership
// ============================================================================

#[tokio::test]
async fn test_creator_becomes_owner_and_recruiting_admin() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;

    let mine = w.services.companies.my_companies(&owner).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine[0].is_owner);
    assert_eq!(mine[0].member_role, CompanyMemberRole::RecruitingAdmin);

    let templates = w
        .services
        .messaging
        .list_templates(&owner, company.id)
        .await
        .unwrap();
    assert!(!templates.required.is_empty());
    assert!(templates.custom.is_empty());
}

#[tokio::test]
async fn test_add_member_rules() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let colleague = w.user("colleague@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    let companies = &w.services.companies;

    let err = companies
        .add_member(&owner, company.id, add("ghost@acme.test", "REVIEWER"))
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::not_found("User to be added not found."));

    let err = companies
        .add_member(&owner, company.id, add("colleague@acme.test", "BOSS"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation { .. }));

    let view = companies
        .add_member(&owner, company.id, add("Colleague@Acme.test", "REVIEWER"))
        .await
        .unwrap();
    assert_eq!(view.user_id, colleague.user_id);
    assert_eq!(view.role, CompanyMemberRole::Reviewer);

    let err = companies
        .add_member(&owner, company.id, add("colleague@acme.test", "MEMBER"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    // Reviewers cannot administer membership
    let err = companies
        .add_member(&colleague, company.id, add("owner@acme.test", "MEMBER"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn test_owner_cannot_be_removed_or_demoted() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    let companies = &w.services.companies;

    let err = companies
        .remove_member(&owner, company.id, owner.user_id)
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::bad_request("The company owner cannot be removed."));

    let err = companies
        .update_member(
            &owner,
            company.id,
            owner.user_id,
            UpdateMemberCommand {
                role: "MEMBER".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BadRequest(_)));
}

#[tokio::test]
async fn test_mega_admin_bypasses_membership() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let mega = w.user("root@megahr.test", UserRole::MegaAdmin).await;
    let stranger = w.user("stranger@elsewhere.test", UserRole::Standard).await;
    let company = w.company(&owner).await;

    assert!(w.services.companies.get(&mega, company.id).await.is_ok());
    let err = w
        .services
        .companies
        .get(&stranger, company.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

// ============================================================================
// Message templates
// ============================================================================

#[tokio::test]
async fn test_required_templates_cannot_be_deleted() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    let messaging = &w.services.messaging;

    let grouped = messaging.list_templates(&owner, company.id).await.unwrap();
    let err = messaging
        .delete_template(&owner, grouped.required[0].id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let custom = messaging
        .create_template(
            &owner,
            company.id,
            MessageTemplateCommand {
                name: "Follow up".into(),
                subject: "Checking in".into(),
                body: "Hi {{candidateName}}".into(),
                category: None,
            },
        )
        .await
        .unwrap();
    messaging.delete_template(&owner, custom.id).await.unwrap();
}

// ============================================================================
// Question bank
// ============================================================================

#[tokio::test]
async fn test_question_used_by_a_set_cannot_be_deleted() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;
    let questions = &w.services.questions;

    let question = questions
        .create_question(
            &owner,
            company.id,
            QuestionCommand {
                text: "Are you eligible to work in the EU?".into(),
                response_type: QuestionResponseType::YesNo,
                visibility: Default::default(),
                is_required: true,
                options: vec![],
            },
        )
        .await
        .unwrap();
    let set = questions
        .create_set(
            &owner,
            company.id,
            QuestionSetCommand {
                name: "Eligibility".into(),
                description: None,
                question_ids: vec![question.id],
            },
        )
        .await
        .unwrap();

    let err = questions
        .delete_question(&owner, question.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BadRequest(_)));

    questions.delete_set(&owner, set.id).await.unwrap();
    questions.delete_question(&owner, question.id).await.unwrap();
}

#[tokio::test]
async fn test_choice_question_needs_options() {
    let w = world();
    let owner = w.user("owner@acme.test", UserRole::Standard).await;
    let company = w.company(&owner).await;

    let err = w
        .services
        .questions
        .create_question(
            &owner,
            company.id,
            QuestionCommand {
                text: "Preferred stack?".into(),
                response_type: QuestionResponseType::Dropdown,
                visibility: Default::default(),
                is_required: false,
                options: vec!["  ".into()],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation { .. }));
}
