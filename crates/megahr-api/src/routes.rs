//! API route definitions

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        ai_assistant, auth, candidates, careers_page, companies, health, integrations, jobs,
        message_templates, messaging, notifications, questions, ratings, scheduling, users,
        workflows,
    },
    middleware::logging_middleware,
    state::AppState,
};

/// Multipart candidate submissions may carry a résumé
const RESUME_BODY_LIMIT: usize = 10 * 1024 * 1024;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/me", get(users::get_me).put(users::update_me))
        .route("/users/me/password", put(users::change_password))
        .route("/users/:userId", get(users::get_user))
        .route("/my-companies", get(users::my_companies))
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(companies::create_company))
        .route(
            "/companies/:companyId",
            get(companies::get_company).put(companies::update_company),
        )
        .route(
            "/companies/:companyId/members",
            get(companies::list_members).post(companies::add_member),
        )
        .route(
            "/companies/:companyId/members/:userId",
            put(companies::update_member).delete(companies::remove_member),
        )
        .route(
            "/companies/:companyId/departments",
            get(companies::list_departments).post(companies::create_department),
        )
        .route(
            "/companies/:companyId/departments/:departmentId",
            put(companies::update_department).delete(companies::delete_department),
        )
        .route(
            "/companies/:companyId/locations",
            get(companies::list_locations).post(companies::create_location),
        )
        .route(
            "/companies/:companyId/locations/:locationId",
            put(companies::update_location).delete(companies::delete_location),
        )
}

fn job_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs/company/:companyId",
            get(jobs::list_jobs).post(jobs::create_job),
        )
        .route(
            "/jobs/:jobId",
            get(jobs::get_job).put(jobs::update_job).delete(jobs::delete_job),
        )
        .route(
            "/jobs/:jobId/hiring-team",
            get(jobs::hiring_team).post(jobs::add_hiring_member),
        )
        .route(
            "/jobs/:jobId/hiring-team/:userId",
            delete(jobs::remove_hiring_member),
        )
}

fn candidate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/candidates",
            post(candidates::create_candidate).layer(DefaultBodyLimit::max(RESUME_BODY_LIMIT)),
        )
        .route(
            "/candidates/company/:companyId",
            get(candidates::list_candidates),
        )
        .route(
            "/candidates/:candidateId",
            get(candidates::get_candidate)
                .put(candidates::update_candidate)
                .delete(candidates::delete_candidate),
        )
        .route(
            "/candidates/:candidateId/download-cv",
            get(candidates::download_cv),
        )
        .route(
            "/applications/:applicationId",
            get(candidates::get_application),
        )
        .route(
            "/applications/:applicationId/status",
            put(candidates::update_application_status),
        )
}

fn workflow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workflows/company/:companyId/templates",
            get(workflows::list_templates).post(workflows::create_template),
        )
        .route(
            "/workflows/templates/:templateId",
            get(workflows::get_template)
                .put(workflows::update_template)
                .delete(workflows::delete_template),
        )
        .route("/workflows/jobs/:jobId", get(workflows::job_workflow))
        .route("/workflows/jobs/:jobId/assign", post(workflows::assign_to_job))
        .route(
            "/workflows/jobs/:jobId/stages/:stageId/settings",
            put(workflows::override_stage_settings),
        )
        .route(
            "/workflows/applications/:applicationId/progress",
            post(workflows::progress_application),
        )
        .route(
            "/workflows/applications/:applicationId/history",
            get(workflows::history),
        )
}

fn rating_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ratings/company/:companyId/templates",
            get(ratings::list_templates).post(ratings::create_template),
        )
        .route(
            "/ratings/templates/:templateId",
            get(ratings::get_template)
                .put(ratings::update_template)
                .delete(ratings::delete_template),
        )
        .route(
            "/ratings/applications/:applicationId",
            get(ratings::list_ratings).post(ratings::submit_rating),
        )
}

fn scheduling_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/scheduling/company/:companyId/templates",
            get(scheduling::list_templates).post(scheduling::create_template),
        )
        .route(
            "/scheduling/templates/:templateId",
            put(scheduling::update_template).delete(scheduling::delete_template),
        )
        .route("/scheduling/meetings", post(scheduling::schedule_meeting))
        .route("/scheduling/meetings/my", get(scheduling::my_meetings))
        .route(
            "/scheduling/meetings/:meetingId",
            get(scheduling::get_meeting).delete(scheduling::cancel_meeting),
        )
        .route("/scheduling/meetings/:meetingId/rsvp", put(scheduling::rsvp))
}

fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messaging/applications/:applicationId/messages",
            get(messaging::list_messages).post(messaging::post_message),
        )
        .route(
            "/messaging-templates/company/:companyId",
            get(message_templates::list_templates).post(message_templates::create_template),
        )
        .route(
            "/messaging-templates/:templateId",
            put(message_templates::update_template).delete(message_templates::delete_template),
        )
}

fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/questions/company/:companyId",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/questions/company/:companyId/sets",
            get(questions::list_sets).post(questions::create_set),
        )
        .route(
            "/questions/sets/:setId",
            get(questions::get_set)
                .put(questions::update_set)
                .delete(questions::delete_set),
        )
        .route(
            "/questions/:questionId",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(notifications::my_notifications).post(notifications::create_notification),
        )
        .route("/notifications/read-all", put(notifications::mark_all_read))
        .route(
            "/notifications/:notificationId/read",
            put(notifications::mark_read),
        )
}

fn ai_assistant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ai-megan/company/:companyId/business-preferences",
            get(ai_assistant::business_preferences).put(ai_assistant::update_business_preferences),
        )
        .route(
            "/ai-megan/company/:companyId/communication-preferences",
            get(ai_assistant::communication_preferences)
                .put(ai_assistant::update_communication_preferences),
        )
        .route(
            "/ai-megan/jobs/:jobId/screening",
            get(ai_assistant::screening_config).put(ai_assistant::update_screening_config),
        )
        .route(
            "/ai-megan/jobs/:jobId/scheduling",
            get(ai_assistant::scheduling_config).put(ai_assistant::update_scheduling_config),
        )
        .route(
            "/ai-megan/meetings/:meetingId/note-taking",
            get(ai_assistant::note_taking_config).put(ai_assistant::update_note_taking_config),
        )
        .route(
            "/ai-megan/interactions",
            get(ai_assistant::interactions).post(ai_assistant::log_interaction),
        )
}

fn integration_routes() -> Router<AppState> {
    Router::new()
        .route("/integrations/calendar", get(integrations::list_calendars))
        .route(
            "/integrations/calendar/:provider",
            delete(integrations::disconnect_calendar),
        )
        .route(
            "/integrations/calendar/:provider/connect",
            post(integrations::connect_calendar),
        )
        .route(
            "/integrations/calendar/:provider/callback",
            get(integrations::calendar_callback),
        )
}

fn careers_page_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/careers-page/company/:companyId/settings",
            get(careers_page::settings).put(careers_page::update_settings),
        )
        .route(
            "/careers-page/company/:companyId/jobs",
            get(careers_page::public_jobs),
        )
        .route("/careers-page/jobs/:jobId", get(careers_page::public_job))
}

/// Every `/api/v1` route
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(company_routes())
        .merge(job_routes())
        .merge(candidate_routes())
        .merge(workflow_routes())
        .merge(rating_routes())
        .merge(scheduling_routes())
        .merge(messaging_routes())
        .merge(question_routes())
        .merge(notification_routes())
        .merge(ai_assistant_routes())
        .merge(integration_routes())
        .merge(careers_page_routes())
}

/// The complete application with middleware and state applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes())
        .fallback(health::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn_with_state(state.clone(), logging_middleware)),
        )
        .with_state(state)
}
