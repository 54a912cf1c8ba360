//! Calendar integration handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::ConnectCalendarResponse;
use megahr_domain::entities::{CalendarIntegration, CalendarProvider};
use serde::Deserialize;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser},
    response::{message_only, Reply},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

pub async fn list_calendars(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Reply<Vec<CalendarIntegration>>> {
    Ok(Reply::ok(state.services.integrations.list(&actor).await?))
}

pub async fn connect_calendar(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(provider): ApiPath<CalendarProvider>,
) -> ApiResult<Reply<ConnectCalendarResponse>> {
    Ok(Reply::ok(
        state.services.integrations.connect(&actor, provider)?,
    ))
}

/// Provider redirect target; identifies the user by the OAuth state
pub async fn calendar_callback(
    State(state): State<AppState>,
    ApiPath(provider): ApiPath<CalendarProvider>,
    ApiQuery(query): ApiQuery<CallbackQuery>,
) -> ApiResult<Reply<CalendarIntegration>> {
    let integration = state
        .services
        .integrations
        .complete(provider, &query.code, &query.state)
        .await?;
    Ok(Reply::ok(integration).message("Calendar connected successfully."))
}

pub async fn disconnect_calendar(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(provider): ApiPath<CalendarProvider>,
) -> ApiResult<Response> {
    state
        .services
        .integrations
        .disconnect(&actor, provider)
        .await?;
    Ok(message_only("Calendar disconnected successfully."))
}
