//! In-app notification handlers

use axum::{extract::State, response::Response};
use megahr_application::dto::CreateNotificationCommand;
use megahr_domain::{entities::Notification, roles::UserRole, value_objects::NotificationId};
use serde::Deserialize;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery, AuthUser, PaginationQuery, ValidJson},
    response::{message_only, Reply},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// The page plus the caller's unread total, as `{ data, pagination, unreadCount }`
pub async fn my_notifications(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiQuery(query): ApiQuery<FeedQuery>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Response> {
    let feed = state
        .services
        .notifications
        .list(&actor, query.unread_only, pagination.into())
        .await?;
    let unread_count = feed.unread_count;
    Ok(Reply::page(feed.page).with_extra("unreadCount", unread_count))
}

pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiPath(notification_id): ApiPath<NotificationId>,
) -> ApiResult<Reply<Notification>> {
    let notification = state
        .services
        .notifications
        .mark_read(&actor, notification_id)
        .await?;
    Ok(Reply::ok(notification).message("Notification marked as read."))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Response> {
    let count = state.services.notifications.mark_all_read(&actor).await?;
    Ok(message_only(&format!("{count} notifications marked as read.")))
}

pub async fn create_notification(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(cmd): ValidJson<CreateNotificationCommand>,
) -> ApiResult<Reply<Notification>> {
    user.require_role(&[UserRole::Admin, UserRole::MegaAdmin])?;
    let notification = state.services.notifications.create(cmd).await?;
    Ok(Reply::created(notification).message("Notification created."))
}
