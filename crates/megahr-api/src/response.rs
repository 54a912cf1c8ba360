//! Success envelope: `{ message?, data, pagination? }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use megahr_domain::value_objects::Page;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// A status code plus envelope, ready to return from a handler
pub struct Reply<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope {
                message: None,
                data,
                pagination: None,
            },
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }

    /// Envelope with one additional top-level member
    pub fn with_extra(self, key: &str, value: impl Serialize) -> Response {
        let serialized = serde_json::to_value(&self.envelope)
            .and_then(|envelope| Ok((envelope, serde_json::to_value(value)?)));
        match serialized {
            Ok((Value::Object(mut map), extra)) => {
                map.insert(key.to_string(), extra);
                (self.status, Json(Value::Object(map))).into_response()
            }
            Ok(_) => ApiError::internal("envelope is not an object").into_response(),
            Err(err) => ApiError::internal(err.to_string()).into_response(),
        }
    }
}

impl<T: Serialize> Reply<Vec<T>> {
    pub fn page(page: Page<T>) -> Self {
        let pagination = Pagination {
            current_page: page.page.page,
            total_pages: page.total_pages(),
            total_items: page.total,
            limit: page.page.limit,
        };
        let mut reply = Self::ok(page.items);
        reply.envelope.pagination = Some(pagination);
        reply
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Body-less success with only a message
pub fn message_only(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}
