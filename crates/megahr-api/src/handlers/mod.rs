//! API request handlers, one module per resource

pub mod ai_assistant;
pub mod auth;
pub mod candidates;
pub mod careers_page;
pub mod companies;
pub mod health;
pub mod integrations;
pub mod jobs;
pub mod message_templates;
pub mod messaging;
pub mod notifications;
pub mod questions;
pub mod ratings;
pub mod scheduling;
pub mod users;
pub mod workflows;
