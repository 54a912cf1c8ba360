//! MegaHR Application Layer
//!
//! Use cases of the recruiting platform. Services orchestrate domain entities and
//! repository traits, enforce company-scoped permissions through one shared
//! [`access::AccessPolicy`], and reach infrastructure only through [`ports`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                            │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  Services            │ DTOs               │ Ports            │ Access│
//! │  ─────────           │ ────               │ ─────            │ ──────│
//! │  CompanyService      │ CreateJobCommand   │ PasswordHasher   │ Actor │
//! │  WorkflowService     │ SubmitRating...    │ TokenIssuer      │ Policy│
//! │  RatingService       │ JobDetails         │ SecretCipher     │       │
//! │  ...                 │ ...                │ ResumeStore      │       │
//! │                      │                    │ CalendarOAuth    │       │
//! └─────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                │
//! │        Entities, Value Objects, Validation, Repository Traits       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Non-Goals
//!
//! - Domain rules (belong in the domain crate)
//! - Direct I/O (belongs behind the ports)
//! - HTTP handling (belongs in the API crate)

pub mod access;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;

pub use access::{AccessPolicy, Actor};
pub use errors::{ApplicationError, ApplicationResult};
pub use services::{Ports, Repositories, Services};
