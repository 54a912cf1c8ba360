//! MegaHR Domain Layer
//!
//! Entities, value objects and business rules of the recruiting platform, plus the
//! repository contracts the infrastructure layer implements. No I/O happens here.
//!
//! # Areas
//!
//! - **Tenancy**: users, companies, memberships, departments, locations
//! - **Hiring**: jobs, hiring teams, candidates, applications
//! - **Pipelines**: workflow templates, per-job workflow snapshots, stage progression
//! - **Assessment**: rating card templates and candidate ratings
//! - **Collaboration**: meetings, messages, notifications, question bank
//! - **Assistant**: AI assistant preferences and interaction logs

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod roles;
pub mod stage_settings;
pub mod value_objects;

pub use errors::{DomainError, DomainResult, FieldViolation};
pub use roles::{CompanyMemberRole, UserRole};
