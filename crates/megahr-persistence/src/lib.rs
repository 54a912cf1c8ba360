//! MegaHR Persistence Layer
//!
//! Infrastructure layer providing repository implementations for the domain.
//! This crate implements the repository interfaces defined in `megahr-domain`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                                                         │
//! │  MemoryStore (one RwLock over every table)                       │
//! │  InMemoryUserRepository, InMemoryJobRepository, ...              │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │  UserRepository, JobRepository, WorkflowRepository, ...          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use megahr_persistence::memory::InMemoryRepositories;
//! use megahr_domain::repositories::UserRepository;
//! use std::sync::Arc;
//!
//! let repos = InMemoryRepositories::default();
//! let users: Arc<dyn UserRepository> = repos.users.clone();
//! ```

pub mod error;
pub mod memory;

pub use error::PersistenceError;
pub use memory::{InMemoryRepositories, MemoryStore};
