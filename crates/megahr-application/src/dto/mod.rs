//! Commands accepted by the services and the views they return
//!
//! Commands deserialize from camelCase JSON and carry raw primitives where a range
//! check must surface as a field violation rather than a decoding failure.

pub mod ai_assistant;
pub mod auth;
pub mod candidate;
pub mod careers;
pub mod company;
pub mod integration;
pub mod job;
pub mod messaging;
pub mod notification;
pub mod question;
pub mod rating;
pub mod scheduling;
pub mod validate;
pub mod workflow;

pub use ai_assistant::*;
pub use auth::*;
pub use candidate::*;
pub use careers::*;
pub use company::*;
pub use integration::*;
pub use job::*;
pub use messaging::*;
pub use notification::*;
pub use question::*;
pub use rating::*;
pub use scheduling::*;
pub use validate::{Validate, Violations};
pub use workflow::*;
