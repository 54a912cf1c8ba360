//! Domain entities grouped by business area

pub mod ai_assistant;
pub mod candidate;
pub mod company;
pub mod integration;
pub mod job;
pub mod messaging;
pub mod notification;
pub mod question;
pub mod rating;
pub mod scheduling;
pub mod user;
pub mod workflow;

pub use ai_assistant::*;
pub use candidate::*;
pub use company::*;
pub use integration::*;
pub use job::*;
pub use messaging::*;
pub use notification::*;
pub use question::*;
pub use rating::*;
pub use scheduling::*;
pub use user::*;
pub use workflow::*;
