//! Value objects representing immutable domain concepts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Parse from the canonical string representation
            pub fn parse(s: &str) -> Result<Self, DomainError> {
                uuid::Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::validation(stringify!($name), "must be a valid UUID"))
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

uuid_id!(
    /// Platform user identifier
    UserId
);
uuid_id!(
    /// Tenant company identifier
    CompanyId
);
uuid_id!(DepartmentId);
uuid_id!(LocationId);
uuid_id!(
    /// Job posting identifier
    JobId
);
uuid_id!(CandidateId);
uuid_id!(
    /// A candidate's application to one job
    ApplicationId
);
uuid_id!(WorkflowTemplateId);
uuid_id!(StageTemplateId);
uuid_id!(JobWorkflowId);
uuid_id!(
    /// Stage of a job's cloned workflow
    JobWorkflowStageId
);
uuid_id!(StageTransitionId);
uuid_id!(RatingCardTemplateId);
uuid_id!(RatingCategoryId);
uuid_id!(CandidateRatingId);
uuid_id!(MeetingTemplateId);
uuid_id!(MeetingId);
uuid_id!(MessageThreadId);
uuid_id!(MessageId);
uuid_id!(MessageTemplateId);
uuid_id!(NotificationId);
uuid_id!(QuestionId);
uuid_id!(QuestionSetId);
uuid_id!(AiInteractionId);
uuid_id!(CalendarIntegrationId);

/// Lower-cased, trimmed e-mail address used as a lookup key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Page selection for list queries (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page request, clamping out-of-range input
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> usize {
        ((self.page - 1) as usize) * self.limit as usize
    }

    /// Slice an already ordered collection into this page
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect();
        Page {
            items,
            total,
            page: *self,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total size of the underlying collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: PageRequest,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.page.limit as u64)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ids_parse_their_display_form() {
        let id = JobId::new();
        assert_eq!(JobId::parse(&id.to_string()).unwrap(), id);
        assert!(JobId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = UserId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }

    #[test]
    fn page_request_clamps_input() {
        let page = PageRequest::new(Some(0), Some(500));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, PageRequest::MAX_LIMIT);
    }

    #[test]
    fn apply_slices_and_counts() {
        let page = PageRequest::new(Some(2), Some(3)).apply((1..=7).collect::<Vec<_>>());
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages(), 3);
    }

    proptest! {
        #[test]
        fn page_never_exceeds_limit(len in 0usize..300, page in 1u32..20, limit in 1u32..50) {
            let page = PageRequest::new(Some(page), Some(limit)).apply(vec![0u8; len]);
            prop_assert!(page.items.len() <= limit as usize);
            prop_assert_eq!(page.total, len as u64);
        }
    }
}
