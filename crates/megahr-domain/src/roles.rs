//! Platform and company-level roles

use serde::{Deserialize, Serialize};

/// Platform-wide role carried on the user record and in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Standard,
    Admin,
    MegaAdmin,
}

impl UserRole {
    /// Mega admins bypass every company-scoped permission check
    pub fn is_mega_admin(self) -> bool {
        matches!(self, UserRole::MegaAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Standard => "STANDARD",
            UserRole::Admin => "ADMIN",
            UserRole::MegaAdmin => "MEGA_ADMIN",
        }
    }
}

/// A user's role within one tenant company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyMemberRole {
    RecruitingAdmin,
    HiringManager,
    Reviewer,
    Member,
}

impl CompanyMemberRole {
    /// Roles allowed to administer company configuration
    pub const ADMINS: &'static [CompanyMemberRole] = &[CompanyMemberRole::RecruitingAdmin];

    /// Roles allowed to manage jobs, candidates and meetings
    pub const HIRING: &'static [CompanyMemberRole] = &[
        CompanyMemberRole::RecruitingAdmin,
        CompanyMemberRole::HiringManager,
    ];

    /// Roles allowed to read hiring data
    pub const REVIEWERS: &'static [CompanyMemberRole] = &[
        CompanyMemberRole::RecruitingAdmin,
        CompanyMemberRole::HiringManager,
        CompanyMemberRole::Reviewer,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::MegaAdmin).unwrap(),
            "\"MEGA_ADMIN\""
        );
        let role: CompanyMemberRole = serde_json::from_str("\"RECRUITING_ADMIN\"").unwrap();
        assert_eq!(role, CompanyMemberRole::RecruitingAdmin);
    }

    #[test]
    fn reviewer_set_contains_hiring_set() {
        for role in CompanyMemberRole::HIRING {
            assert!(CompanyMemberRole::REVIEWERS.contains(role));
        }
        assert!(!CompanyMemberRole::REVIEWERS.contains(&CompanyMemberRole::Member));
    }
}
