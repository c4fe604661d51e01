use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Candidate,
    Employer,
    Admin,
}

impl UserRole {
    pub fn can_apply(self) -> bool {
        matches!(self, UserRole::Candidate)
    }

    pub fn can_post_jobs(self) -> bool {
        matches!(self, UserRole::Employer | UserRole::Admin)
    }

    /// Maps the backend's role string. Unknown roles get no privileges.
    pub fn from_api(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "candidate" | "jobseeker" | "job_seeker" => Some(UserRole::Candidate),
            "employer" | "recruiter" => Some(UserRole::Employer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Candidate => "candidate",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
        };
        f.write_str(label)
    }
}

/// The logged-in user as reported by the session endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_api_strings() {
        assert_eq!(UserRole::from_api("Employer"), Some(UserRole::Employer));
        assert_eq!(UserRole::from_api(" candidate "), Some(UserRole::Candidate));
        assert_eq!(UserRole::from_api("superuser"), None);
    }

    #[test]
    fn only_candidates_apply_and_only_employers_post() {
        assert!(UserRole::Candidate.can_apply());
        assert!(!UserRole::Employer.can_apply());
        assert!(UserRole::Employer.can_post_jobs());
        assert!(UserRole::Admin.can_post_jobs());
        assert!(!UserRole::Candidate.can_post_jobs());
    }
}
