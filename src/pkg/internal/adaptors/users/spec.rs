use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub company: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name chosen during setup, falling back to the email before that.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn needs_setup(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
    }
}

/// Public face of a user, shown as a job's author or on a company page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthorRef {
    pub id: String,
    pub name: Option<String>,
    pub company: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct CleanReport {
    pub applications: u64,
    pub jobs: u64,
    pub users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>) -> User {
        User {
            id: "u-1".into(),
            name: name.map(String::from),
            email: "dev@acme.io".into(),
            company: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(user(Some("Dana")).display_name(), "Dana");
        assert_eq!(user(Some("")).display_name(), "dev@acme.io");
        assert_eq!(user(None).display_name(), "dev@acme.io");
    }

    #[test]
    fn test_needs_setup() {
        assert!(user(None).needs_setup());
        assert!(user(Some("")).needs_setup());
        assert!(!user(Some("Dana")).needs_setup());
    }
}
