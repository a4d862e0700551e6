use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// Domain the account belongs to
    pub authority: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// Personal website
    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default)]
    pub orcid: Option<String>,

    pub registered_date: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authority: authority.into(),
            display_name: None,
            description: None,
            location: None,
            uri: None,
            orcid: None,
            registered_date: Utc::now(),
        }
    }

    /// `acct:username@authority`
    pub fn userid(&self) -> String {
        format!("acct:{}@{}", self.username, self.authority)
    }

    /// Display name, falling back to the username
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userid_format() {
        let user = User::new("jim.smith", "hypothes.is");
        assert_eq!(user.userid(), "acct:jim.smith@hypothes.is");
    }

    #[test]
    fn test_name_falls_back_to_username() {
        let mut user = User::new("jim", "example.com");
        assert_eq!(user.name(), "jim");

        user.display_name = Some(String::new());
        assert_eq!(user.name(), "jim");

        user.display_name = Some("Jim Smith".to_string());
        assert_eq!(user.name(), "Jim Smith");
    }
}
