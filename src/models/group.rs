use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A private annotation group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Public identifier used in URLs
    pub pubid: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub created: DateTime<Utc>,

    /// Userid of the creator; the creator administers the group
    pub creator: String,

    /// Userids of the members, creator included
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn new(pubid: impl Into<String>, name: impl Into<String>, creator: impl Into<String>) -> Self {
        let creator = creator.into();
        Self {
            pubid: pubid.into(),
            name: name.into(),
            description: None,
            created: Utc::now(),
            members: vec![creator.clone()],
            creator,
        }
    }

    /// URL slug derived from the name: lowercase ASCII words joined by `-`
    pub fn slug(&self) -> String {
        self.name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| word.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn is_member(&self, userid: &str) -> bool {
        self.members.iter().any(|member| member == userid)
    }

    pub fn is_admin(&self, userid: &str) -> bool {
        self.creator == userid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        let group = Group::new("abc123", "Reading Group: 2017!", "acct:a@example.com");
        assert_eq!(group.slug(), "reading-group-2017");
    }

    #[test]
    fn test_creator_is_member_and_admin() {
        let group = Group::new("abc123", "Readers", "acct:a@example.com");
        assert!(group.is_member("acct:a@example.com"));
        assert!(group.is_admin("acct:a@example.com"));
        assert!(!group.is_admin("acct:b@example.com"));
    }
}
