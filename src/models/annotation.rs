use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group pubid of the public group every account can read and post to
pub const WORLD_GROUP: &str = "__world__";

/// A stored annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier
    pub id: Uuid,

    /// Author, as `acct:username@authority`
    pub userid: String,

    /// Pubid of the group the annotation was posted to
    #[serde(default = "default_group")]
    pub groupid: String,

    /// The annotated document
    pub target_uri: String,

    /// Title of the annotated document, when the client captured one
    #[serde(default)]
    pub document_title: Option<String>,

    /// Body text
    #[serde(default)]
    pub text: String,

    /// Exact quoted text from the document selection
    #[serde(default)]
    pub quote: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created: DateTime<Utc>,

    pub updated: DateTime<Utc>,

    /// Ancestors of a reply; empty for top-level annotations
    #[serde(default)]
    pub references: Vec<Uuid>,
}

impl Annotation {
    /// Create a top-level annotation in the public group
    pub fn new(userid: impl Into<String>, target_uri: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            userid: userid.into(),
            groupid: default_group(),
            target_uri: target_uri.into(),
            document_title: None,
            text: text.into(),
            quote: None,
            tags: Vec::new(),
            created: now,
            updated: now,
            references: Vec::new(),
        }
    }

    pub fn is_reply(&self) -> bool {
        !self.references.is_empty()
    }

    pub fn with_tags(mut self, tags: Vec<impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group(mut self, pubid: impl Into<String>) -> Self {
        self.groupid = pubid.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = Some(title.into());
        self
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    pub fn with_updated(mut self, updated: DateTime<Utc>) -> Self {
        self.created = updated;
        self.updated = updated;
        self
    }
}

fn default_group() -> String {
    WORLD_GROUP.to_string()
}
