//! Grouping of search results into timeframes and document buckets

use crate::links;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label of the most recent timeframe
pub const LAST_7_DAYS: &str = "Last 7 days";

/// Domain shown for documents without a web URI
pub const LOCAL_FILE: &str = "Local file";

/// Group an annotation card links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub pubid: String,
    pub name: String,
    pub url: String,
}

/// An annotation prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedAnnotation {
    pub id: Uuid,
    pub userid: String,
    /// Annotated document URI; the bucket key
    pub target_uri: String,
    #[serde(default)]
    pub document_title: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Set for annotations outside the public group
    #[serde(default)]
    pub group: Option<GroupRef>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub incontext_link: Option<String>,
}

/// Annotations of one document within a timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBucket {
    /// Bucket key
    pub document_uri: String,
    pub title: String,
    /// Linkable URI; `None` for local files
    pub uri: Option<String>,
    pub domain: String,
    /// Unique tags in first-seen order
    pub tags: Vec<String>,
    /// Unique userids in first-seen order
    pub users: Vec<String>,
    pub presented_annotations: Vec<PresentedAnnotation>,
}

impl DocumentBucket {
    pub fn new(first: &PresentedAnnotation) -> Self {
        let web_uri = links::is_web_uri(&first.target_uri);
        let domain = if web_uri {
            links::domain(&first.target_uri).unwrap_or_else(|| LOCAL_FILE.to_string())
        } else {
            LOCAL_FILE.to_string()
        };

        Self {
            document_uri: first.target_uri.clone(),
            title: document_title(first),
            uri: web_uri.then(|| first.target_uri.clone()),
            domain,
            tags: Vec::new(),
            users: Vec::new(),
            presented_annotations: Vec::new(),
        }
    }

    pub fn append(&mut self, annotation: PresentedAnnotation) {
        for tag in &annotation.tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        if !self.users.contains(&annotation.userid) {
            self.users.push(annotation.userid.clone());
        }
        self.presented_annotations.push(annotation);
    }

    pub fn annotations_count(&self) -> usize {
        self.presented_annotations.len()
    }

    /// Link to view the bucket's annotations on the document itself
    pub fn incontext_link(&self) -> Option<&str> {
        self.uri.as_ref()?;
        self.presented_annotations
            .first()
            .and_then(|annotation| annotation.incontext_link.as_deref())
    }
}

/// Document title, else the file name of a local file, else the URI
fn document_title(annotation: &PresentedAnnotation) -> String {
    if let Some(title) = annotation
        .document_title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
    {
        return title.to_string();
    }

    if let Some(path) = annotation.target_uri.strip_prefix("file://") {
        if let Some(name) = path.rsplit('/').find(|segment| !segment.is_empty()) {
            return name.to_string();
        }
    }

    annotation.target_uri.clone()
}

/// A labelled span of time holding document buckets in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeframe {
    pub label: String,
    pub cutoff: DateTime<Utc>,
    pub document_buckets: Vec<DocumentBucket>,
}

impl Timeframe {
    pub fn new(label: impl Into<String>, cutoff: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            cutoff,
            document_buckets: Vec::new(),
        }
    }

    pub fn append(&mut self, annotation: PresentedAnnotation) {
        match self
            .document_buckets
            .iter_mut()
            .find(|bucket| bucket.document_uri == annotation.target_uri)
        {
            Some(bucket) => bucket.append(annotation),
            None => {
                let mut bucket = DocumentBucket::new(&annotation);
                bucket.append(annotation);
                self.document_buckets.push(bucket);
            }
        }
    }

    pub fn within_cutoff(&self, annotation: &PresentedAnnotation) -> bool {
        annotation.updated >= self.cutoff
    }

    pub fn bucket(&self, document_uri: &str) -> Option<&DocumentBucket> {
        self.document_buckets
            .iter()
            .find(|bucket| bucket.document_uri == document_uri)
    }
}

/// Produces the timeframe an annotation starts
struct TimeframeGenerator {
    now: DateTime<Utc>,
}

impl TimeframeGenerator {
    fn next(&self, annotation: &PresentedAnnotation) -> Timeframe {
        let week_ago = self.now - Duration::days(7);
        if annotation.updated >= week_ago {
            return Timeframe::new(LAST_7_DAYS, week_ago);
        }

        let updated = annotation.updated;
        let cutoff = Utc
            .with_ymd_and_hms(updated.year(), updated.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(updated);
        Timeframe::new(updated.format("%b %Y").to_string(), cutoff)
    }
}

/// Group annotations, newest first, into timeframes relative to `now`
pub fn bucket(annotations: Vec<PresentedAnnotation>, now: DateTime<Utc>) -> Vec<Timeframe> {
    let generator = TimeframeGenerator { now };
    let mut timeframes: Vec<Timeframe> = Vec::new();

    for annotation in annotations {
        let starts_timeframe = timeframes
            .last()
            .map_or(true, |timeframe| !timeframe.within_cutoff(&annotation));
        if starts_timeframe {
            timeframes.push(generator.next(&annotation));
        }
        if let Some(timeframe) = timeframes.last_mut() {
            timeframe.append(annotation);
        }
    }

    timeframes
}
