use crate::links;
use crate::models::Annotation;
use crate::multidict::MultiDict;
use crate::search::parser::ANY;

/// Annotation predicate derived from a parsed search query
///
/// Tags, quotes, texts and free-text terms must all match; users and URIs
/// match if any of them does. Replies are always excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationFilter {
    pub tags: Vec<String>,
    pub users: Vec<String>,
    pub group: Option<String>,
    pub uris: Vec<String>,
    pub quotes: Vec<String>,
    pub texts: Vec<String>,
    pub any: Vec<String>,
}

impl AnnotationFilter {
    pub fn from_query(query: &MultiDict) -> Self {
        let lowered = |key: &str| -> Vec<String> {
            query
                .get_all(key)
                .into_iter()
                .map(str::to_lowercase)
                .collect()
        };

        Self {
            tags: lowered("tag"),
            users: lowered("user"),
            group: query.get_all("group").last().map(|pubid| pubid.to_string()),
            uris: query
                .get_all("uri")
                .into_iter()
                .map(normalize_uri)
                .collect(),
            quotes: lowered("quote"),
            texts: lowered("text"),
            any: lowered(ANY),
        }
    }

    pub fn matches(&self, annotation: &Annotation) -> bool {
        if annotation.is_reply() {
            return false;
        }

        if let Some(group) = &self.group {
            if &annotation.groupid != group {
                return false;
            }
        }

        let tags: Vec<String> = annotation.tags.iter().map(|t| t.to_lowercase()).collect();
        if !self.tags.iter().all(|tag| tags.contains(tag)) {
            return false;
        }

        if !self.users.is_empty() {
            let username = links::username_from_id(&annotation.userid).to_lowercase();
            let userid = annotation.userid.to_lowercase();
            if !self.users.iter().any(|user| *user == username || *user == userid) {
                return false;
            }
        }

        if !self.uris.is_empty() {
            let target = normalize_uri(&annotation.target_uri);
            if !self.uris.iter().any(|uri| *uri == target) {
                return false;
            }
        }

        let quote = annotation.quote.as_deref().unwrap_or_default().to_lowercase();
        if !self.quotes.iter().all(|q| quote.contains(q.as_str())) {
            return false;
        }

        let text = annotation.text.to_lowercase();
        if !self.texts.iter().all(|t| text.contains(t.as_str())) {
            return false;
        }

        if !self.any.is_empty() {
            let title = annotation
                .document_title
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            let uri = annotation.target_uri.to_lowercase();
            let found = |term: &String| {
                text.contains(term.as_str())
                    || quote.contains(term.as_str())
                    || title.contains(term.as_str())
                    || uri.contains(term.as_str())
                    || tags.iter().any(|tag| tag == term)
            };
            if !self.any.iter().all(found) {
                return false;
            }
        }

        true
    }
}

fn normalize_uri(uri: &str) -> String {
    let without_fragment = uri.split('#').next().unwrap_or(uri);
    without_fragment.trim_end_matches('/').to_lowercase()
}
