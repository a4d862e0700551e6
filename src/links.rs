//! URL helpers shared by the handlers and the markup

use crate::models::Annotation;
use crate::multidict::MultiDict;
use crate::search::parser;
use serde::{Deserialize, Serialize};
use url::Url;

/// Split `acct:username@authority` into its parts
pub fn split_user(userid: &str) -> Option<(&str, &str)> {
    let rest = userid.strip_prefix("acct:")?;
    let (username, authority) = rest.split_once('@')?;
    if username.is_empty() || authority.is_empty() {
        return None;
    }
    Some((username, authority))
}

/// Username part of a userid; malformed ids are returned unchanged
pub fn username_from_id(userid: &str) -> &str {
    split_user(userid).map(|(username, _)| username).unwrap_or(userid)
}

/// `http` and `https` URIs can be linked to; `file:` and `urn:` cannot
pub fn is_web_uri(uri: &str) -> bool {
    matches!(
        Url::parse(uri).map(|url| url.scheme().to_string()).as_deref(),
        Ok("http") | Ok("https")
    )
}

/// Host of a web URI
pub fn domain(uri: &str) -> Option<String> {
    Url::parse(uri)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Short display form of a URL: host and path, without `www.` or a trailing slash
pub fn pretty_link(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };

    let mut link = format!("{}{}", host, parsed.path());
    if let Some(stripped) = link.strip_prefix("www.") {
        link = stripped.to_string();
    }
    if link.ends_with('/') {
        link.pop();
    }
    link
}

/// Link that opens the annotated document scrolled to the annotation
pub fn incontext_link(bouncer_url: Option<&str>, annotation: &Annotation) -> Option<String> {
    if !is_web_uri(&annotation.target_uri) {
        return None;
    }
    match bouncer_url {
        Some(bouncer) => Some(format!("{}/{}", bouncer.trim_end_matches('/'), annotation.id)),
        None => {
            let base = annotation
                .target_uri
                .split('#')
                .next()
                .unwrap_or(&annotation.target_uri);
            Some(format!("{}#annotations:{}", base, annotation.id))
        }
    }
}

/// Route URLs, resolved against the public base URL of the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub base_url: String,
}

impl Links {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn with_query(&self, path: &str, params: &MultiDict) -> String {
        if params.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, params.to_query_string())
        }
    }

    /// General search page with the given params
    pub fn search_url(&self, params: &MultiDict) -> String {
        self.with_query("/search", params)
    }

    pub fn group_search_url(&self, pubid: &str, params: &MultiDict) -> String {
        self.with_query(&format!("/groups/{}/search", pubid), params)
    }

    pub fn user_search_url(&self, username: &str, params: &MultiDict) -> String {
        self.with_query(&format!("/users/{}/search", username), params)
    }

    /// Search for annotations carrying `tag`
    pub fn tag_link(&self, tag: &str) -> String {
        let mut query = MultiDict::new();
        query.add("tag", tag);
        let mut params = MultiDict::new();
        params.add("q", parser::unparse(&query));
        self.search_url(&params)
    }

    /// Activity page of the user behind `userid`
    pub fn user_link(&self, userid: &str) -> String {
        self.user_search_url(username_from_id(userid), &MultiDict::new())
    }

    /// Share / invite page of a group
    pub fn group_url(&self, pubid: &str, slug: &str) -> String {
        format!("{}/groups/{}/{}", self.base_url, pubid, slug)
    }

    pub fn group_edit_url(&self, pubid: &str) -> String {
        format!("{}/groups/{}/edit", self.base_url, pubid)
    }

    pub fn account_profile_url(&self) -> String {
        format!("{}/account/profile", self.base_url)
    }
}

impl Default for Links {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_user() {
        assert_eq!(
            split_user("acct:jim.smith@hypothes.is"),
            Some(("jim.smith", "hypothes.is"))
        );
        assert_eq!(split_user("jim.smith"), None);
        assert_eq!(split_user("acct:@hypothes.is"), None);
    }

    #[test]
    fn test_username_from_id() {
        assert_eq!(username_from_id("acct:jim.smith@hypothes.is"), "jim.smith");
        assert_eq!(username_from_id("not-a-userid"), "not-a-userid");
    }

    #[test]
    fn test_tag_link() {
        let links = Links::new("http://example.com/");
        assert_eq!(links.tag_link("foo"), "http://example.com/search?q=tag%3Afoo");
        assert_eq!(
            links.tag_link("foo bar"),
            "http://example.com/search?q=tag%3A%22foo+bar%22"
        );
    }

    #[test]
    fn test_user_link() {
        let links = Links::new("http://example.com");
        assert_eq!(
            links.user_link("acct:jim.smith@hypothes.is"),
            "http://example.com/users/jim.smith/search"
        );
    }

    #[test]
    fn test_pretty_link() {
        assert_eq!(pretty_link("https://www.example.com/a/b/"), "example.com/a/b");
        assert_eq!(pretty_link("http://example.com"), "example.com");
        assert_eq!(pretty_link("not a url"), "not a url");
    }

    #[test]
    fn test_incontext_link() {
        let annotation = Annotation::new("acct:a@example.com", "https://example.com/page#frag", "");
        assert_eq!(
            incontext_link(None, &annotation),
            Some(format!("https://example.com/page#annotations:{}", annotation.id))
        );
        assert_eq!(
            incontext_link(Some("https://hyp.is/"), &annotation),
            Some(format!("https://hyp.is/{}", annotation.id))
        );

        let local = Annotation::new("acct:a@example.com", "file:///home/a/doc.pdf", "");
        assert_eq!(incontext_link(None, &local), None);
    }

    #[test]
    fn test_is_web_uri_and_domain() {
        assert!(is_web_uri("https://example.com/x"));
        assert!(!is_web_uri("urn:x-pdf:abc"));
        assert_eq!(domain("https://blog.example.com/x").as_deref(), Some("blog.example.com"));
        assert_eq!(domain("urn:x-pdf:abc"), None);
    }
}
