//! Turning a request into a search and running it

use crate::error::Result;
use crate::links::{self, Links};
use crate::models::{Annotation, Group, WORLD_GROUP};
use crate::multidict::MultiDict;
use crate::paginator;
use crate::search::bucketing::{self, GroupRef, PresentedAnnotation, Timeframe};
use crate::search::parser;
use crate::state::{ActivityStore, AnnotationFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which activity page a request was routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoute {
    Search,
    GroupSearch { pubid: String },
    UserSearch { username: String },
}

/// Tag facet count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// User facet count, keyed by userid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub user: String,
    pub count: u64,
}

/// Facet counts computed alongside a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregations {
    #[serde(default)]
    pub tags: Vec<TagCount>,
    /// Only computed for group pages not already narrowed to a user
    #[serde(default)]
    pub users: Option<Vec<UserCount>>,
}

impl Aggregations {
    /// Annotation count of `userid` in the user aggregation, 0 when absent
    pub fn user_count(&self, userid: &str) -> u64 {
        self.users
            .iter()
            .flatten()
            .find(|entry| entry.user == userid)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

/// Everything a search produces for the page
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityResults {
    /// Page actually shown, never past the last page
    pub page: usize,
    pub total: u64,
    pub aggregations: Aggregations,
    pub timeframes: Vec<Timeframe>,
}

/// Parse `q` and pin it to the group or user the route is scoped to
pub fn extract(route: &SearchRoute, params: &MultiDict) -> MultiDict {
    let mut query = parser::parse(params.get("q").unwrap_or_default());

    // A group/user term typed into a scoped page would otherwise widen the
    // results to the union of both
    match route {
        SearchRoute::GroupSearch { pubid } => query.set("group", pubid.as_str()),
        SearchRoute::UserSearch { username } => query.set("user", username.as_str()),
        SearchRoute::Search => {}
    }

    query
}

/// Redirect target when a general search names exactly one known group or one known user
pub async fn check_url(
    store: &dyn ActivityStore,
    route: &SearchRoute,
    query: &MultiDict,
    links: &Links,
    authority: &str,
) -> Result<Option<String>> {
    if *route != SearchRoute::Search {
        return Ok(None);
    }

    let mut remaining = query.clone();
    let mut params = MultiDict::new();

    // A misspelt name stays on the general search instead of an empty scoped page
    if let Some(pubid) = remaining.pop_single("group") {
        if store.get_group(&pubid).await?.is_none() {
            return Ok(None);
        }
        params.add("q", parser::unparse(&remaining));
        return Ok(Some(links.group_search_url(&pubid, &params)));
    }
    if let Some(username) = remaining.pop_single("user") {
        let userid = format!("acct:{}@{}", username, authority);
        if store.get_user_by_userid(&userid).await?.is_none() {
            return Ok(None);
        }
        params.add("q", parser::unparse(&remaining));
        return Ok(Some(links.user_search_url(&username, &params)));
    }

    Ok(None)
}

/// Requested page number; missing, non-numeric and non-positive values mean 1
pub fn requested_page(params: &MultiDict) -> usize {
    params
        .get("page")
        .and_then(|page| page.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .map(|page| usize::try_from(page).unwrap_or(usize::MAX))
        .unwrap_or(1)
}

/// Settings for [`execute`]
#[derive(Debug, Clone)]
pub struct ExecuteOptions<'a> {
    pub page: usize,
    pub page_size: usize,
    pub tag_limit: usize,
    pub user_limit: usize,
    pub links: &'a Links,
    pub bouncer_url: Option<&'a str>,
    pub now: DateTime<Utc>,
}

/// Top users are only worth showing on a group page that is not already faceted by user
fn wants_user_aggregation(query: &MultiDict) -> bool {
    query.contains("group") && !query.contains("user")
}

/// Run the search, compute facets and bucket the page into timeframes
pub async fn execute(
    store: &dyn ActivityStore,
    query: &MultiDict,
    options: &ExecuteOptions<'_>,
) -> Result<ActivityResults> {
    let filter = AnnotationFilter::from_query(query);
    let page_size = options.page_size.max(1);
    let mut page = options.page.max(1);

    let (mut total, mut annotations) = store
        .search_annotations(&filter, page_size, offset(page, page_size))
        .await?;

    // Past the end: show the last page, the one the paginator marks as current
    let last = paginator::last_page(total, page_size);
    if page > last {
        page = last;
        (total, annotations) = store
            .search_annotations(&filter, page_size, offset(page, page_size))
            .await?;
    }

    let tags = store.aggregate_tags(&filter, options.tag_limit).await?;
    let users = if wants_user_aggregation(query) {
        Some(store.aggregate_users(&filter, options.user_limit).await?)
    } else {
        None
    };

    let mut groups: HashMap<String, Option<Group>> = HashMap::new();
    for annotation in &annotations {
        if annotation.groupid != WORLD_GROUP && !groups.contains_key(&annotation.groupid) {
            let group = store.get_group(&annotation.groupid).await?;
            groups.insert(annotation.groupid.clone(), group);
        }
    }

    let presented = annotations
        .iter()
        .map(|annotation| present(annotation, &groups, options))
        .collect();

    tracing::debug!(
        total = total,
        page = page,
        page_size = page_size,
        "Activity search executed"
    );

    Ok(ActivityResults {
        page,
        total,
        aggregations: Aggregations { tags, users },
        timeframes: bucketing::bucket(presented, options.now),
    })
}

fn offset(page: usize, page_size: usize) -> usize {
    (page - 1).saturating_mul(page_size)
}

fn present(
    annotation: &Annotation,
    groups: &HashMap<String, Option<Group>>,
    options: &ExecuteOptions<'_>,
) -> PresentedAnnotation {
    let group = groups
        .get(&annotation.groupid)
        .and_then(Option::as_ref)
        .map(|group| GroupRef {
            pubid: group.pubid.clone(),
            name: group.name.clone(),
            url: options
                .links
                .group_search_url(&group.pubid, &MultiDict::new()),
        });

    PresentedAnnotation {
        id: annotation.id,
        userid: annotation.userid.clone(),
        target_uri: annotation.target_uri.clone(),
        document_title: annotation.document_title.clone(),
        text: annotation.text.clone(),
        quote: annotation.quote.clone(),
        tags: annotation.tags.clone(),
        group,
        updated: annotation.updated,
        incontext_link: links::incontext_link(options.bouncer_url, annotation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::state::InMemoryStore;

    fn params(pairs: &[(&str, &str)]) -> MultiDict {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_pins_group_and_user() {
        let p = params(&[("q", "group:other tag:x")]);

        let group = extract(&SearchRoute::GroupSearch { pubid: "abc".into() }, &p);
        assert_eq!(group.get_all("group"), vec!["abc"]);
        assert_eq!(group.get_all("tag"), vec!["x"]);

        let user = extract(&SearchRoute::UserSearch { username: "jim".into() }, &p);
        assert_eq!(user.get_all("user"), vec!["jim"]);

        let plain = extract(&SearchRoute::Search, &p);
        assert_eq!(plain.get_all("group"), vec!["other"]);
    }

    async fn directory() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .save_group(&Group::new("abc", "Readers", "acct:jim@example.com"))
            .await
            .unwrap();
        store.save_user(&User::new("jim", "example.com")).await.unwrap();
        store
    }

    async fn redirect_for(store: &InMemoryStore, route: &SearchRoute, q: &str) -> Option<String> {
        let links = Links::new("http://example.com");
        check_url(store, route, &parser::parse(q), &links, "example.com")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_check_url_redirects_single_group() {
        let store = directory().await;
        assert_eq!(
            redirect_for(&store, &SearchRoute::Search, "group:abc tag:x").await.as_deref(),
            Some("http://example.com/groups/abc/search?q=tag%3Ax")
        );
    }

    #[tokio::test]
    async fn test_check_url_redirects_single_user() {
        let store = directory().await;
        assert_eq!(
            redirect_for(&store, &SearchRoute::Search, "user:jim").await.as_deref(),
            Some("http://example.com/users/jim/search?q=")
        );
    }

    #[tokio::test]
    async fn test_check_url_leaves_other_queries_alone() {
        let store = directory().await;
        for q in ["", "tag:x", "group:a group:b", "user:a user:b"] {
            assert!(redirect_for(&store, &SearchRoute::Search, q).await.is_none());
        }
        let scoped = SearchRoute::GroupSearch { pubid: "abc".into() };
        assert!(redirect_for(&store, &scoped, "group:abc").await.is_none());
    }

    #[tokio::test]
    async fn test_check_url_ignores_unknown_group_and_user() {
        let store = directory().await;
        assert!(redirect_for(&store, &SearchRoute::Search, "group:abd").await.is_none());
        assert!(redirect_for(&store, &SearchRoute::Search, "user:jimm").await.is_none());
    }

    #[test]
    fn test_requested_page() {
        assert_eq!(requested_page(&params(&[])), 1);
        assert_eq!(requested_page(&params(&[("page", "3")])), 3);
        assert_eq!(requested_page(&params(&[("page", "-2")])), 1);
        assert_eq!(requested_page(&params(&[("page", "abc")])), 1);
        let huge = i64::MAX.to_string();
        assert_eq!(requested_page(&params(&[("page", huge.as_str())])), i64::MAX as usize);
    }

    #[test]
    fn test_user_count_lookup() {
        let aggregations = Aggregations {
            tags: vec![],
            users: Some(vec![UserCount { user: "acct:a@x".into(), count: 4 }]),
        };
        assert_eq!(aggregations.user_count("acct:a@x"), 4);
        assert_eq!(aggregations.user_count("acct:b@x"), 0);
        assert_eq!(Aggregations::default().user_count("acct:a@x"), 0);
    }

    #[tokio::test]
    async fn test_execute_buckets_and_aggregates() {
        let store = InMemoryStore::new();
        let group = Group::new("g1", "Readers", "acct:jim@example.com");
        store.save_group(&group).await.unwrap();

        let now = Utc::now();
        for text in ["one", "two"] {
            let annotation = Annotation::new("acct:jim@example.com", "https://example.com", text)
                .with_group("g1")
                .with_tags(vec!["t"])
                .with_updated(now);
            store.save_annotation(&annotation).await.unwrap();
        }

        let links = Links::new("http://example.com");
        let options = ExecuteOptions {
            page: 1,
            page_size: 10,
            tag_limit: 50,
            user_limit: 50,
            links: &links,
            bouncer_url: None,
            now,
        };

        let query = extract(&SearchRoute::GroupSearch { pubid: "g1".into() }, &MultiDict::new());
        let results = execute(&store, &query, &options).await.unwrap();

        assert_eq!(results.total, 2);
        assert_eq!(results.aggregations.tags, vec![TagCount { tag: "t".into(), count: 2 }]);
        assert_eq!(results.aggregations.user_count("acct:jim@example.com"), 2);
        assert_eq!(results.timeframes.len(), 1);

        let bucket = &results.timeframes[0].document_buckets[0];
        assert_eq!(bucket.annotations_count(), 2);
        let group_ref = bucket.presented_annotations[0].group.as_ref().unwrap();
        assert_eq!(group_ref.name, "Readers");

        let plain = execute(&store, &MultiDict::new(), &options).await.unwrap();
        assert!(plain.aggregations.users.is_none());
    }

    #[tokio::test]
    async fn test_execute_past_the_end_shows_last_page() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        for (i, text) in ["newest", "middle", "oldest"].into_iter().enumerate() {
            let annotation = Annotation::new("acct:jim@example.com", "https://example.com", text)
                .with_updated(now - chrono::Duration::minutes(i as i64));
            store.save_annotation(&annotation).await.unwrap();
        }

        let links = Links::new("http://example.com");
        let mut options = ExecuteOptions {
            page: 9,
            page_size: 1,
            tag_limit: 50,
            user_limit: 50,
            links: &links,
            bouncer_url: None,
            now,
        };

        let results = execute(&store, &MultiDict::new(), &options).await.unwrap();
        assert_eq!(results.page, 3);
        assert_eq!(results.total, 3);
        let shown = &results.timeframes[0].document_buckets[0].presented_annotations;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].text, "oldest");

        // No overflow computing the offset of an absurd page
        options.page = i64::MAX as usize;
        options.page_size = 200;
        let results = execute(&store, &MultiDict::new(), &options).await.unwrap();
        assert_eq!(results.page, 1);
        assert_eq!(results.timeframes[0].document_buckets[0].annotations_count(), 3);
    }
}
