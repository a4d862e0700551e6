use crate::error::{AppError, Result};
use crate::links;
use crate::models::{Annotation, Group, User};
use crate::search::{TagCount, UserCount};
use crate::state::{ActivityStore, AnnotationFilter};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Initial contents of an [`InMemoryStore`], as loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// In-memory activity store (for development and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    annotations: Arc<DashMap<Uuid, Annotation>>,
    users: Arc<DashMap<String, User>>,
    groups: Arc<DashMap<String, Group>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            annotations: Arc::new(DashMap::new()),
            users: Arc::new(DashMap::new()),
            groups: Arc::new(DashMap::new()),
        }
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for user in seed.users {
            store.users.insert(user.username.to_lowercase(), user);
        }
        for group in seed.groups {
            store.groups.insert(group.pubid.clone(), group);
        }
        for annotation in seed.annotations {
            store.annotations.insert(annotation.id, annotation);
        }

        tracing::info!(
            users = store.users.len(),
            groups = store.groups.len(),
            annotations = store.annotations.len(),
            "In-memory store seeded"
        );
        store
    }

    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Storage(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        let seed: SeedData = serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Invalid seed file {}: {}", path.display(), e))
        })?;
        Ok(Self::from_seed(seed))
    }

    fn matching(&self, filter: &AnnotationFilter) -> Vec<Annotation> {
        self.annotations
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort counts by count descending, then key ascending, and truncate
fn top_counts(counts: HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}

#[async_trait]
impl ActivityStore for InMemoryStore {
    async fn save_annotation(&self, annotation: &Annotation) -> Result<()> {
        self.annotations.insert(annotation.id, annotation.clone());
        tracing::debug!(annotation_id = %annotation.id, "Annotation saved");
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.users.insert(user.username.to_lowercase(), user.clone());
        tracing::debug!(username = %user.username, "User saved");
        Ok(())
    }

    async fn save_group(&self, group: &Group) -> Result<()> {
        self.groups.insert(group.pubid.clone(), group.clone());
        tracing::debug!(pubid = %group.pubid, "Group saved");
        Ok(())
    }

    async fn search_annotations(
        &self,
        filter: &AnnotationFilter,
        limit: usize,
        offset: usize,
    ) -> Result<(u64, Vec<Annotation>)> {
        let mut annotations = self.matching(filter);

        // Newest first; id breaks ties so pages are stable
        annotations.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.id.cmp(&b.id)));

        let total = annotations.len() as u64;
        let page = annotations.into_iter().skip(offset).take(limit).collect();
        Ok((total, page))
    }

    async fn aggregate_tags(&self, filter: &AnnotationFilter, limit: usize) -> Result<Vec<TagCount>> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for annotation in self.matching(filter) {
            for tag in annotation.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        Ok(top_counts(counts, limit)
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect())
    }

    async fn aggregate_users(&self, filter: &AnnotationFilter, limit: usize) -> Result<Vec<UserCount>> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for annotation in self.matching(filter) {
            *counts.entry(annotation.userid).or_insert(0) += 1;
        }

        Ok(top_counts(counts, limit)
            .into_iter()
            .map(|(user, count)| UserCount { user, count })
            .collect())
    }

    async fn get_user_by_userid(&self, userid: &str) -> Result<Option<User>> {
        let Some((username, authority)) = links::split_user(userid) else {
            return Ok(None);
        };
        Ok(self
            .users
            .get(&username.to_lowercase())
            .filter(|entry| entry.authority == authority)
            .map(|entry| entry.clone()))
    }

    async fn get_group(&self, pubid: &str) -> Result<Option<Group>> {
        Ok(self.groups.get(pubid).map(|entry| entry.clone()))
    }

    async fn groups_for_user(&self, userid: &str) -> Result<Vec<Group>> {
        let mut groups: Vec<Group> = self
            .groups
            .iter()
            .filter(|entry| entry.is_member(userid))
            .map(|entry| entry.value().clone())
            .collect();
        groups.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(groups)
    }

    async fn leave_group(&self, pubid: &str, userid: &str) -> Result<()> {
        match self.groups.get_mut(pubid) {
            Some(mut group) => {
                group.members.retain(|member| member != userid);
                tracing::info!(pubid = %pubid, userid = %userid, "Member left group");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Group {} not found", pubid))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        let now = Utc::now();
        for (i, (user, tags)) in [
            ("jim", vec!["a", "b"]),
            ("amy", vec!["a"]),
            ("jim", vec!["c"]),
        ]
        .into_iter()
        .enumerate()
        {
            let annotation = Annotation::new(
                format!("acct:{}@example.com", user),
                "https://example.com",
                format!("note {}", i),
            )
            .with_tags(tags)
            .with_updated(now - Duration::minutes(i as i64));
            store.save_annotation(&annotation).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_search_sorted_newest_first_and_paged() {
        let store = seeded().await;

        let (total, page) = store
            .search_annotations(&AnnotationFilter::default(), 2, 0)
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text, "note 0");
        assert_eq!(page[1].text, "note 1");

        let (_, rest) = store
            .search_annotations(&AnnotationFilter::default(), 2, 2)
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "note 2");
    }

    #[tokio::test]
    async fn test_tag_and_user_aggregations() {
        let store = seeded().await;
        let filter = AnnotationFilter::default();

        let tags = store.aggregate_tags(&filter, 10).await.unwrap();
        assert_eq!(tags[0], TagCount { tag: "a".to_string(), count: 2 });
        assert_eq!(tags.len(), 3);

        let users = store.aggregate_users(&filter, 1).await.unwrap();
        assert_eq!(
            users,
            vec![UserCount { user: "acct:jim@example.com".to_string(), count: 2 }]
        );
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let store = InMemoryStore::new();
        store.save_user(&User::new("Jim", "example.com")).await.unwrap();

        assert!(store
            .get_user_by_userid("acct:JIM@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_user_by_userid("acct:jim@elsewhere.org")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_leave_group() {
        let store = InMemoryStore::new();
        let mut group = Group::new("g1", "Readers", "acct:jim@example.com");
        group.members.push("acct:amy@example.com".to_string());
        store.save_group(&group).await.unwrap();

        assert_eq!(store.groups_for_user("acct:amy@example.com").await.unwrap().len(), 1);
        store.leave_group("g1", "acct:amy@example.com").await.unwrap();
        assert!(store.groups_for_user("acct:amy@example.com").await.unwrap().is_empty());

        let err = store.leave_group("missing", "acct:amy@example.com").await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_seed_from_json() {
        let seed: SeedData = serde_json::from_str(
            r#"{
                "users": [{"username": "jim", "authority": "example.com",
                           "registered_date": "2016-11-01T00:00:00Z"}],
                "groups": [],
                "annotations": []
            }"#,
        )
        .unwrap();
        let store = InMemoryStore::from_seed(seed);
        assert_eq!(store.users.len(), 1);
    }
}
