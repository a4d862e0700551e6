pub mod filter;
pub mod store;

pub use filter::AnnotationFilter;
pub use store::{InMemoryStore, SeedData};

use crate::error::Result;
use crate::models::{Annotation, Group, User};
use crate::search::{TagCount, UserCount};
use async_trait::async_trait;

/// Storage and search backend behind the activity pages
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Save (insert or replace) an annotation
    async fn save_annotation(&self, annotation: &Annotation) -> Result<()>;

    /// Save (insert or replace) a user, keyed by username
    async fn save_user(&self, user: &User) -> Result<()>;

    /// Save (insert or replace) a group, keyed by pubid
    async fn save_group(&self, group: &Group) -> Result<()>;

    /// One page of matching annotations, newest `updated` first, plus the total match count
    async fn search_annotations(
        &self,
        filter: &AnnotationFilter,
        limit: usize,
        offset: usize,
    ) -> Result<(u64, Vec<Annotation>)>;

    /// Most used tags across all matching annotations
    async fn aggregate_tags(&self, filter: &AnnotationFilter, limit: usize) -> Result<Vec<TagCount>>;

    /// Most active users across all matching annotations
    async fn aggregate_users(&self, filter: &AnnotationFilter, limit: usize) -> Result<Vec<UserCount>>;

    /// Look up a user by `acct:username@authority`; the username is case-insensitive
    async fn get_user_by_userid(&self, userid: &str) -> Result<Option<User>>;

    /// Look up a group by pubid
    async fn get_group(&self, pubid: &str) -> Result<Option<Group>>;

    /// Groups the user is a member of, ordered by name
    async fn groups_for_user(&self, userid: &str) -> Result<Vec<Group>>;

    /// Remove a member from a group; unknown groups are an error
    async fn leave_group(&self, pubid: &str, userid: &str) -> Result<()>;
}
