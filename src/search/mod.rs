//! Annotation search for the activity pages
//!
//! - **Query language**: `tag:`, `user:`, `group:`, `uri:`, `quote:`, `text:`
//!   terms plus free text, see [`parser`]
//! - **Scoping**: group and user pages pin their facet into the query
//! - **Aggregations**: top tags always, top users on group pages
//! - **Bucketing**: results grouped into timeframes, then by document
//!
//! ```text
//!   request params ──► extract ──► check_url ──► execute ──► ActivityResults
//!                        │                          │
//!                     parser                  ActivityStore
//!                                                   │
//!                                               bucketing
//! ```

pub mod bucketing;
pub mod parser;
mod query;

pub use bucketing::{DocumentBucket, GroupRef, PresentedAnnotation, Timeframe};
pub use query::{
    check_url, execute, extract, requested_page, ActivityResults, Aggregations, ExecuteOptions,
    SearchRoute, TagCount, UserCount,
};
