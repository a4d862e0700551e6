//! Server-rendered activity pages for annotation search.
//!
//! The crate is split along the same seams as the request cycle:
//!
//! - [`state`]: annotation, user and group storage behind the [`state::ActivityStore`] trait
//! - [`search`]: query language, query execution and timeframe bucketing
//! - [`paginator`]: page arithmetic for result lists
//! - [`links`]: URL helpers shared by handlers and markup
//! - [`activity`]: axum handlers that assemble a [`views::SearchPageContext`]
//! - [`views`]: the pure HTML renderer
//! - [`api`]: router, shared state and health endpoints

pub mod activity;
pub mod api;
pub mod config;
pub mod error;
pub mod links;
pub mod models;
pub mod multidict;
pub mod paginator;
pub mod search;
pub mod state;
pub mod views;

pub use error::{AppError, Result};
