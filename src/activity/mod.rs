//! Request handlers for the activity pages
//!
//! GET requests run the search and render the page. POST requests come from
//! the buttons on the page and always answer with a `303 See Other` back to
//! a GET URL carrying the updated query.

mod actions;
mod handlers;
mod identity;

pub use actions::{toggle_tag_facet, toggle_user_facet, FormAction};
pub use handlers::{group_search, group_search_action, search, user_search, user_search_action};
pub use identity::AuthenticatedUser;
