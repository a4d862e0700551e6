//! Buttons posted from the search page
//!
//! Each button submits a form named after the action it performs. The
//! handlers turn the action into a redirect, never into a rendered page, so
//! a browser reload does not resubmit the form.

use crate::multidict::MultiDict;
use crate::search::parser;

/// A state-changing button, with its value where it carries one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Show the group or user details instead of the results
    MoreInfo,
    /// Return from the details to the results
    Back,
    /// Leave the group with this pubid
    GroupLeave(String),
    /// Add or remove a `user:` term for this userid
    ToggleUserFacet(String),
    /// Add or remove a `tag:` term
    ToggleTagFacet(String),
}

impl FormAction {
    pub const MORE_INFO: &'static str = "more_info";
    pub const BACK: &'static str = "back";
    pub const GROUP_LEAVE: &'static str = "group_leave";
    pub const TOGGLE_USER_FACET: &'static str = "toggle_user_facet";
    pub const TOGGLE_TAG_FACET: &'static str = "toggle_tag_facet";

    /// The first action found in a submitted form
    pub fn from_form(form: &MultiDict) -> Option<Self> {
        if form.contains(Self::MORE_INFO) {
            return Some(Self::MoreInfo);
        }
        if form.contains(Self::BACK) {
            return Some(Self::Back);
        }

        let value = |key: &str| form.get(key).map(str::to_string);
        value(Self::GROUP_LEAVE)
            .map(Self::GroupLeave)
            .or_else(|| value(Self::TOGGLE_USER_FACET).map(Self::ToggleUserFacet))
            .or_else(|| value(Self::TOGGLE_TAG_FACET).map(Self::ToggleTagFacet))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MoreInfo => Self::MORE_INFO,
            Self::Back => Self::BACK,
            Self::GroupLeave(_) => Self::GROUP_LEAVE,
            Self::ToggleUserFacet(_) => Self::TOGGLE_USER_FACET,
            Self::ToggleTagFacet(_) => Self::TOGGLE_TAG_FACET,
        }
    }
}

/// Add `tag:{tag}` to `q`, or remove it when `q` already has it
pub fn toggle_tag_facet(q: &str, tag: &str) -> String {
    toggle_term(q, "tag", tag)
}

/// Add `user:{username}` to `q`, or remove it when `q` already has it
pub fn toggle_user_facet(q: &str, username: &str) -> String {
    toggle_term(q, "user", username)
}

fn toggle_term(q: &str, key: &str, value: &str) -> String {
    let mut query = parser::parse(q);
    let mut facets = query.remove_all(key);

    match facets.iter().position(|facet| facet == value) {
        Some(index) => {
            facets.remove(index);
        }
        None => facets.push(value.to_string()),
    }
    for facet in facets {
        query.add(key, facet);
    }

    parser::unparse(&query)
}
