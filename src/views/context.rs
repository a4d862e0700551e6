//! The view-model handed to the renderer

use crate::links::Links;
use crate::paginator::Page;
use crate::search::{parser, Aggregations, Timeframe};
use serde::{Deserialize, Serialize};

/// A group offered as a search bar suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSuggestion {
    pub name: String,
    pub pubid: String,
}

/// Name shown in the search bar lozenge of a scoped page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOpts {
    #[serde(default)]
    pub search_username: Option<String>,
    #[serde(default)]
    pub search_groupname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub username: String,
    pub userid: String,
    pub count: u64,
    /// The search is already narrowed to this member
    pub faceted_by: bool,
}

/// Group sidebar data, only present for members of the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Formatted creation month, e.g. `March, 2017`
    pub created: String,
    #[serde(default)]
    pub description: Option<String>,
    pub name: String,
    pub pubid: String,
    /// Invite / share URL
    pub url: String,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
}

/// User sidebar data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub num_annotations: u64,
    #[serde(default)]
    pub description: Option<String>,
    /// Formatted registration month, e.g. `November, 2016`
    pub registered_date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
    /// Only set when users view their own page
    #[serde(default)]
    pub edit_url: Option<String>,
}

/// Everything the search page renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPageContext {
    /// Path of the current request; every state-changing form posts here
    pub request_path: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub timeframes: Vec<Timeframe>,
    #[serde(default)]
    pub aggregations: Aggregations,
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub groups_suggestions: Vec<GroupSuggestion>,
    /// Shown instead of results when there are none
    pub zero_message: String,
    #[serde(default)]
    pub opts: SearchOpts,
    /// Mobile "more info" view: sidebar instead of results
    #[serde(default)]
    pub more_info: bool,
    #[serde(default)]
    pub group: Option<GroupInfo>,
    #[serde(default)]
    pub group_edit_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub links: Links,
}

impl SearchPageContext {
    pub fn new(request_path: impl Into<String>, links: Links) -> Self {
        Self {
            request_path: request_path.into(),
            q: String::new(),
            total: 0,
            timeframes: Vec::new(),
            aggregations: Aggregations::default(),
            page: Page::default(),
            groups_suggestions: Vec::new(),
            zero_message: String::new(),
            opts: SearchOpts::default(),
            more_info: false,
            group: None,
            group_edit_url: None,
            user: None,
            links,
        }
    }

    /// Tags the current query is already narrowed to
    pub fn faceted_tags(&self) -> Vec<String> {
        parser::parse(&self.q)
            .get_all("tag")
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn show_paginator(&self) -> bool {
        !self.more_info && self.page.max > 1
    }

    /// Browser title
    pub fn title(&self) -> String {
        if let Some(group) = &self.group {
            format!("{} | Annotation activity", group.name)
        } else if let Some(user) = &self.user {
            format!("{} | Annotation activity", user.name)
        } else {
            "Search results | Annotation activity".to_string()
        }
    }
}
