//! HTML rendering of the activity search page
//!
//! Rendering is a single pure pass over a [`SearchPageContext`]: no I/O,
//! no clocks, no hash-ordered iteration, so the same context always
//! produces the same bytes. Every form that changes the search posts back
//! to [`SearchPageContext::request_path`] and carries the current query as
//! a hidden `q` input; the handlers rely on both.

mod annotation_card;
mod context;
mod layout;
mod navbar;
mod paginator;
mod results;
mod sidebar;

pub use context::{
    GroupInfo, GroupSuggestion, MemberInfo, SearchOpts, SearchPageContext, UserInfo,
};
pub use layout::tojson;

use maud::{html, Markup};

/// Render the complete search page document
pub fn render_search_page(ctx: &SearchPageContext) -> Markup {
    let content = html! {
        (navbar::navbar(ctx))
        main.search-result-container {
            @if ctx.group.is_some() || ctx.user.is_some() {
                (navbar::result_nav(ctx))
            }
            div.search-result-container__content {
                @if !ctx.more_info {
                    (results::results(ctx))
                }
                (sidebar::sidebar(ctx))
            }
            (paginator::paginator(ctx))
        }
    };

    layout::base(&ctx.title(), content, layout::scripts(ctx))
}

/// A form that posts to the current page, preserving the query
pub(crate) fn post_form(ctx: &SearchPageContext, class: &str, body: Markup) -> Markup {
    html! {
        form class=(class) method="POST" action=(ctx.request_path) {
            input type="hidden" name="q" value=(ctx.q);
            (body)
        }
    }
}
