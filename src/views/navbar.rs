use super::{post_form, SearchPageContext};
use maud::{html, Markup};

/// Top bar with the search form and the lozenge of a scoped page
pub fn navbar(ctx: &SearchPageContext) -> Markup {
    html! {
        header.nav-bar {
            div.nav-bar__content {
                a.nav-bar__logo-container href={ (ctx.links.base_url) "/search" } title="Search" {
                    "Annotation activity"
                }
                form.search-bar.js-search-bar method="GET" action=(ctx.request_path) role="search" {
                    div.search-bar__lozenges {
                        @if let Some(username) = &ctx.opts.search_username {
                            (lozenge("user", username))
                        }
                        @if let Some(groupname) = &ctx.opts.search_groupname {
                            (lozenge("group", groupname))
                        }
                    }
                    input.search-bar__input
                        type="text"
                        name="q"
                        value=(ctx.q)
                        placeholder="Search…"
                        autocomplete="off"
                        aria-label="Search";
                }
            }
        }
    }
}

fn lozenge(facet: &str, name: &str) -> Markup {
    html! {
        div.lozenge {
            span.lozenge__content { (facet) ":" (name) }
            button.lozenge__close type="submit" name="delete_lozenge" title="Remove search term" {
                "×"
            }
        }
    }
}

/// Switch between the results and the group/user details on narrow screens
pub fn result_nav(ctx: &SearchPageContext) -> Markup {
    let details_label = if ctx.group.is_some() {
        "Group info"
    } else {
        "User info"
    };

    if ctx.more_info {
        post_form(
            ctx,
            "search-result-nav",
            html! {
                button.search-result-nav__button type="submit" name="back" {
                    "Back"
                }
            },
        )
    } else {
        post_form(
            ctx,
            "search-result-nav",
            html! {
                h1.search-result-nav__title { "Matching annotations" }
                button.search-result-nav__button type="submit" name="more_info" {
                    (details_label)
                }
            },
        )
    }
}
