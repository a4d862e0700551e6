use super::{post_form, GroupInfo, SearchPageContext, UserInfo};
use maud::{html, Markup};

/// Group details when a group is present, user details when a user is, nothing otherwise
pub fn sidebar(ctx: &SearchPageContext) -> Markup {
    html! {
        @if let Some(group) = &ctx.group {
            (group_sidebar(ctx, group))
        } @else if let Some(user) = &ctx.user {
            (user_sidebar(ctx, user))
        }
    }
}

fn group_sidebar(ctx: &SearchPageContext, group: &GroupInfo) -> Markup {
    html! {
        aside.search-result-sidebar.search-result-sidebar--group {
            section.search-result-sidebar__section {
                h1.group-details__heading { (group.name) }
                @if let Some(description) = &group.description {
                    p.group-details__description { (description) }
                }
                dl.group-details__stats {
                    dt { "Created" }
                    dd.group-details__created { (group.created) }
                    dt { "Annotations" }
                    dd.group-details__annotations { (ctx.total) }
                }
                div.group-details__invite {
                    label for="group-invite-url" { "Invite new members" }
                    input.group-details__invite-url
                        #group-invite-url
                        type="text"
                        value=(group.url)
                        readonly;
                }
                @if let Some(edit_url) = &ctx.group_edit_url {
                    a.group-details__edit-link href=(edit_url) { "Edit group" }
                }
            }
            @if !group.members.is_empty() {
                section.search-result-sidebar__section {
                    h2.search-result-sidebar__subtitle {
                        "Members (" (group.members.len()) ")"
                    }
                    ul.group-details__members {
                        @for member in &group.members {
                            li.group-details__member {
                                (post_form(ctx, "group-details__member-form", html! {
                                    button.group-details__member-facet.is-faceted[member.faceted_by]
                                        type="submit"
                                        name="toggle_user_facet"
                                        value=(member.userid)
                                        title={ "Show annotations by " (member.username) } {
                                        span.group-details__member-username { (member.username) }
                                        span.group-details__member-count { (member.count) }
                                    }
                                }))
                            }
                        }
                    }
                }
            }
            (tag_chooser(ctx))
            section.search-result-sidebar__section {
                (post_form(ctx, "group-details__leave-form", html! {
                    button.group-details__leave type="submit" name="group_leave" value=(group.pubid) {
                        "Leave this group"
                    }
                }))
            }
        }
    }
}

fn user_sidebar(ctx: &SearchPageContext, user: &UserInfo) -> Markup {
    html! {
        aside.search-result-sidebar.search-result-sidebar--user {
            section.search-result-sidebar__section {
                h1.user-details__heading { (user.name) }
                @if let Some(description) = &user.description {
                    p.user-details__description { (description) }
                }
                dl.user-details__stats {
                    dt { "Annotations" }
                    dd.user-details__annotations { (user.num_annotations) }
                    @if let Some(location) = &user.location {
                        dt { "Location" }
                        dd.user-details__location { (location) }
                    }
                    @if let Some(uri) = &user.uri {
                        dt { "Link" }
                        dd.user-details__link {
                            a href=(uri) rel="nofollow noopener" target="_blank" {
                                (user.domain.as_deref().unwrap_or(uri))
                            }
                        }
                    }
                    @if let Some(orcid) = &user.orcid {
                        dt { "ORCID" }
                        dd.user-details__orcid {
                            a href={ "https://orcid.org/" (orcid) } rel="nofollow noopener" target="_blank" {
                                (orcid)
                            }
                        }
                    }
                    dt { "Joined" }
                    dd.user-details__joined { (user.registered_date) }
                }
                @if let Some(edit_url) = &user.edit_url {
                    a.user-details__edit-link href=(edit_url) { "Edit profile" }
                }
            }
            (tag_chooser(ctx))
        }
    }
}

/// Top tags, each a button that adds or removes the tag from the query
pub fn tag_chooser(ctx: &SearchPageContext) -> Markup {
    let faceted = ctx.faceted_tags();

    html! {
        @if !ctx.aggregations.tags.is_empty() {
            section.search-result-sidebar__section.search-result-sidebar__tags {
                h2.search-result-sidebar__subtitle { "Top tags" }
                ul.tag-chooser {
                    @for entry in &ctx.aggregations.tags {
                        li.tag-chooser__item {
                            (post_form(ctx, "tag-chooser__form", html! {
                                button.tag-chooser__tag.is-faceted[faceted.contains(&entry.tag)]
                                    type="submit"
                                    name="toggle_tag_facet"
                                    value=(entry.tag) {
                                    span.tag-chooser__name { (entry.tag) }
                                    span.tag-chooser__count { (entry.count) }
                                }
                            }))
                        }
                    }
                }
            }
        }
    }
}
