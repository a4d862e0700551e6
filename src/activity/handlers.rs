use super::actions::{self, FormAction};
use super::identity::AuthenticatedUser;
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::links;
use crate::multidict::MultiDict;
use crate::paginator::paginate;
use crate::search::{self, ExecuteOptions, SearchRoute};
use crate::views::{
    render_search_page, GroupInfo, GroupSuggestion, MemberInfo, SearchPageContext, UserInfo,
};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

const NO_RESULTS: &str = "No annotations matched your search.";

/// What a GET on a search route resolved to
enum SearchOutcome {
    Page(SearchPageContext),
    /// The query names a single group or user that has a page of its own
    Redirect(String),
}

/// `GET /search`
pub async fn search(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Result<Response> {
    ensure_enabled(&state)?;
    let params = MultiDict::from_urlencoded(raw.as_deref().unwrap_or_default());

    match search_page(&state, &SearchRoute::Search, &params, uri.path(), &user).await? {
        SearchOutcome::Redirect(location) => Ok(found(&location)),
        SearchOutcome::Page(ctx) => Ok(render_search_page(&ctx).into_response()),
    }
}

/// `GET /groups/{pubid}/search`
pub async fn group_search(
    State(state): State<AppState>,
    Path(pubid): Path<String>,
    user: AuthenticatedUser,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Result<Response> {
    ensure_enabled(&state)?;
    let params = MultiDict::from_urlencoded(raw.as_deref().unwrap_or_default());
    if params.contains("delete_lozenge") {
        return Ok(delete_lozenge(&state, params));
    }

    let route = SearchRoute::GroupSearch {
        pubid: pubid.clone(),
    };
    let mut ctx = match search_page(&state, &route, &params, uri.path(), &user).await? {
        SearchOutcome::Redirect(location) => return Ok(found(&location)),
        SearchOutcome::Page(ctx) => ctx,
    };
    ctx.opts.search_groupname = Some(pubid.clone());

    let Some(group) = state.store.get_group(&pubid).await? else {
        return Ok(render_search_page(&ctx).into_response());
    };
    ctx.opts.search_groupname = Some(group.name.clone());

    let Some(userid) = user.userid().filter(|userid| group.is_member(userid)) else {
        return Ok(render_search_page(&ctx).into_response());
    };

    let query = search::extract(&route, &params);
    let faceted_usernames = query.get_all("user");
    let mut members: Vec<MemberInfo> = group
        .members
        .iter()
        .map(|member| {
            let username = links::username_from_id(member).to_string();
            MemberInfo {
                faceted_by: faceted_usernames.contains(&username.as_str()),
                count: ctx.aggregations.user_count(member),
                userid: member.clone(),
                username,
            }
        })
        .collect();
    members.sort_by_key(|member| member.username.to_lowercase());

    ctx.group = Some(GroupInfo {
        created: group.created.format("%B, %Y").to_string(),
        description: group.description.clone(),
        name: group.name.clone(),
        pubid: group.pubid.clone(),
        url: state.links.group_url(&group.pubid, &group.slug()),
        members,
    });
    if group.is_admin(userid) {
        ctx.group_edit_url = Some(state.links.group_edit_url(&group.pubid));
    }
    ctx.more_info = params.contains(FormAction::MORE_INFO);

    if ctx.q.is_empty() {
        ctx.zero_message = format!(
            "The group \u{201c}{}\u{201d} have not made any annotations yet.",
            group.name
        );
    }

    Ok(render_search_page(&ctx).into_response())
}

/// `GET /users/{username}/search`
pub async fn user_search(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthenticatedUser,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Result<Response> {
    ensure_enabled(&state)?;
    let params = MultiDict::from_urlencoded(raw.as_deref().unwrap_or_default());
    if params.contains("delete_lozenge") {
        return Ok(delete_lozenge(&state, params));
    }

    let route = SearchRoute::UserSearch {
        username: username.clone(),
    };
    let mut ctx = match search_page(&state, &route, &params, uri.path(), &user).await? {
        SearchOutcome::Redirect(location) => return Ok(found(&location)),
        SearchOutcome::Page(ctx) => ctx,
    };
    ctx.opts.search_username = Some(username.clone());
    ctx.more_info = params.contains(FormAction::MORE_INFO);

    let userid = format!("acct:{}@{}", username, state.config.auth.authority);
    let Some(found_user) = state.store.get_user_by_userid(&userid).await? else {
        return Ok(render_search_page(&ctx).into_response());
    };

    let name = found_user.name().to_string();
    let viewing_self = user.userid() == Some(found_user.userid().as_str());
    ctx.opts.search_username = Some(name.clone());

    ctx.user = Some(UserInfo {
        name: name.clone(),
        num_annotations: ctx.total,
        description: found_user.description.clone(),
        registered_date: found_user.registered_date.format("%B, %Y").to_string(),
        location: found_user.location.clone(),
        domain: found_user.uri.as_deref().and_then(links::domain),
        uri: found_user.uri.clone(),
        orcid: found_user.orcid.clone(),
        edit_url: viewing_self.then(|| state.links.account_profile_url()),
    });

    if ctx.q.is_empty() {
        ctx.zero_message = if viewing_self {
            "You haven't made any annotations yet.".to_string()
        } else {
            format!("{} hasn't made any annotations yet.", name)
        };
    }

    Ok(render_search_page(&ctx).into_response())
}

/// `POST /groups/{pubid}/search`
pub async fn group_search_action(
    State(state): State<AppState>,
    Path(pubid): Path<String>,
    user: AuthenticatedUser,
    body: String,
) -> Result<Response> {
    ensure_enabled(&state)?;
    let form = MultiDict::from_urlencoded(&body);
    let action = FormAction::from_form(&form)
        .ok_or_else(|| AppError::Validation("No search page action in form".to_string()))?;
    let route = SearchRoute::GroupSearch { pubid };

    tracing::debug!(action = action.name(), "Group search page action");

    match action {
        FormAction::GroupLeave(pubid) => group_leave(&state, &user, &pubid, form).await,
        FormAction::ToggleUserFacet(userid) => {
            let (username, _) = links::split_user(&userid).ok_or_else(|| {
                AppError::Validation(format!("Malformed userid: {}", userid))
            })?;
            let q = actions::toggle_user_facet(form.get("q").unwrap_or_default(), username);
            let mut params = without(form, FormAction::TOGGLE_USER_FACET);
            params.set("q", q);
            Ok(see_other(&page_url(&state, &route, &params)))
        }
        action => page_action(&state, &route, action, form),
    }
}

/// `POST /users/{username}/search`
pub async fn user_search_action(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: String,
) -> Result<Response> {
    ensure_enabled(&state)?;
    let form = MultiDict::from_urlencoded(&body);
    let action = FormAction::from_form(&form)
        .ok_or_else(|| AppError::Validation("No search page action in form".to_string()))?;
    let route = SearchRoute::UserSearch { username };

    tracing::debug!(action = action.name(), "User search page action");

    match action {
        FormAction::GroupLeave(_) | FormAction::ToggleUserFacet(_) => Err(AppError::Validation(
            format!("{} is not available on user pages", action.name()),
        )),
        action => page_action(&state, &route, action, form),
    }
}

/// Actions shared by the group and user pages
fn page_action(
    state: &AppState,
    route: &SearchRoute,
    action: FormAction,
    form: MultiDict,
) -> Result<Response> {
    let params = match action {
        FormAction::MoreInfo => form,
        FormAction::Back => without(form, FormAction::BACK),
        FormAction::ToggleTagFacet(tag) => {
            let q = actions::toggle_tag_facet(form.get("q").unwrap_or_default(), &tag);
            let mut params = without(form, FormAction::TOGGLE_TAG_FACET);
            params.set("q", q);
            params
        }
        other => {
            return Err(AppError::Internal(format!(
                "{} must be handled by its page",
                other.name()
            )))
        }
    };

    Ok(see_other(&page_url(state, route, &params)))
}

async fn group_leave(
    state: &AppState,
    user: &AuthenticatedUser,
    pubid: &str,
    form: MultiDict,
) -> Result<Response> {
    if state.store.get_group(pubid).await?.is_none() {
        return Err(AppError::NotFound(format!("Group {} not found", pubid)));
    }

    match user.userid() {
        Some(userid) => state.store.leave_group(pubid, userid).await?,
        None => tracing::debug!(pubid = %pubid, "Anonymous group leave ignored"),
    }

    let params = without(form, FormAction::GROUP_LEAVE);
    Ok(see_other(&state.links.search_url(&params)))
}

/// Drop the group or user lozenge: same query on the general search page
fn delete_lozenge(state: &AppState, params: MultiDict) -> Response {
    let params = without(params, "delete_lozenge");
    see_other(&state.links.search_url(&params))
}

/// Run the search shared by every route and build the base page context
async fn search_page(
    state: &AppState,
    route: &SearchRoute,
    params: &MultiDict,
    request_path: &str,
    user: &AuthenticatedUser,
) -> Result<SearchOutcome> {
    let query = search::extract(route, params);
    let redirect = search::check_url(
        state.store.as_ref(),
        route,
        &query,
        &state.links,
        &state.config.auth.authority,
    )
    .await?;
    if let Some(location) = redirect {
        tracing::debug!(location = %location, "Redirecting single facet search");
        return Ok(SearchOutcome::Redirect(location));
    }

    let settings = &state.config.search;
    let page_size = page_size(params, settings.page_size);
    let options = ExecuteOptions {
        page: search::requested_page(params),
        page_size,
        tag_limit: settings.tag_aggregation_limit,
        user_limit: settings.user_aggregation_limit,
        links: &state.links,
        bouncer_url: state.config.links.bouncer_url.as_deref(),
        now: Utc::now(),
    };
    let results = search::execute(state.store.as_ref(), &query, &options).await?;

    let groups_suggestions = match user.userid() {
        Some(userid) => state
            .store
            .groups_for_user(userid)
            .await?
            .into_iter()
            .map(|group| GroupSuggestion {
                name: group.name,
                pubid: group.pubid,
            })
            .collect(),
        None => Vec::new(),
    };

    let mut ctx = SearchPageContext::new(request_path, state.links.clone());
    ctx.q = params.get("q").unwrap_or_default().to_string();
    ctx.page = paginate(params, request_path, results.total, page_size);
    ctx.total = results.total;
    ctx.aggregations = results.aggregations;
    ctx.timeframes = results.timeframes;
    ctx.groups_suggestions = groups_suggestions;
    ctx.zero_message = NO_RESULTS.to_string();

    Ok(SearchOutcome::Page(ctx))
}

/// `page_size` param when it is a positive number, the configured size otherwise
fn page_size(params: &MultiDict, default: usize) -> usize {
    params
        .get("page_size")
        .and_then(|size| size.trim().parse::<usize>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(default)
}

fn ensure_enabled(state: &AppState) -> Result<()> {
    if state.config.features.search_page {
        Ok(())
    } else {
        Err(AppError::NotFound("Search page is not enabled".to_string()))
    }
}

fn page_url(state: &AppState, route: &SearchRoute, params: &MultiDict) -> String {
    match route {
        SearchRoute::GroupSearch { pubid } => state.links.group_search_url(pubid, params),
        SearchRoute::UserSearch { username } => state.links.user_search_url(username, params),
        SearchRoute::Search => state.links.search_url(params),
    }
}

fn without(mut params: MultiDict, key: &str) -> MultiDict {
    params.remove_all(key);
    params
}

/// 303, so the browser follows a POST with a GET
fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// 302
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
