use annotation_activity::{
    links::Links,
    multidict::MultiDict,
    paginator::paginate,
    search::{bucketing, Aggregations, GroupRef, PresentedAnnotation, TagCount},
    views::{
        render_search_page, GroupInfo, GroupSuggestion, MemberInfo, SearchPageContext, UserInfo,
    },
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 3, 20, 12, 0, 0).unwrap()
}

fn presented(n: u128, uri: &str, user: &str, updated: DateTime<Utc>, tags: &[&str]) -> PresentedAnnotation {
    PresentedAnnotation {
        id: Uuid::from_u128(n),
        userid: format!("acct:{}@example.com", user),
        target_uri: uri.to_string(),
        document_title: Some("Cell biology".to_string()),
        text: "First paragraph.\n\nSecond paragraph.".to_string(),
        quote: Some("the cell cycle".to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        group: None,
        updated,
        incontext_link: Some(format!("{}#annotations:{}", uri, n)),
    }
}

/// A general search page with two timeframes of results
fn search_context() -> SearchPageContext {
    let annotations = vec![
        presented(1, "https://www.example.com/cells/", "jim", now() - Duration::days(1), &["biology"]),
        presented(2, "https://www.example.com/cells/", "amy", now() - Duration::days(2), &["biology", "cells"]),
        presented(3, "file:///notes/mitosis.pdf", "jim", now() - Duration::days(40), &[]),
    ];

    let mut ctx = SearchPageContext::new("/search", Links::new("http://example.com"));
    ctx.q = "tag:biology".to_string();
    ctx.total = 3;
    ctx.timeframes = bucketing::bucket(annotations, now());
    ctx.aggregations = Aggregations {
        tags: vec![
            TagCount { tag: "biology".to_string(), count: 2 },
            TagCount { tag: "cells".to_string(), count: 1 },
        ],
        users: None,
    };
    ctx.groups_suggestions = vec![GroupSuggestion {
        name: "Readers".to_string(),
        pubid: "g1".to_string(),
    }];
    ctx.zero_message = "No annotations matched your search.".to_string();
    ctx
}

fn group_context() -> SearchPageContext {
    let mut ctx = search_context();
    ctx.request_path = "/groups/g1/search".to_string();
    ctx.opts.search_groupname = Some("Readers".to_string());
    ctx.group = Some(GroupInfo {
        created: "March, 2017".to_string(),
        description: Some("Weekly reading".to_string()),
        name: "Readers".to_string(),
        pubid: "g1".to_string(),
        url: "http://example.com/groups/g1/readers".to_string(),
        members: vec![
            MemberInfo {
                username: "amy".to_string(),
                userid: "acct:amy@example.com".to_string(),
                count: 1,
                faceted_by: false,
            },
            MemberInfo {
                username: "jim".to_string(),
                userid: "acct:jim@example.com".to_string(),
                count: 2,
                faceted_by: true,
            },
        ],
    });
    ctx.group_edit_url = Some("http://example.com/groups/g1/edit".to_string());
    ctx
}

fn user_context() -> SearchPageContext {
    let mut ctx = search_context();
    ctx.request_path = "/users/jim/search".to_string();
    ctx.opts.search_username = Some("Jim Smith".to_string());
    ctx.user = Some(UserInfo {
        name: "Jim Smith".to_string(),
        num_annotations: 3,
        description: None,
        registered_date: "November, 2016".to_string(),
        location: Some("Edinburgh".to_string()),
        uri: Some("https://jim.example.org/about".to_string()),
        domain: Some("jim.example.org".to_string()),
        orcid: Some("0000-0002-1825-0097".to_string()),
        edit_url: None,
    });
    ctx
}

fn render(ctx: &SearchPageContext) -> String {
    render_search_page(ctx).into_string()
}

#[test]
fn test_rendering_is_deterministic() {
    for ctx in [search_context(), group_context(), user_context()] {
        assert_eq!(render(&ctx), render(&ctx));
    }
}

#[test]
fn test_every_post_form_targets_request_path() {
    for ctx in [group_context(), user_context()] {
        let html = render(&ctx);
        let posts = html.matches(r#"method="POST""#).count();
        let to_self = html
            .matches(&format!(r#"method="POST" action="{}""#, ctx.request_path))
            .count();
        assert!(posts > 0);
        assert_eq!(posts, to_self);
        // Each of them carries the query along
        assert_eq!(
            html.matches(r#"<input type="hidden" name="q" value="tag:biology">"#).count(),
            posts
        );
    }
}

#[test]
fn test_search_form_uses_get() {
    let html = render(&search_context());
    assert!(html.contains(r#"method="GET" action="/search""#));
    assert!(html.contains(r#"name="q" value="tag:biology""#));
}

#[test]
fn test_results_are_grouped_by_timeframe_and_document() {
    let html = render(&search_context());
    assert!(html.contains("3 Matching Annotations"));
    assert!(html.contains("Last 7 days"));
    assert!(html.contains("Feb 2017"));
    assert!(html.contains("example.com/cells"));
    assert!(html.contains("Local file"));
    assert!(html.contains("Visit annotations in context"));
    assert!(html.contains("<p>First paragraph.</p><p>Second paragraph.</p>"));
    assert!(html.contains(r#"href="http://example.com/users/amy/search""#));
    assert!(html.contains(r#"href="http://example.com/search?q=tag%3Acells""#));
}

#[test]
fn test_zero_message_replaces_results() {
    let mut ctx = search_context();
    ctx.total = 0;
    ctx.timeframes.clear();
    let html = render(&ctx);
    assert!(html.contains("No annotations matched your search."));
    assert!(!html.contains("Matching Annotation"));
}

#[test]
fn test_paginator_only_with_several_pages() {
    let ctx = search_context();
    assert!(!render(&ctx).contains("paginator__list"));

    let mut ctx = search_context();
    let params: MultiDict = vec![("q".to_string(), "tag:biology".to_string())].into();
    ctx.page = paginate(&params, "/search", 600, 200);
    let html = render(&ctx);
    assert!(html.contains("paginator__list"));
    assert!(html.contains(r#"href="/search?q=tag%3Abiology&amp;page=2""#));

    // Hidden while the details panel is open
    ctx.more_info = true;
    assert!(!render(&ctx).contains("paginator__list"));
}

#[test]
fn test_no_sidebar_on_general_search() {
    let html = render(&search_context());
    assert!(!html.contains("search-result-sidebar"));
    assert!(!html.contains("search-result-nav"));
}

#[test]
fn test_group_sidebar() {
    let html = render(&group_context());
    assert!(html.contains("search-result-sidebar--group"));
    assert!(html.contains("Members (2)"));
    assert!(html.contains(r#"name="toggle_user_facet" value="acct:jim@example.com""#));
    assert!(html.contains("group-details__member-facet is-faceted"));
    assert!(html.contains(r#"name="group_leave" value="g1""#));
    assert!(html.contains(r#"value="http://example.com/groups/g1/readers" readonly"#));
    assert!(html.contains("Edit group"));
    assert!(html.contains("Group info"));
    assert!(html.contains("<title>Readers | Annotation activity</title>"));
}

#[test]
fn test_user_sidebar() {
    let html = render(&user_context());
    assert!(html.contains("search-result-sidebar--user"));
    assert!(html.contains("Edinburgh"));
    assert!(html.contains(">jim.example.org</a>"));
    assert!(html.contains("https://orcid.org/0000-0002-1825-0097"));
    assert!(html.contains("November, 2016"));
    assert!(html.contains("User info"));
    assert!(!html.contains("Edit profile"));
    assert!(!html.contains("toggle_user_facet"));
}

#[test]
fn test_tag_chooser_marks_faceted_tags() {
    let html = render(&user_context());
    assert!(html.contains("Top tags"));
    assert!(html.contains(r#"class="tag-chooser__tag is-faceted" type="submit" name="toggle_tag_facet" value="biology""#));
    assert!(html.contains(r#"class="tag-chooser__tag" type="submit" name="toggle_tag_facet" value="cells""#));
}

#[test]
fn test_more_info_swaps_results_for_back_button() {
    let mut ctx = group_context();
    ctx.more_info = true;
    let html = render(&ctx);
    assert!(html.contains(r#"name="back""#));
    assert!(!html.contains(r#"name="more_info""#));
    assert!(!html.contains("Matching Annotations"));
}

#[test]
fn test_lozenge_deletes_through_get_form() {
    let html = render(&group_context());
    assert!(html.contains("group:Readers"));
    assert!(html.contains(r#"name="delete_lozenge""#));
}

#[test]
fn test_script_blocks_carry_escaped_json() {
    let mut ctx = search_context();
    ctx.aggregations.tags.push(TagCount {
        tag: "</script>".to_string(),
        count: 1,
    });
    let html = render(&ctx);

    assert!(html.contains(r#"<script type="application/json" class="js-group-suggestions">[{"name":"Readers","pubid":"g1"}]</script>"#));
    assert!(html.contains(r#"{"tag":"\u003c/script\u003e","count":1}"#));
    assert_eq!(html.matches("</script>").count(), 3);
}

#[test]
fn test_user_content_is_escaped() {
    let mut ctx = search_context();
    let mut annotation = presented(9, "https://example.com/x", "eve", now(), &[]);
    annotation.text = "<img src=x onerror=alert(1)>".to_string();
    annotation.group = Some(GroupRef {
        pubid: "g2".to_string(),
        name: "<b>Group</b>".to_string(),
        url: "http://example.com/groups/g2/search".to_string(),
    });
    ctx.timeframes = bucketing::bucket(vec![annotation], now());
    ctx.total = 1;

    let html = render(&ctx);
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("in &lt;b&gt;Group&lt;/b&gt;"));
    assert!(html.contains("1 Matching Annotation<"));
}

#[test]
fn test_context_from_minimal_json() {
    let ctx: SearchPageContext = serde_json::from_str(
        r#"{"request_path": "/search", "zero_message": "Nothing here."}"#,
    )
    .unwrap();
    let html = render(&ctx);
    assert!(html.contains("Nothing here."));
    assert!(html.contains("<title>Search results | Annotation activity</title>"));
}
