use super::annotation_card::annotation_card;
use super::SearchPageContext;
use crate::links;
use crate::search::{DocumentBucket, Timeframe};
use maud::{html, Markup};

/// Result count and the timeframe list, or the zero message
pub fn results(ctx: &SearchPageContext) -> Markup {
    html! {
        div.search-results {
            @if ctx.total == 0 {
                div.search-results__total { (ctx.zero_message) }
            } @else {
                div.search-results__total {
                    (ctx.total) " Matching Annotation" @if ctx.total != 1 { "s" }
                }
                ol.search-results__list {
                    @for timeframe in &ctx.timeframes {
                        (timeframe_section(ctx, timeframe))
                    }
                }
            }
        }
    }
}

fn timeframe_section(ctx: &SearchPageContext, timeframe: &Timeframe) -> Markup {
    html! {
        li.search-result-timeframe {
            h1.search-result-timeframe__title { (timeframe.label) }
            ol.search-result-timeframe__buckets {
                @for bucket in &timeframe.document_buckets {
                    (document_bucket(ctx, bucket))
                }
            }
        }
    }
}

fn document_bucket(ctx: &SearchPageContext, bucket: &DocumentBucket) -> Markup {
    html! {
        li.search-result-bucket.js-search-bucket {
            div.search-result-bucket__header {
                div.search-result-bucket__domain { (bucket.domain) }
                div.search-result-bucket__title-and-annotations-count {
                    @match &bucket.uri {
                        Some(uri) => {
                            a.search-result-bucket__title href=(uri) title=(bucket.title) {
                                (bucket.title)
                            }
                        }
                        None => {
                            span.search-result-bucket__title title=(bucket.title) {
                                (bucket.title)
                            }
                        }
                    }
                    div.search-result-bucket__annotations-count {
                        div.search-result-bucket__annotations-count-container {
                            (bucket.annotations_count())
                        }
                    }
                }
            }
            div.search-result-bucket__content {
                ol.search-result-bucket__annotation-cards {
                    @for annotation in &bucket.presented_annotations {
                        (annotation_card(ctx, annotation))
                    }
                }
                (bucket_stats(ctx, bucket))
            }
        }
    }
}

fn bucket_stats(ctx: &SearchPageContext, bucket: &DocumentBucket) -> Markup {
    html! {
        div.search-bucket-stats {
            div.search-bucket-stats__key { "Annotators" }
            ul.search-bucket-stats__val {
                @for userid in &bucket.users {
                    li {
                        a.search-bucket-stats__username href=(ctx.links.user_link(userid)) {
                            (links::username_from_id(userid))
                        }
                    }
                }
            }
            @if let Some(uri) = &bucket.uri {
                div.search-bucket-stats__key { "URL" }
                div.search-bucket-stats__val {
                    a.search-bucket-stats__url href=(uri) target="_blank" rel="nofollow noopener" {
                        (links::pretty_link(uri))
                    }
                }
            }
            @if !bucket.tags.is_empty() {
                div.search-bucket-stats__key { "Tags" }
                ul.search-bucket-stats__val {
                    @for tag in &bucket.tags {
                        li {
                            a.search-bucket-stats__tag href=(ctx.links.tag_link(tag)) { (tag) }
                        }
                    }
                }
            }
            @if let Some(link) = bucket.incontext_link() {
                a.search-bucket-stats__incontext-link href=(link) target="_blank" rel="nofollow noopener" {
                    "Visit annotations in context"
                }
            }
        }
    }
}
