use super::SearchPageContext;
use crate::paginator::PageNumber;
use maud::{html, Markup};

/// Page links, rendered only when there is more than one page
pub fn paginator(ctx: &SearchPageContext) -> Markup {
    let page = &ctx.page;

    html! {
        @if ctx.show_paginator() {
            nav.paginator aria-label="Pagination" {
                ul.paginator__list {
                    li.paginator__item.paginator__item--prev {
                        @if let Some(prev) = page.prev {
                            a.paginator__link href=(page.url_for(prev)) rel="prev" { "‹ Prev" }
                        }
                    }
                    @for number in &page.numbers {
                        @match number {
                            PageNumber::Gap => {
                                li.paginator__item.paginator__item--gap { "…" }
                            }
                            PageNumber::Page(n) => {
                                @if *n == page.cur {
                                    li class="paginator__item paginator__item--current" { (n) }
                                } @else {
                                    li.paginator__item {
                                        a.paginator__link href=(page.url_for(*n)) { (n) }
                                    }
                                }
                            }
                        }
                    }
                    li.paginator__item.paginator__item--next {
                        @if let Some(next) = page.next {
                            a.paginator__link href=(page.url_for(next)) rel="next" { "Next ›" }
                        }
                    }
                }
            }
        }
    }
}
