use super::SearchPageContext;
use crate::links;
use crate::search::PresentedAnnotation;
use maud::{html, Markup};

pub fn annotation_card(ctx: &SearchPageContext, annotation: &PresentedAnnotation) -> Markup {
    let updated = annotation.updated.format("%-d %b %Y").to_string();
    let datetime = annotation.updated.to_rfc3339();

    html! {
        li.annotation-card {
            header.annotation-card__header {
                div.annotation-card__username-timestamp {
                    a.annotation-card__username href=(ctx.links.user_link(&annotation.userid)) {
                        (links::username_from_id(&annotation.userid))
                    }
                    @if let Some(group) = &annotation.group {
                        a.annotation-card__groupname href=(group.url) {
                            "in " (group.name)
                        }
                    }
                    @match &annotation.incontext_link {
                        Some(link) => {
                            a.annotation-card__timestamp href=(link) target="_blank" rel="nofollow noopener" {
                                time datetime=(datetime) { (updated) }
                            }
                        }
                        None => {
                            span.annotation-card__timestamp {
                                time datetime=(datetime) { (updated) }
                            }
                        }
                    }
                }
            }
            @if let Some(quote) = &annotation.quote {
                blockquote.annotation-card__quote { (quote) }
            }
            @if !annotation.text.is_empty() {
                section.annotation-card__text {
                    @for paragraph in annotation.text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                        p { (paragraph.trim()) }
                    }
                }
            }
            @if !annotation.tags.is_empty() {
                footer.annotation-card__footer {
                    ul.annotation-card__tags {
                        @for tag in &annotation.tags {
                            li {
                                a.annotation-card__tag href=(ctx.links.tag_link(tag)) { (tag) }
                            }
                        }
                    }
                }
            }
        }
    }
}
