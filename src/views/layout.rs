use super::SearchPageContext;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

/// Base page layout
pub fn base(title: &str, content: Markup, scripts: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/assets/styles/site.css";
            }
            body {
                (content)
                (scripts)
                script src="/assets/scripts/site.js" defer {}
            }
        }
    }
}

/// Suggestion data for the search bar's client-side autocomplete
pub fn scripts(ctx: &SearchPageContext) -> Markup {
    html! {
        script type="application/json" class="js-tag-suggestions" {
            (PreEscaped(tojson(&ctx.aggregations.tags)))
        }
        script type="application/json" class="js-group-suggestions" {
            (PreEscaped(tojson(&ctx.groups_suggestions)))
        }
    }
}

/// JSON safe to embed inside an HTML `<script>` element
pub fn tojson<T: Serialize + ?Sized>(value: &T) -> String {
    // Only non-string map keys fail to encode, and no page data has those
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());

    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\'' => escaped.push_str("\\u0027"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tojson_escapes_script_breakers() {
        let value = vec!["</script><b>&'"];
        assert_eq!(
            tojson(&value),
            r#"["\u003c/script\u003e\u003cb\u003e\u0026\u0027"]"#
        );
    }

    #[test]
    fn test_tojson_plain_values_unchanged() {
        assert_eq!(tojson(&vec![1, 2]), "[1,2]");
    }

    #[test]
    fn test_tojson_unencodable_is_null() {
        let value = std::collections::BTreeMap::from([((1, 2), 3)]);
        assert_eq!(tojson(&value), "null");
    }
}
