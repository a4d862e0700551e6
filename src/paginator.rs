//! Page arithmetic for result lists

use crate::multidict::MultiDict;
use serde::{Deserialize, Serialize};

/// One entry of the paginator's number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageNumber {
    Page(usize),
    Gap,
}

/// Pagination state of the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub cur: usize,
    pub max: usize,
    pub next: Option<usize>,
    pub prev: Option<usize>,
    pub numbers: Vec<PageNumber>,
    /// Path of the current request
    pub path: String,
    /// Params of the current request, reused by [`Page::url_for`]
    #[serde(default)]
    pub params: MultiDict,
}

impl Page {
    /// Current path with the current params and `page=n`
    pub fn url_for(&self, n: usize) -> String {
        let mut params = self.params.clone();
        params.set("page", n.to_string());
        format!("{}?{}", self.path, params.to_query_string())
    }
}

impl Default for Page {
    fn default() -> Self {
        paginate(&MultiDict::new(), "/search", 0, 1)
    }
}

/// Number of the last page; there is always at least one
pub fn last_page(total: u64, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1) as u64).max(1) as usize
}

/// Paginate `total` items into pages of `page_size`
pub fn paginate(params: &MultiDict, path: &str, total: u64, page_size: usize) -> Page {
    let max = last_page(total, page_size);

    let cur = params
        .get("page")
        .and_then(|page| page.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .clamp(1, max as i64) as usize;

    let next = (cur < max).then_some(cur + 1);
    let prev = (cur > 1).then(|| cur - 1);

    Page {
        cur,
        max,
        next,
        prev,
        numbers: page_numbers(cur, max),
        path: path.to_string(),
        params: params.clone(),
    }
}

/// First and last page, two pages either side of `cur`, and a gap wherever pages are skipped
fn page_numbers(cur: usize, max: usize) -> Vec<PageNumber> {
    let mut numbers = vec![PageNumber::Page(1)];

    if cur > 4 {
        numbers.push(PageNumber::Gap);
    }
    for page in cur.saturating_sub(2)..cur {
        if page > 1 {
            numbers.push(PageNumber::Page(page));
        }
    }
    if cur != 1 && cur != max {
        numbers.push(PageNumber::Page(cur));
    }
    for page in cur + 1..=cur + 2 {
        if page < max {
            numbers.push(PageNumber::Page(page));
        }
    }
    if cur + 3 < max {
        numbers.push(PageNumber::Gap);
    }
    if max > 1 {
        numbers.push(PageNumber::Page(max));
    }

    numbers
}
