//! Pagination utilities for service layer
//!
//! Query values arrive as raw strings. They are parsed leniently: a leading
//! integer is taken, anything unparseable (or zero) falls back to the default.
//! Negative values are not rejected and go through the slice arithmetic.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Raw `page` / `pageSize` values as received on the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut q = Self::default();
        for (key, value) in pairs {
            match key {
                "page" if q.page.is_none() => q.page = Some(value.to_string()),
                "pageSize" if q.page_size.is_none() => q.page_size = Some(value.to_string()),
                _ => {}
            }
        }
        q
    }

    pub fn resolve(&self) -> Pagination {
        Pagination {
            page: lenient_or(self.page.as_deref(), DEFAULT_PAGE),
            page_size: lenient_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        }
    }
}

fn lenient_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_int_prefix).filter(|v| *v != 0).unwrap_or(default)
}

/// Parse the leading integer of `raw`: optional whitespace, optional sign,
/// then digits, where a `0x`/`0X` prefix switches to hexadecimal.
/// `"12abc"` gives 12, `"0x10"` gives 16, `"abc"` gives `None`. Values that
/// do not fit in an `i64` give `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        any = true;
        value = value.checked_mul(i64::from(radix))?;
        let d = i64::from(d);
        value = if negative { value.checked_sub(d)? } else { value.checked_add(d)? };
    }
    any.then_some(value)
}

/// Resolved pagination parameters (1-based page).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE } }
}

/// One page of results plus navigation metadata.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// number of items in `results`, not the total
    pub count: usize,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<T>,
}

impl Pagination {
    pub fn start_index(self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn end_index(self) -> i64 {
        self.start_index().saturating_add(self.page_size)
    }

    /// `ceil(total / page_size)`; zero for an empty collection.
    pub fn total_pages(self, total: usize) -> i64 {
        let pages = (total as f64 / self.page_size as f64).ceil();
        // -0.0 and 0.0 both land on 0
        pages as i64
    }

    pub fn paginate<T: Clone>(self, items: &[T]) -> Page<T> {
        let range = slice_bounds(items.len(), self.start_index(), self.end_index());
        let results = items[range].to_vec();
        let total_pages = self.total_pages(items.len());
        Page {
            count: results.len(),
            page: self.page,
            page_size: self.page_size,
            total_pages,
            next: (self.page < total_pages).then(|| self.page + 1),
            previous: (self.page > 1).then(|| self.page - 1),
            results,
        }
    }
}

/// Resolve `[start, end)` against a list of `len` items. Negative bounds
/// count back from the end; everything is clamped to `0..=len` and an
/// inverted range is empty.
fn slice_bounds(len: usize, start: i64, end: i64) -> std::ops::Range<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let clamp = |idx: i64| -> usize {
        let rel = if idx < 0 { len_i.saturating_add(idx).max(0) } else { idx.min(len_i) };
        rel as usize
    };
    let (from, to) = (clamp(start), clamp(end));
    from..to.max(from)
}
