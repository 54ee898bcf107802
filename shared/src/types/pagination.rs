//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;
const DEFAULT_SORT: &str = "created_at";

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Pagination, sorting and free-text search parameters
///
/// Deserialized from the query string; every field falls back to the list
/// defaults (`page=1, limit=10, sort=created_at, order=desc`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default = "default_sort")]
    pub sort: String,

    #[serde(default)]
    pub order: SortOrder,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: default_sort(),
            order: SortOrder::default(),
            search: None,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
        .normalized()
    }

    /// Clamp page/limit into range and drop blank search terms
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_LIMIT);
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Resolve the sort column against a whitelist; unknown columns sort by `created_at`
    pub fn sort_column<'a>(&self, allowed: &[&'a str]) -> &'a str {
        allowed
            .iter()
            .find(|c| **c == self.sort)
            .copied()
            .unwrap_or(DEFAULT_SORT)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Lower-cased search term, if any
    pub fn search_term(&self) -> Option<String> {
        self.search.as_ref().map(|s| s.to_lowercase())
    }
}

/// Pagination metadata returned alongside list data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PageMeta {
    pub fn new(query: &PageQuery, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(u64::from(query.limit)) as u32
        };
        Self {
            page: query.page,
            limit: query.limit,
            total,
            total_pages,
        }
    }
}

/// One page of items plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Slice an in-memory, already filtered and sorted list
    pub fn from_vec(all: Vec<T>, query: &PageQuery) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();
        Self { items, total }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_sort() -> String {
    String::from(DEFAULT_SORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, "created_at");
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_normalized_clamps_values() {
        let query = PageQuery {
            page: 0,
            limit: 1000,
            search: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 100);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_sort_column_whitelist() {
        let query = PageQuery {
            sort: "quantity; DROP TABLE users".to_string(),
            ..Default::default()
        };
        assert_eq!(query.sort_column(&["created_at", "quantity"]), "created_at");

        let query = PageQuery {
            sort: "quantity".to_string(),
            ..Default::default()
        };
        assert_eq!(query.sort_column(&["created_at", "quantity"]), "quantity");
    }

    #[test]
    fn test_page_meta() {
        let query = PageQuery::new(2, 10);
        let meta = PageMeta::new(&query, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(query.offset(), 10);
        assert_eq!(PageMeta::new(&query, 0).total_pages, 0);
    }

    #[test]
    fn test_from_vec_slices_page() {
        let query = PageQuery::new(2, 2);
        let page = Paginated::from_vec(vec![1, 2, 3, 4, 5], &query);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total, 5);
    }
}
