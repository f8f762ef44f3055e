//! Pagination envelope and request parameters.

use serde::{Deserialize, Serialize};

/// One page of a server-side paginated listing, as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// Sort direction for a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// Sort key, serialized as `field,direction` in query strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub dir: SortDir,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Desc,
        }
    }

    /// Query-string value, e.g. `name,asc`.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.field, self.dir.as_str())
    }
}

/// Request parameters for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Query parameters in the order the backend expects them.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.to_query_value()));
        }
        query
    }
}

impl Default for PageRequest {
    /// First page of ten, sorted by name ascending: the member-list default.
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: Some(Sort::asc("name")),
        }
    }
}
