//! List envelopes, pagination metadata and list query parameters

use serde::{Deserialize, Serialize, Serializer};

/// Default page number (1-indexed)
pub fn default_page() -> u32 {
    1
}

/// Default page size when none is configured
pub fn default_limit() -> u32 {
    10
}

/// Server-supplied pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl Pagination {
    /// Metadata for an unpaginated list: everything on one page
    pub fn single(len: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: if len == 0 { 0 } else { 1 },
            total_results: len as u64,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::single(0)
    }
}

/// A page of results with its pagination metadata
pub trait Paged {
    type Item;

    fn items(&self) -> &[Self::Item];

    fn pagination(&self) -> Pagination;
}

/// Generic list body.
///
/// Older API revisions return a bare array; newer ones wrap the items
/// (under an entity-specific key) together with `pagination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ListWire<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> Paged for PagedList<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListWire<T> {
    Bare(Vec<T>),
    Enveloped {
        #[serde(alias = "posts", alias = "images", alias = "messages", alias = "pages")]
        items: Vec<T>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
}

impl<T> From<ListWire<T>> for PagedList<T> {
    fn from(wire: ListWire<T>) -> Self {
        match wire {
            ListWire::Bare(items) => {
                let pagination = Pagination::single(items.len());
                Self { items, pagination }
            }
            ListWire::Enveloped { items, pagination } => {
                let pagination = pagination.unwrap_or_else(|| Pagination::single(items.len()));
                Self { items, pagination }
            }
        }
    }
}

/// Query parameters accepted by every list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "join_tags")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(default_limit())
    }
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: default_page(),
            limit: limit.max(1),
            search: None,
            tags: Vec::new(),
            published: None,
            featured: None,
            country: None,
        }
    }

    /// Set the search text; blank text clears it
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_published(mut self, published: Option<bool>) -> Self {
        self.published = published;
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Set the country filter; `all` and blank clear it
    pub fn set_country(&mut self, country: impl Into<String>) {
        let country = country.into();
        let trimmed = country.trim();
        self.country = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}

fn join_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_is_single_page() {
        let list: PagedList<String> = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(list.items, vec!["a", "b"]);
        assert_eq!(list.pagination.current_page, 1);
        assert_eq!(list.pagination.total_pages, 1);
        assert_eq!(list.pagination.total_results, 2);
    }

    #[test]
    fn test_empty_bare_array_has_no_pages() {
        let list: PagedList<String> = serde_json::from_value(json!([])).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.pagination.total_pages, 0);
    }

    #[test]
    fn test_enveloped_items_and_aliases() {
        let body = json!({
            "items": [1, 2, 3],
            "pagination": {"current_page": 2, "total_pages": 5, "total_results": 13}
        });
        let list: PagedList<u32> = serde_json::from_value(body).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.pagination.current_page, 2);
        assert_eq!(list.pagination.total_pages, 5);

        let body = json!({
            "messages": [7],
            "pagination": {"current_page": 1, "total_pages": 1, "total_results": 1}
        });
        let list: PagedList<u32> = serde_json::from_value(body).unwrap();
        assert_eq!(list.items, vec![7]);

        let list: PagedList<u32> = serde_json::from_value(json!({"posts": [4, 5]})).unwrap();
        assert_eq!(list.pagination, Pagination::single(2));
    }

    #[test]
    fn test_query_serialization_omits_empty_values() {
        let query = ListQuery::new(20).with_search("   ");
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({"page": 1, "limit": 20}));
    }

    #[test]
    fn test_query_serialization_joins_tags() {
        let query = ListQuery::new(10)
            .with_search(" rust ")
            .with_tags(vec!["retro".to_string(), "web".to_string()])
            .with_published(Some(true))
            .with_page(3);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({"page": 3, "limit": 10, "search": "rust", "tags": "retro,web", "published": true})
        );
    }

    #[test]
    fn test_country_all_clears_filter() {
        let mut query = ListQuery::new(50);
        query.set_country("Germany");
        assert_eq!(query.country.as_deref(), Some("Germany"));
        query.set_country("all");
        assert!(query.country.is_none());
    }

    #[test]
    fn test_limit_and_page_floor_at_one() {
        let query = ListQuery::new(0).with_page(0);
        assert_eq!(query.limit, 1);
        assert_eq!(query.page, 1);
    }
}
