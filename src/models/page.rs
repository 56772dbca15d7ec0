use serde::{Deserialize, Serialize};

/// Spring Data page envelope returned by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// Zero-based index of this page
    pub number: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}

/// Query parameters for paged endpoints
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Option<String>,
}

/// Default page size the clients request
const DEFAULT_PAGE_SIZE: i64 = 20;

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn first() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }

    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Render as reqwest query pairs
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];
        if let Some(ref sort) = self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parses_spring_envelope() {
        let json = r#"{
            "content": [1, 2, 3],
            "totalElements": 7,
            "totalPages": 3,
            "number": 0,
            "size": 3
        }"#;
        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert!(!page.is_last());
    }

    #[test]
    fn test_page_request_query_includes_sort_when_set() {
        let req = PageRequest::first().sorted_by("name,asc");
        let query = req.to_query();
        assert_eq!(query.len(), 3);
        assert_eq!(query[2], ("sort", "name,asc".to_string()));
    }
}
