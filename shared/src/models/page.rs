//! Paged list Model
//!
//! The backend returns Spring-style pages. Only the fields the client
//! reads are modelled; `sort` and `pageable` are ignored on input.

use serde::{Deserialize, Serialize};

/// Default page size used by the catalog
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a server-side list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Requested page size
    pub size: u32,
    /// Zero-based page index
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    /// Index of the next page, if there is one
    pub fn next_page(&self) -> Option<u32> {
        (self.number + 1 < self.total_pages).then_some(self.number + 1)
    }

    /// Index of the previous page, if there is one
    pub fn previous_page(&self) -> Option<u32> {
        self.number.checked_sub(1)
    }
}

/// Page/size pair sent as query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_spring_json() {
        let json = r#"{
            "content": [1, 2, 3],
            "totalElements": 23,
            "totalPages": 3,
            "size": 10,
            "number": 1,
            "sort": {"empty": true, "sorted": false, "unsorted": true},
            "first": false,
            "last": false,
            "numberOfElements": 3,
            "pageable": {"pageNumber": 1, "pageSize": 10, "offset": 10, "paged": true, "unpaged": false},
            "empty": false
        }"#;
        let page: Page<u8> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.next_page(), Some(2));
        assert_eq!(page.previous_page(), Some(0));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<u8> = Page {
            content: vec![],
            total_elements: 0,
            total_pages: 0,
            size: 10,
            number: 0,
            first: true,
            last: true,
            number_of_elements: 0,
            empty: true,
        };
        assert_eq!(page.next_page(), None);
        assert_eq!(page.previous_page(), None);
    }
}
