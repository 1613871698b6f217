use serde::{Deserialize, Serialize};

/// Spring-style page wrapper the backend uses for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: i64,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size: 0,
            number: 0,
            first: true,
            last: true,
            number_of_elements: 0,
            empty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_fields_deserialize() {
        let page: Page<i64> = serde_json::from_value(serde_json::json!({
            "content": [1, 2, 3],
            "totalElements": 3,
            "totalPages": 1,
            "size": 10,
            "number": 0,
            "first": true,
            "last": true,
            "numberOfElements": 3,
            "empty": false
        }))
        .unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 3);
        assert!(!page.empty);
    }

    #[test]
    fn missing_counters_fall_back_to_defaults() {
        let page: Page<i64> =
            serde_json::from_value(serde_json::json!({ "content": [] })).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
    }
}
