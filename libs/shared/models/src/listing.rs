use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Directory endpoints answer either a bare array or a paginated object
/// depending on the query. Both land in one explicit enum so callers match
/// on the variant instead of probing the shape of loose JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paginated { data: Vec<T>, pagination: Pagination },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Paginated { data, .. } => data,
            Listing::Plain(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paginated { data, .. } => data,
            Listing::Plain(items) => items,
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            Listing::Paginated { pagination, .. } => Some(pagination),
            Listing::Plain(_) => None,
        }
    }
}
