use tracing::debug;

use shared_api::ApiClient;
use shared_models::Listing;

use crate::error::DirectoryError;
use crate::models::{Doctor, Specialty};

/// Read side of the medical directory: the specialties and doctors a
/// booking or a new slot gets attached to.
pub struct DirectoryService {
    api: ApiClient,
}

impl DirectoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Either a bare array or a paginated object depending on how the
    /// backend answers; the listing keeps that visible to the caller.
    pub async fn list_specialties(
        &self,
        search: Option<&str>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Listing<Specialty>, DirectoryError> {
        debug!(?search, ?page, "listing specialties");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        Ok(self.api.get("/specialties", &query).await?)
    }

    pub async fn list_doctors(
        &self,
        specialty_id: Option<i64>,
        search: Option<&str>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Listing<Doctor>, DirectoryError> {
        debug!(?specialty_id, ?search, ?page, "listing doctors");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(specialty_id) = specialty_id {
            query.push(("specialtyId", specialty_id.to_string()));
        }
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        Ok(self.api.get("/doctors", &query).await?)
    }

    pub async fn get_specialty(&self, id: i64) -> Result<Specialty, DirectoryError> {
        Ok(self.api.get(&format!("/specialties/{}", id), &[]).await?)
    }

    pub async fn get_doctor(&self, id: i64) -> Result<Doctor, DirectoryError> {
        Ok(self.api.get(&format!("/doctors/{}", id), &[]).await?)
    }
}
