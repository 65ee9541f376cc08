//! Catalog services - districts and restaurants

use shared::models::{District, Page, PageRequest, Restaurant};

use crate::error::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct DistrictService<H> {
    http: H,
}

impl<H: HttpClient> DistrictService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<District>> {
        self.http.get("/districts", &[]).await
    }
}

/// How the catalog is narrowed down
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    District(String),
    Search { name: String, address: String },
}

#[derive(Debug, Clone)]
pub struct RestaurantService<H> {
    http: H,
}

impl<H: HttpClient> RestaurantService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// All restaurants, paged
    pub async fn page(&self, page: PageRequest) -> ClientResult<Page<Restaurant>> {
        self.http
            .get("/restaurants/page", &[
                ("page", page.page.to_string()),
                ("size", page.size.to_string()),
            ])
            .await
    }

    /// Restaurants in one district, paged
    pub async fn by_district(
        &self,
        district_name: &str,
        page: PageRequest,
    ) -> ClientResult<Page<Restaurant>> {
        self.http
            .get("/restaurants/page/district", &[
                ("districtName", district_name.to_string()),
                ("page", page.page.to_string()),
                ("size", page.size.to_string()),
            ])
            .await
    }

    /// Restaurants matching a name and address, paged
    pub async fn search(
        &self,
        name: &str,
        address: &str,
        page: PageRequest,
    ) -> ClientResult<Page<Restaurant>> {
        self.http
            .get("/restaurants/page/search", &[
                ("name", name.to_string()),
                ("address", address.to_string()),
                ("page", page.page.to_string()),
                ("size", page.size.to_string()),
            ])
            .await
    }

    /// Dispatch on `filter`
    pub async fn browse(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> ClientResult<Page<Restaurant>> {
        match filter {
            CatalogFilter::All => self.page(page).await,
            CatalogFilter::District(name) => self.by_district(name, page).await,
            CatalogFilter::Search { name, address } => self.search(name, address, page).await,
        }
    }

    pub async fn get(&self, id: i64) -> ClientResult<Restaurant> {
        self.http.get(&format!("/restaurants/{id}"), &[]).await
    }
}
