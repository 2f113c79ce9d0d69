use async_trait::async_trait;

use super::{ApiClient, ApiError, CategoryApi};
use crate::models::{
    category::{AllCategoriesCriteria, Category, CategoryCriteria, CategoryUpsertDto},
    page::Page,
};

const CATEGORIES_PATH: &str = "/api/categories";

#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryApi for CategoryService {
    async fn find_all(&self, criteria: &CategoryCriteria) -> Result<Page<Category>, ApiError> {
        self.client.get(CATEGORIES_PATH, &criteria.to_query()).await
    }

    async fn find_all_without_paging(
        &self,
        criteria: &AllCategoriesCriteria,
    ) -> Result<Vec<Category>, ApiError> {
        let path = format!("{CATEGORIES_PATH}/all");
        self.client.get(&path, &criteria.to_query()).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Category, ApiError> {
        self.client.get(&format!("{CATEGORIES_PATH}/{id}"), &[]).await
    }

    async fn create(&self, dto: &CategoryUpsertDto) -> Result<Category, ApiError> {
        tracing::info!(name = %dto.name, "creating category");
        self.client.post(CATEGORIES_PATH, dto).await
    }

    async fn update(&self, id: &str, dto: &CategoryUpsertDto) -> Result<Category, ApiError> {
        tracing::info!(id = %id, name = %dto.name, "updating category");
        self.client.put(&format!("{CATEGORIES_PATH}/{id}"), dto).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!(id = %id, "deleting category");
        self.client.delete(&format!("{CATEGORIES_PATH}/{id}")).await
    }
}
