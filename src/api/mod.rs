//! HTTP services for the categories and expenses endpoints.
//!
//! Views depend on the [`CategoryApi`] and [`ExpenseApi`] traits rather than the
//! concrete services so they can be driven by in-memory fakes in tests.

use async_trait::async_trait;

use crate::models::{
    category::{AllCategoriesCriteria, Category, CategoryCriteria, CategoryUpsertDto},
    expense::{Expense, ExpenseCriteria, ExpenseUpsertDto},
    page::Page,
};

pub mod category;
pub mod client;
pub mod error;
pub mod expense;

pub use category::CategoryService;
pub use client::ApiClient;
pub use error::ApiError;
pub use expense::ExpenseService;

#[async_trait]
pub trait CategoryApi: Send + Sync {
    async fn find_all(&self, criteria: &CategoryCriteria) -> Result<Page<Category>, ApiError>;

    async fn find_all_without_paging(
        &self,
        criteria: &AllCategoriesCriteria,
    ) -> Result<Vec<Category>, ApiError>;

    async fn find_by_id(&self, id: &str) -> Result<Category, ApiError>;

    async fn create(&self, dto: &CategoryUpsertDto) -> Result<Category, ApiError>;

    async fn update(&self, id: &str, dto: &CategoryUpsertDto) -> Result<Category, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ExpenseApi: Send + Sync {
    async fn find_all(&self, criteria: &ExpenseCriteria) -> Result<Page<Expense>, ApiError>;

    async fn find_by_id(&self, id: &str) -> Result<Expense, ApiError>;

    async fn create(&self, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError>;

    async fn update(&self, id: &str, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
