use async_trait::async_trait;

use super::{ApiClient, ApiError, ExpenseApi};
use crate::models::{
    expense::{Expense, ExpenseCriteria, ExpenseUpsertDto},
    page::Page,
};

const EXPENSES_PATH: &str = "/api/expenses";

#[derive(Debug, Clone)]
pub struct ExpenseService {
    client: ApiClient,
}

impl ExpenseService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExpenseApi for ExpenseService {
    async fn find_all(&self, criteria: &ExpenseCriteria) -> Result<Page<Expense>, ApiError> {
        self.client.get(EXPENSES_PATH, &criteria.to_query()).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Expense, ApiError> {
        self.client.get(&format!("{EXPENSES_PATH}/{id}"), &[]).await
    }

    async fn create(&self, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError> {
        tracing::info!(name = %dto.name, amount = %dto.amount, "creating expense");
        self.client.post(EXPENSES_PATH, dto).await
    }

    async fn update(&self, id: &str, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError> {
        tracing::info!(id = %id, name = %dto.name, "updating expense");
        self.client.put(&format!("{EXPENSES_PATH}/{id}"), dto).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!(id = %id, "deleting expense");
        self.client.delete(&format!("{EXPENSES_PATH}/{id}")).await
    }
}
