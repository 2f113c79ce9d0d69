//! In-memory stand-ins for the REST services, shared by the view tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;

use crate::api::{ApiError, CategoryApi, ExpenseApi};
use crate::models::{
    category::{AllCategoriesCriteria, Category, CategoryCriteria, CategoryUpsertDto},
    expense::{Expense, ExpenseCriteria, ExpenseUpsertDto},
    page::Page,
};

fn timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-11-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        created_at: timestamp(),
        last_modified_at: timestamp(),
        name: name.to_string(),
        color: "#50c8ff".to_string(),
    }
}

pub fn expense(id: &str, name: &str, amount: i64, date: &str) -> Expense {
    Expense {
        id: id.to_string(),
        created_at: timestamp(),
        last_modified_at: timestamp(),
        name: name.to_string(),
        amount: Decimal::new(amount, 0),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: None,
    }
}

fn failure(message: &Option<String>) -> Result<(), ApiError> {
    match message {
        Some(message) => Err(ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some(message.clone()),
        }),
        None => Ok(()),
    }
}

#[derive(Default)]
pub struct FakeCategoryApi {
    pub categories: Mutex<Vec<Category>>,
    pub fail_with: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
    pub last_query: Mutex<Option<AllCategoriesCriteria>>,
}

impl FakeCategoryApi {
    pub fn with(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            ..Self::default()
        }
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        failure(&self.fail_with.lock().unwrap())
    }
}

#[async_trait]
impl CategoryApi for FakeCategoryApi {
    async fn find_all(&self, criteria: &CategoryCriteria) -> Result<Page<Category>, ApiError> {
        self.record(format!("find_all page={}", criteria.page))?;
        let content = self.categories.lock().unwrap().clone();
        Ok(Page {
            total_elements: content.len() as u64,
            content,
            last: true,
            first: true,
            number: criteria.page,
            size: criteria.size,
            total_pages: 1,
        })
    }

    async fn find_all_without_paging(
        &self,
        criteria: &AllCategoriesCriteria,
    ) -> Result<Vec<Category>, ApiError> {
        self.record("find_all_without_paging".to_string())?;
        *self.last_query.lock().unwrap() = Some(criteria.clone());
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Category, ApiError> {
        self.record(format!("find_by_id {id}"))?;
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: None,
            })
    }

    async fn create(&self, dto: &CategoryUpsertDto) -> Result<Category, ApiError> {
        self.record(format!("create {}", dto.name))?;
        let mut categories = self.categories.lock().unwrap();
        let mut created = category(&format!("new-{}", categories.len() + 1), &dto.name);
        created.color = dto.color.clone();
        categories.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, dto: &CategoryUpsertDto) -> Result<Category, ApiError> {
        self.record(format!("update {id} {}", dto.name))?;
        let mut updated = category(id, &dto.name);
        updated.color = dto.color.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {id}"))?;
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeExpenseApi {
    pub expenses: Mutex<Vec<Expense>>,
    pub fail_with: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
    pub last_criteria: Mutex<Option<ExpenseCriteria>>,
    pub last_dto: Mutex<Option<ExpenseUpsertDto>>,
}

impl FakeExpenseApi {
    pub fn with(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: Mutex::new(expenses),
            ..Self::default()
        }
    }

    pub fn fail(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        failure(&self.fail_with.lock().unwrap())
    }

    fn stored(&self, id: &str, dto: &ExpenseUpsertDto) -> Expense {
        *self.last_dto.lock().unwrap() = Some(dto.clone());
        let mut stored = expense(id, &dto.name, 0, "2025-01-01");
        stored.amount = dto.amount;
        stored.date = dto.date;
        stored
    }
}

#[async_trait]
impl ExpenseApi for FakeExpenseApi {
    async fn find_all(&self, criteria: &ExpenseCriteria) -> Result<Page<Expense>, ApiError> {
        self.record("find_all".to_string())?;
        *self.last_criteria.lock().unwrap() = Some(criteria.clone());
        let content = self.expenses.lock().unwrap().clone();
        Ok(Page {
            total_elements: content.len() as u64,
            content,
            last: true,
            first: true,
            number: criteria.page,
            size: criteria.size,
            total_pages: 1,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Expense, ApiError> {
        self.record(format!("find_by_id {id}"))?;
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: None,
            })
    }

    async fn create(&self, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError> {
        self.record(format!("create {}", dto.name))?;
        Ok(self.stored("new", dto))
    }

    async fn update(&self, id: &str, dto: &ExpenseUpsertDto) -> Result<Expense, ApiError> {
        self.record(format!("update {id} {}", dto.name))?;
        Ok(self.stored(id, dto))
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {id}"))?;
        self.expenses.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}
