use chrono::{DateTime, NaiveDate, Utc};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::year_month::YearMonth;
use crate::utils::format::format_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Request body for creating or updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpsertDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Paged lookup of expenses, sent to `GET /api/expenses`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseCriteria {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub name: Option<String>,
    pub year_month: Option<YearMonth>,
    pub category_ids: Vec<String>,
}

impl Default for ExpenseCriteria {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: "date,desc".to_string(),
            name: None,
            year_month: None,
            category_ids: Vec::new(),
        }
    }
}

impl ExpenseCriteria {
    /// Query pairs in request order; each category id becomes its own `categoryIds` pair.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
        ];
        for id in &self.category_ids {
            params.push(("categoryIds", id.clone()));
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            params.push(("name", name.to_string()));
        }
        if let Some(year_month) = self.year_month {
            params.push(("yearMonth", year_month.to_string()));
        }
        params
    }
}

impl Expense {
    pub fn to_list_item(&self) -> ListItem {
        let (category_name, category_color) = match &self.category {
            Some(category) => (category.name.as_str(), category.display_color()),
            None => ("No category", Color::DarkGray),
        };

        ListItem::new(Line::from(vec![
            Span::raw("   "),
            Span::styled("■ ", Style::default().fg(category_color)),
            Span::raw(format!("{:<30} ", self.name)),
            Span::styled(format!("{:<20} ", category_name), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>18}", format_amount(self.amount)),
                Style::default().fg(Color::Yellow),
            ),
        ]))
    }
}
