use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::expense_modal::ExpenseModal;
use super::modal::Dismissal;
use crate::api::ExpenseApi;
use crate::models::{
    expense::{Expense, ExpenseCriteria},
    year_month::YearMonth,
};

pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Expenses sharing one calendar date.
#[derive(Debug, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub expenses: Vec<&'a Expense>,
}

impl DateGroup<'_> {
    pub fn total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Groups by date, newest date first. Within a day the incoming order is kept.
pub fn group_by_date<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<DateGroup<'a>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        grouped.entry(expense.date).or_default().push(expense);
    }
    grouped
        .into_iter()
        .rev()
        .map(|(date, expenses)| DateGroup { date, expenses })
        .collect()
}

#[derive(Debug)]
pub struct ExpenseListView {
    pub month: YearMonth,
    pub expenses: Vec<Expense>,
    pub is_loading: bool,
    pub selected: Option<usize>,
    page_size: u32,
}

impl ExpenseListView {
    pub fn new(month: YearMonth, page_size: u32) -> Self {
        Self {
            month,
            expenses: Vec::new(),
            is_loading: false,
            selected: None,
            page_size,
        }
    }

    pub fn criteria(&self) -> ExpenseCriteria {
        ExpenseCriteria {
            page: 0,
            size: self.page_size,
            sort: "date,desc".to_string(),
            year_month: Some(self.month),
            ..ExpenseCriteria::default()
        }
    }

    pub async fn load(&mut self, api: &dyn ExpenseApi) {
        self.is_loading = true;
        self.expenses = match api.find_all(&self.criteria()).await {
            Ok(page) => {
                if !page.last {
                    tracing::warn!(
                        total = page.total_elements,
                        shown = page.content.len(),
                        month = %self.month,
                        "month has more expenses than one page"
                    );
                }
                page.content
            }
            Err(e) => {
                tracing::error!(error = %e, month = %self.month, "error loading expenses");
                Vec::new()
            }
        };
        self.is_loading = false;
        self.clamp_selection();
    }

    /// Moves the selected month by `months` without reloading.
    pub fn add_months(&mut self, months: i32) {
        self.month = self.month.add_months(months);
        self.selected = None;
    }

    /// Moves the selected month and fetches its expenses.
    pub async fn navigate(&mut self, months: i32, api: &dyn ExpenseApi) {
        self.add_months(months);
        self.load(api).await;
    }

    pub fn month_label(&self) -> String {
        self.month.label()
    }

    pub fn expenses_in_month(&self) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| self.month.contains(e.date))
            .collect()
    }

    pub fn expenses_by_date(&self) -> Vec<DateGroup<'_>> {
        group_by_date(self.expenses_in_month())
    }

    pub fn month_total(&self) -> Decimal {
        self.expenses_in_month().iter().map(|e| e.amount).sum()
    }

    /// Expenses in display order, matching the flattened groups.
    pub fn visible_expenses(&self) -> Vec<&Expense> {
        self.expenses_by_date()
            .into_iter()
            .flat_map(|group| group.expenses)
            .collect()
    }

    pub fn next(&mut self) {
        let len = self.visible_expenses().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i + 1 < len => Some(i + 1),
            _ => Some(0),
        };
    }

    pub fn previous(&mut self) {
        let len = self.visible_expenses().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(0) | None => Some(len - 1),
            Some(i) => Some(i - 1),
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_expenses().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.selected
            .and_then(|i| self.visible_expenses().get(i).copied())
    }

    pub fn open_add_modal(&self) -> ExpenseModal {
        ExpenseModal::new(None)
    }

    pub fn open_edit_modal(&self) -> Option<ExpenseModal> {
        self.selected_expense()
            .cloned()
            .map(|expense| ExpenseModal::new(Some(expense)))
    }

    pub async fn on_modal_dismissed(&mut self, dismissal: Dismissal<Expense>, api: &dyn ExpenseApi) {
        if dismissal.refreshes_list() {
            self.load(api).await;
        }
    }
}
