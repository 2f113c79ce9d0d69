use chrono::NaiveDate;
use crossterm::event::KeyCode;

use super::category_modal::CategoryModal;
use super::form::{self, FieldError, TextField};
use super::modal::{Dismissal, ModalAction, ModalRole};
use super::notification::Notifications;
use crate::api::{CategoryApi, ExpenseApi};
use crate::models::{
    category::{AllCategoriesCriteria, Category},
    expense::{Expense, ExpenseUpsertDto},
};
use crate::utils::format::format_long_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Name,
    Category,
    Amount,
    Date,
}

impl ExpenseField {
    const ORDER: [ExpenseField; 4] = [
        ExpenseField::Name,
        ExpenseField::Category,
        ExpenseField::Amount,
        ExpenseField::Date,
    ];

    fn step(self, step: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(index + step).rem_euclid(len) as usize]
    }
}

/// Add/edit form for a single expense, with an optional nested category form.
#[derive(Debug)]
pub struct ExpenseModal {
    pub expense: Option<Expense>,
    pub name: TextField,
    pub amount: TextField,
    pub date: TextField,
    pub category_id: Option<String>,
    pub selected_category: Option<Category>,
    pub categories: Vec<Category>,
    pub focus: ExpenseField,
    pub is_loading: bool,
    pub category_modal: Option<CategoryModal>,
    max_date: NaiveDate,
}

impl ExpenseModal {
    pub fn new(expense: Option<Expense>) -> Self {
        Self::with_today(expense, chrono::Local::now().date_naive())
    }

    pub fn with_today(expense: Option<Expense>, today: NaiveDate) -> Self {
        let mut modal = Self {
            expense: None,
            name: TextField::default(),
            amount: TextField::default(),
            date: TextField::new(today.format("%Y-%m-%d").to_string()),
            category_id: None,
            selected_category: None,
            categories: Vec::new(),
            focus: ExpenseField::Name,
            is_loading: false,
            category_modal: None,
            max_date: today,
        };

        if let Some(expense) = expense {
            modal.name = TextField::new(expense.name.clone());
            modal.amount = TextField::new(expense.amount.to_string());
            modal.date = TextField::new(expense.date.format("%Y-%m-%d").to_string());
            modal.category_id = expense.category.as_ref().map(|c| c.id.clone());
            modal.selected_category = expense.category.clone();
            modal.max_date = modal.max_date.max(expense.date);
            modal.expense = Some(expense);
        }

        modal
    }

    /// Fetches the category choices. A failure leaves the list empty.
    pub async fn load_categories(&mut self, api: &dyn CategoryApi) {
        self.categories = match api
            .find_all_without_paging(&AllCategoriesCriteria::default())
            .await
        {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(error = %e, "error loading categories");
                Vec::new()
            }
        };
    }

    pub fn is_edit(&self) -> bool {
        self.expense.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit Expense" } else { "Add Expense" }
    }

    /// Latest date the form accepts: today, or the stored date of an expense
    /// that is already later than that.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// The date field rendered as `dd. MMM. yyyy`, when it parses.
    pub fn formatted_date(&self) -> Option<String> {
        NaiveDate::parse_from_str(self.date.trimmed(), "%Y-%m-%d")
            .ok()
            .map(format_long_date)
    }

    pub fn name_error(&self) -> Option<FieldError> {
        form::required(&self.name.value).err()
    }

    pub fn amount_error(&self) -> Option<FieldError> {
        form::parse_amount(&self.amount.value).err()
    }

    pub fn date_error(&self) -> Option<FieldError> {
        form::parse_date(&self.date.value, self.max_date).err()
    }

    /// Errors for fields the user has touched.
    pub fn visible_error(&self, field: ExpenseField) -> Option<FieldError> {
        match field {
            ExpenseField::Name => self.name_error().filter(|_| self.name.touched),
            ExpenseField::Amount => self.amount_error().filter(|_| self.amount.touched),
            ExpenseField::Date => self.date_error().filter(|_| self.date.touched),
            ExpenseField::Category => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.to_dto().is_some()
    }

    fn mark_all_touched(&mut self) {
        self.name.mark_touched();
        self.amount.mark_touched();
        self.date.mark_touched();
    }

    pub fn select_category(&mut self, category: Category) {
        self.category_id = Some(category.id.clone());
        self.selected_category = Some(category);
    }

    pub fn clear_category(&mut self) {
        self.category_id = None;
        self.selected_category = None;
    }

    /// Keeps the selected category in sync with a chosen id; unknown ids clear it.
    pub fn on_category_change(&mut self, id: Option<&str>) {
        self.category_id = id.map(str::to_string);
        self.selected_category =
            id.and_then(|id| self.categories.iter().find(|c| c.id == id).cloned());
        if self.selected_category.is_none() {
            self.category_id = None;
        }
    }

    /// Steps through "no category" followed by each loaded category.
    pub fn cycle_category(&mut self, step: isize) {
        let len = self.categories.len() as isize + 1;
        let current = self
            .category_id
            .as_ref()
            .and_then(|id| self.categories.iter().position(|c| &c.id == id))
            .map(|i| i as isize + 1)
            .unwrap_or(0);
        let next = (current + step).rem_euclid(len) as usize;
        let id = match next {
            0 => None,
            i => Some(self.categories[i - 1].id.clone()),
        };
        self.on_category_change(id.as_deref());
    }

    pub fn open_category_modal(&mut self) {
        self.category_modal = Some(CategoryModal::new(None));
    }

    /// Closes the nested category form; a newly saved category is added and selected.
    pub fn on_category_modal_dismissed(&mut self, dismissal: Dismissal<Category>) {
        self.category_modal = None;
        if dismissal.role == ModalRole::Save {
            if let Some(category) = dismissal.data {
                self.categories.push(category.clone());
                self.select_category(category);
            }
        }
    }

    fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focus {
            ExpenseField::Name => Some(&mut self.name),
            ExpenseField::Amount => Some(&mut self.amount),
            ExpenseField::Date => Some(&mut self.date),
            ExpenseField::Category => None,
        }
    }

    fn move_focus(&mut self, step: isize) {
        if let Some(field) = self.focused_text() {
            field.mark_touched();
        }
        self.focus = self.focus.step(step);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        match key {
            KeyCode::Esc => return ModalAction::Cancel,
            KeyCode::Enter => return ModalAction::Save,
            KeyCode::Delete if self.is_edit() => return ModalAction::Delete,
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
            _ if self.focus == ExpenseField::Category => match key {
                KeyCode::Left => self.cycle_category(-1),
                KeyCode::Right => self.cycle_category(1),
                KeyCode::Backspace => self.clear_category(),
                KeyCode::Char('+') => return ModalAction::OpenCategoryModal,
                _ => {}
            },
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_text() {
                    field.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_text() {
                    field.pop();
                }
            }
            _ => {}
        }
        ModalAction::None
    }

    /// The request body, or `None` while the form is invalid.
    pub fn to_dto(&self) -> Option<ExpenseUpsertDto> {
        let name = form::required(&self.name.value).ok()?;
        let amount = form::parse_amount(&self.amount.value).ok()?;
        let date = form::parse_date(&self.date.value, self.max_date).ok()?;
        Some(ExpenseUpsertDto {
            id: self.expense.as_ref().map(|e| e.id.clone()),
            name: name.to_string(),
            amount,
            date,
            category_id: self.category_id.clone(),
        })
    }

    pub fn cancel(&self) -> Option<Dismissal<Expense>> {
        if self.is_loading {
            return None;
        }
        Some(Dismissal::cancel())
    }

    pub async fn save(
        &mut self,
        api: &dyn ExpenseApi,
        notifications: &mut Notifications,
    ) -> Option<Dismissal<Expense>> {
        let dto = match self.to_dto() {
            Some(dto) if !self.is_loading => dto,
            _ => {
                self.mark_all_touched();
                return None;
            }
        };

        self.is_loading = true;
        let result = match self.expense.as_ref().map(|e| e.id.clone()) {
            Some(id) => api.update(&id, &dto).await,
            None => api.create(&dto).await,
        };
        self.is_loading = false;

        match result {
            Ok(saved) => {
                notifications.success("Expense saved successfully");
                Some(Dismissal::save(saved))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save expense");
                notifications.danger(format!("Error saving expense: {}", e.user_message()));
                None
            }
        }
    }

    pub async fn delete(
        &mut self,
        api: &dyn ExpenseApi,
        notifications: &mut Notifications,
    ) -> Option<Dismissal<Expense>> {
        let id = self.expense.as_ref().map(|e| e.id.clone())?;
        if self.is_loading {
            return None;
        }

        self.is_loading = true;
        let result = api.delete(&id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                notifications.success("Expense deleted successfully");
                Some(Dismissal::delete())
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "failed to delete expense");
                notifications.danger(format!("Error deleting expense: {}", e.user_message()));
                None
            }
        }
    }
}
