use crossterm::event::KeyCode;

use super::form::{self, FieldError, TextField};
use super::modal::{Dismissal, ModalAction};
use super::notification::Notifications;
use crate::api::CategoryApi;
use crate::models::category::{AVAILABLE_COLORS, Category, CategoryUpsertDto, DEFAULT_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Color,
}

/// Add/edit form for a single category.
#[derive(Debug)]
pub struct CategoryModal {
    pub category: Option<Category>,
    pub name: TextField,
    pub color: String,
    pub focus: CategoryField,
    pub is_loading: bool,
}

impl CategoryModal {
    /// `None` opens the form in add mode, `Some` pre-fills it for editing.
    pub fn new(category: Option<Category>) -> Self {
        let (name, color) = match &category {
            Some(category) => {
                let color = if category.color.is_empty() {
                    DEFAULT_COLOR.to_string()
                } else {
                    category.color.clone()
                };
                (category.name.clone(), color)
            }
            None => (String::new(), DEFAULT_COLOR.to_string()),
        };

        Self {
            category,
            name: TextField::new(name),
            color,
            focus: CategoryField::Name,
            is_loading: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.category.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit Category" } else { "Add Category" }
    }

    pub fn name_error(&self) -> Option<FieldError> {
        form::required(&self.name.value).err()
    }

    /// The name error, but only once the user has touched the field.
    pub fn visible_name_error(&self) -> Option<FieldError> {
        self.name_error().filter(|_| self.name.touched)
    }

    pub fn is_valid(&self) -> bool {
        self.name_error().is_none()
    }

    pub fn select_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    pub fn color_index(&self) -> Option<usize> {
        AVAILABLE_COLORS.iter().position(|c| *c == self.color)
    }

    pub fn cycle_color(&mut self, step: isize) {
        let len = AVAILABLE_COLORS.len() as isize;
        let current = self.color_index().map(|i| i as isize).unwrap_or(-step.signum());
        let next = (current + step).rem_euclid(len) as usize;
        self.select_color(AVAILABLE_COLORS[next]);
    }

    fn toggle_focus(&mut self) {
        if self.focus == CategoryField::Name {
            self.name.mark_touched();
        }
        self.focus = match self.focus {
            CategoryField::Name => CategoryField::Color,
            CategoryField::Color => CategoryField::Name,
        };
    }

    fn mark_all_touched(&mut self) {
        self.name.mark_touched();
    }

    pub fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        match key {
            KeyCode::Esc => return ModalAction::Cancel,
            KeyCode::Enter => return ModalAction::Save,
            KeyCode::Delete if self.is_edit() => return ModalAction::Delete,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => self.toggle_focus(),
            _ => match self.focus {
                CategoryField::Name => match key {
                    KeyCode::Char(c) => self.name.push(c),
                    KeyCode::Backspace => self.name.pop(),
                    _ => {}
                },
                CategoryField::Color => match key {
                    KeyCode::Left => self.cycle_color(-1),
                    KeyCode::Right => self.cycle_color(1),
                    _ => {}
                },
            },
        }
        ModalAction::None
    }

    pub fn to_dto(&self) -> CategoryUpsertDto {
        CategoryUpsertDto {
            id: self.category.as_ref().map(|c| c.id.clone()),
            name: self.name.trimmed().to_string(),
            color: self.color.clone(),
        }
    }

    pub fn cancel(&self) -> Option<Dismissal<Category>> {
        if self.is_loading {
            return None;
        }
        Some(Dismissal::cancel())
    }

    /// Creates or updates the category. Returns the dismissal when the modal should
    /// close; `None` keeps it open (invalid form, busy, or request failure).
    pub async fn save(
        &mut self,
        api: &dyn CategoryApi,
        notifications: &mut Notifications,
    ) -> Option<Dismissal<Category>> {
        if !self.is_valid() || self.is_loading {
            self.mark_all_touched();
            return None;
        }

        self.is_loading = true;
        let dto = self.to_dto();
        let result = match self.category.as_ref().map(|c| c.id.clone()) {
            Some(id) => api.update(&id, &dto).await,
            None => api.create(&dto).await,
        };
        self.is_loading = false;

        match result {
            Ok(saved) => {
                notifications.success(if self.is_edit() {
                    "Category updated successfully"
                } else {
                    "Category created successfully"
                });
                Some(Dismissal::save(saved))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save category");
                notifications.danger(format!("Error saving category: {}", e.user_message()));
                None
            }
        }
    }

    pub async fn delete(
        &mut self,
        api: &dyn CategoryApi,
        notifications: &mut Notifications,
    ) -> Option<Dismissal<Category>> {
        let id = self.category.as_ref().map(|c| c.id.clone())?;
        if self.is_loading {
            return None;
        }

        self.is_loading = true;
        let result = api.delete(&id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                notifications.success("Category deleted successfully");
                Some(Dismissal::delete())
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "failed to delete category");
                notifications.danger(format!("Error deleting category: {}", e.user_message()));
                None
            }
        }
    }
}
