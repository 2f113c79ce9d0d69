use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;

use super::category_list::CategoryListView;
use super::category_modal::CategoryModal;
use super::expense_list::ExpenseListView;
use super::expense_modal::ExpenseModal;
use super::modal::{Dismissal, ModalAction};
use super::notification::Notifications;
use crate::api::{CategoryApi, ExpenseApi};
use crate::models::{category::Category, expense::Expense, year_month::YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ExpenseList,
    CategoryList,
}

impl View {
    pub fn all() -> [View; 2] {
        [View::ExpenseList, View::CategoryList]
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::ExpenseList => "Expenses",
            View::CategoryList => "Categories",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum InputMode {
    Normal,
    Searching,
}

/// A request the UI is about to wait on. Drawn as an overlay before the await.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Loading,
    Saving,
    Deleting,
}

impl Busy {
    pub fn label(self) -> &'static str {
        match self {
            Busy::Loading => "Loading…",
            Busy::Saving => "Saving…",
            Busy::Deleting => "Deleting…",
        }
    }
}

#[derive(Debug)]
pub enum ActiveModal {
    Category(CategoryModal),
    Expense(ExpenseModal),
}

enum ModalOutcome {
    Open,
    CategoryClosed(Dismissal<Category>),
    ExpenseClosed(Dismissal<Expense>),
}

pub struct App {
    categories_api: Arc<dyn CategoryApi>,
    expenses_api: Arc<dyn ExpenseApi>,
    pub current_view: View,
    pub input_mode: InputMode,
    pub expense_list: ExpenseListView,
    pub category_list: CategoryListView,
    pub modal: Option<ActiveModal>,
    pub notifications: Notifications,
    pub busy: Option<Busy>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        categories_api: Arc<dyn CategoryApi>,
        expenses_api: Arc<dyn ExpenseApi>,
        month: YearMonth,
        page_size: u32,
    ) -> Self {
        Self {
            categories_api,
            expenses_api,
            current_view: View::ExpenseList,
            input_mode: InputMode::Normal,
            expense_list: ExpenseListView::new(month, page_size),
            category_list: CategoryListView::new(),
            modal: None,
            notifications: Notifications::new(),
            busy: None,
            should_quit: false,
        }
    }

    pub async fn init(&mut self) {
        self.expense_list.load(&*self.expenses_api).await;
        self.category_list.load(&*self.categories_api).await;
    }

    /// Marks the app busy if `tick(now)` is going to reload the category search.
    pub fn begin_tick(&mut self, now: Instant) -> Option<Busy> {
        self.busy = self
            .category_list
            .search_due(now)
            .then_some(Busy::Loading);
        self.busy
    }

    /// Timer-driven work: the debounced category search and toast expiry.
    pub async fn tick(&mut self, now: Instant) {
        let api = Arc::clone(&self.categories_api);
        self.category_list.poll_search(&*api, now).await;
        self.notifications.prune(now);
        self.busy = None;
    }

    /// Marks the app busy if `handle_key(key)` is going to wait on the server,
    /// so a frame can be drawn before the request starts.
    pub fn begin_key(&mut self, key: KeyCode) -> Option<Busy> {
        self.busy = self.request_for_key(key);
        self.busy
    }

    fn request_for_key(&self, key: KeyCode) -> Option<Busy> {
        match &self.modal {
            Some(ActiveModal::Category(modal)) => category_modal_request(modal, key),
            Some(ActiveModal::Expense(modal)) => match &modal.category_modal {
                Some(nested) => category_modal_request(nested, key),
                None if modal.is_loading => None,
                None => match key {
                    KeyCode::Enter if modal.is_valid() => Some(Busy::Saving),
                    KeyCode::Delete if modal.is_edit() => Some(Busy::Deleting),
                    _ => None,
                },
            },
            None => match self.input_mode {
                InputMode::Searching => (key == KeyCode::Esc).then_some(Busy::Loading),
                InputMode::Normal => self.normal_key_request(key),
            },
        }
    }

    fn normal_key_request(&self, key: KeyCode) -> Option<Busy> {
        let on_expenses = self.current_view == View::ExpenseList;
        let loads = match key {
            KeyCode::Tab | KeyCode::Char('r') => true,
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => on_expenses,
            KeyCode::Char('a') => on_expenses,
            KeyCode::Enter => on_expenses && self.expense_list.selected_expense().is_some(),
            KeyCode::Char('s') => !on_expenses,
            _ => false,
        };
        loads.then_some(Busy::Loading)
    }

    pub async fn handle_key(&mut self, key: KeyCode) {
        if self.modal.is_some() {
            self.handle_modal_key(key).await;
        } else {
            match self.input_mode {
                InputMode::Searching => self.handle_search_key(key).await,
                InputMode::Normal => self.handle_normal_key(key).await,
            }
        }
        self.busy = None;
    }

    async fn handle_normal_key(&mut self, key: KeyCode) {
        let categories_api = Arc::clone(&self.categories_api);
        let expenses_api = Arc::clone(&self.expenses_api);

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_view().await,
            KeyCode::Char('a') => match self.current_view {
                View::ExpenseList => {
                    let modal = self.expense_list.open_add_modal();
                    self.open_expense_modal(modal).await;
                }
                View::CategoryList => {
                    self.modal = Some(ActiveModal::Category(self.category_list.open_add_modal()));
                }
            },
            KeyCode::Enter => match self.current_view {
                View::ExpenseList => {
                    if let Some(modal) = self.expense_list.open_edit_modal() {
                        self.open_expense_modal(modal).await;
                    }
                }
                View::CategoryList => {
                    if let Some(modal) = self.category_list.open_edit_modal() {
                        self.modal = Some(ActiveModal::Category(modal));
                    }
                }
            },
            KeyCode::Up => match self.current_view {
                View::ExpenseList => self.expense_list.previous(),
                View::CategoryList => self.category_list.previous(),
            },
            KeyCode::Down => match self.current_view {
                View::ExpenseList => self.expense_list.next(),
                View::CategoryList => self.category_list.next(),
            },
            KeyCode::Left | KeyCode::Char('h') if self.current_view == View::ExpenseList => {
                self.expense_list.navigate(-1, &*expenses_api).await
            }
            KeyCode::Right | KeyCode::Char('l') if self.current_view == View::ExpenseList => {
                self.expense_list.navigate(1, &*expenses_api).await
            }
            KeyCode::Char('r') => match self.current_view {
                View::ExpenseList => self.expense_list.load(&*expenses_api).await,
                View::CategoryList => self.category_list.load(&*categories_api).await,
            },
            KeyCode::Char('s') if self.current_view == View::CategoryList => {
                self.category_list.toggle_sort(&*categories_api).await
            }
            KeyCode::Char('f') if self.current_view == View::CategoryList => {
                self.input_mode = InputMode::Searching;
            }
            _ => {}
        }
    }

    async fn handle_search_key(&mut self, key: KeyCode) {
        let now = Instant::now();
        match key {
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                let api = Arc::clone(&self.categories_api);
                self.category_list.on_search_clear(&*api).await;
            }
            KeyCode::Backspace => self.category_list.pop_search_char(now),
            KeyCode::Char(c) => self.category_list.push_search_char(c, now),
            _ => {}
        }
    }

    async fn switch_view(&mut self) {
        self.current_view = match self.current_view {
            View::ExpenseList => View::CategoryList,
            View::CategoryList => View::ExpenseList,
        };
        match self.current_view {
            View::ExpenseList => self.expense_list.load(&*self.expenses_api).await,
            View::CategoryList => self.category_list.load(&*self.categories_api).await,
        }
    }

    async fn open_expense_modal(&mut self, mut modal: ExpenseModal) {
        modal.load_categories(&*self.categories_api).await;
        self.modal = Some(ActiveModal::Expense(modal));
    }

    async fn handle_modal_key(&mut self, key: KeyCode) {
        let categories_api = Arc::clone(&self.categories_api);
        let expenses_api = Arc::clone(&self.expenses_api);
        let notifications = &mut self.notifications;

        let outcome = match self.modal.as_mut() {
            None => ModalOutcome::Open,
            Some(ActiveModal::Category(modal)) => {
                match run_category_action(modal, key, &*categories_api, notifications).await {
                    Some(dismissal) => ModalOutcome::CategoryClosed(dismissal),
                    None => ModalOutcome::Open,
                }
            }
            Some(ActiveModal::Expense(modal)) => {
                if let Some(nested) = modal.category_modal.as_mut() {
                    if let Some(dismissal) =
                        run_category_action(nested, key, &*categories_api, notifications).await
                    {
                        modal.on_category_modal_dismissed(dismissal);
                    }
                    ModalOutcome::Open
                } else {
                    let dismissal = match modal.handle_key(key) {
                        ModalAction::Save => modal.save(&*expenses_api, notifications).await,
                        ModalAction::Delete => modal.delete(&*expenses_api, notifications).await,
                        ModalAction::Cancel => modal.cancel(),
                        ModalAction::OpenCategoryModal => {
                            modal.open_category_modal();
                            None
                        }
                        ModalAction::None => None,
                    };
                    match dismissal {
                        Some(dismissal) => ModalOutcome::ExpenseClosed(dismissal),
                        None => ModalOutcome::Open,
                    }
                }
            }
        };

        match outcome {
            ModalOutcome::Open => {}
            ModalOutcome::CategoryClosed(dismissal) => {
                self.modal = None;
                self.category_list
                    .on_modal_dismissed(dismissal, &*categories_api)
                    .await;
            }
            ModalOutcome::ExpenseClosed(dismissal) => {
                self.modal = None;
                self.expense_list
                    .on_modal_dismissed(dismissal, &*expenses_api)
                    .await;
            }
        }
    }
}

fn category_modal_request(modal: &CategoryModal, key: KeyCode) -> Option<Busy> {
    if modal.is_loading {
        return None;
    }
    match key {
        KeyCode::Enter if modal.is_valid() => Some(Busy::Saving),
        KeyCode::Delete if modal.is_edit() => Some(Busy::Deleting),
        _ => None,
    }
}

async fn run_category_action(
    modal: &mut CategoryModal,
    key: KeyCode,
    api: &dyn CategoryApi,
    notifications: &mut Notifications,
) -> Option<Dismissal<Category>> {
    match modal.handle_key(key) {
        ModalAction::Save => modal.save(api, notifications).await,
        ModalAction::Delete => modal.delete(api, notifications).await,
        ModalAction::Cancel => modal.cancel(),
        ModalAction::OpenCategoryModal | ModalAction::None => None,
    }
}
