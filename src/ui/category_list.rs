use std::time::Instant;

use ratatui::widgets::ListState;

use super::category_modal::CategoryModal;
use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::modal::Dismissal;
use crate::api::CategoryApi;
use crate::models::category::{AllCategoriesCriteria, Category};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

#[derive(Debug)]
pub struct CategoryListView {
    pub categories: Vec<Category>,
    pub is_loading: bool,
    pub search_term: String,
    pub sort_order: SortOrder,
    pub list_state: ListState,
    search: Debouncer<String>,
}

impl Default for CategoryListView {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryListView {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            is_loading: false,
            search_term: String::new(),
            sort_order: SortOrder::Ascending,
            list_state: ListState::default(),
            search: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn criteria(&self) -> AllCategoriesCriteria {
        AllCategoriesCriteria {
            name: Some(self.search_term.clone()).filter(|t| !t.is_empty()),
            sort: Some(format!("name,{}", self.sort_order.as_query_value())),
        }
    }

    pub async fn load(&mut self, api: &dyn CategoryApi) {
        self.is_loading = true;
        self.categories = match api.find_all_without_paging(&self.criteria()).await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(error = %e, "error loading categories");
                Vec::new()
            }
        };
        self.is_loading = false;
        self.clamp_selection();
    }

    pub async fn toggle_sort(&mut self, api: &dyn CategoryApi) {
        self.sort_order = match self.sort_order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
        self.load(api).await;
    }

    pub fn sort_label(&self) -> &'static str {
        match self.sort_order {
            SortOrder::Ascending => "Name (A-Z)",
            SortOrder::Descending => "Name (Z-A)",
        }
    }

    /// Records a new search term; the reload happens once the debounce settles.
    pub fn on_search(&mut self, term: String, now: Instant) {
        self.search_term = term.clone();
        self.search.push(term, now);
    }

    pub fn search_due(&self, now: Instant) -> bool {
        self.search.is_due(now)
    }

    /// Reloads if a debounced search change is due. Returns whether it did.
    pub async fn poll_search(&mut self, api: &dyn CategoryApi, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => {
                tracing::debug!(term = %term, "search term settled");
                self.load(api).await;
                true
            }
            None => false,
        }
    }

    pub async fn on_search_clear(&mut self, api: &dyn CategoryApi) {
        self.search_term.clear();
        self.search.reset(String::new());
        self.load(api).await;
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        let mut term = self.search_term.clone();
        term.push(c);
        self.on_search(term, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        let mut term = self.search_term.clone();
        term.pop();
        self.on_search(term, now);
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.categories.len() => i + 1,
            _ => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(0) | None => self.categories.len().saturating_sub(1),
            Some(i) => i - 1,
        };
        self.select(i);
    }

    fn select(&mut self, i: usize) {
        if self.categories.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(i));
        }
    }

    fn clamp_selection(&mut self) {
        let selected = self.list_state.selected().unwrap_or(0);
        self.select(selected.min(self.categories.len().saturating_sub(1)));
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.list_state.selected().and_then(|i| self.categories.get(i))
    }

    pub fn open_add_modal(&self) -> CategoryModal {
        CategoryModal::new(None)
    }

    pub fn open_edit_modal(&self) -> Option<CategoryModal> {
        self.selected_category()
            .cloned()
            .map(|category| CategoryModal::new(Some(category)))
    }

    pub async fn on_modal_dismissed(&mut self, dismissal: Dismissal<Category>, api: &dyn CategoryApi) {
        if dismissal.refreshes_list() {
            self.load(api).await;
        }
    }
}
