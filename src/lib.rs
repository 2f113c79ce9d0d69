pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, CategoryApi, CategoryService, ExpenseApi, ExpenseService};
pub use config::Config;
pub use models::{
    category::Category, expense::Expense, page::Page, year_month::YearMonth,
};
pub use ui::app::App;
