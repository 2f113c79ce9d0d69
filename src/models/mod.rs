pub mod category;
pub mod expense;
pub mod page;
pub mod year_month;
