pub mod app;
pub mod category_list;
pub mod category_modal;
pub mod debounce;
pub mod expense_list;
pub mod expense_modal;
pub mod form;
pub mod modal;
pub mod notification;
pub mod render;
