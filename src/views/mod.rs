pub mod account_panel;
pub mod contract_info;
pub mod dashboard;
pub mod function_grid;
pub mod navbar;
pub mod transfer_form;

pub use dashboard::Dashboard;
