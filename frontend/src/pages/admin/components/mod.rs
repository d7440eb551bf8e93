pub mod filters;
pub mod logs_table;
pub mod users_table;
