pub mod join;
pub mod truncate;
