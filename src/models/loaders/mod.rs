pub mod catalog;
pub mod toml_loader;

pub use catalog::{candidates_for_grade, load_catalog};
pub use toml_loader::{load_weekly_dataset, load_timetable, load_records, load_settings};
