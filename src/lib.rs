pub mod catalog_page;
pub mod cli;
pub mod course;
pub mod course_csv;
pub mod course_list;
pub mod database;
pub mod error;
pub mod schedule;
pub mod scrape_source;
pub mod table_source;
