pub mod add;
pub mod import;
pub mod list;
pub mod remove;
pub mod reset;
pub mod stats;
pub mod study;
