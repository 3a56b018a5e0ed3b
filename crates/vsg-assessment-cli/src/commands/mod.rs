pub mod catalog;
pub mod config;
pub mod fill;
pub mod run;
