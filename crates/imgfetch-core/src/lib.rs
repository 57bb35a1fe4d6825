pub mod config;
pub mod logging;

pub mod fetcher;
pub mod http;
pub mod input;
pub mod report;
pub mod run;
pub mod url_model;
