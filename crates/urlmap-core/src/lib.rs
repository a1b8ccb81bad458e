pub mod config;
pub mod logging;

pub mod gate;
pub mod mapper;
pub mod meta_db;
pub mod pairs;
pub mod rewrite;
pub mod store;
pub mod url_model;
pub mod value;
