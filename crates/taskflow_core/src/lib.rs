pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
