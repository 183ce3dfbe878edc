pub mod config;
pub mod error;
pub mod model;
pub mod present;
pub mod storage;
pub mod store;
