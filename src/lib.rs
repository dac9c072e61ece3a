pub mod config;
pub mod db {
    pub mod models;
    pub mod repository;
}
pub mod error;
pub mod service;
