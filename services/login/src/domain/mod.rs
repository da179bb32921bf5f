pub mod presentation;
pub mod repository;
pub mod types;
