pub mod export;
pub mod filter;
pub mod query_builder;
pub mod repository;
pub mod service;
