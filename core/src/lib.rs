pub mod db;
pub mod error;
pub mod filter;
pub mod models;
pub mod seed;
pub mod service;
