pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filtering;
pub mod models;
pub mod scoring;
pub mod services;
