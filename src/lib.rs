pub mod auth;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod notification;
pub mod pagination;
pub mod payment;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for catalog, coupon and order administration endpoints.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
