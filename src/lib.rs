pub mod api;
pub mod availability;
pub mod booking;
pub mod config;
pub mod db;
pub mod models;
