pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod membership;
pub mod provision;
pub mod ranking;
pub mod registry;
pub mod score_update;
