//! Data layer of a small blog: authors and posts, validated on every write.

pub mod db;
pub mod models;
pub mod services;
pub mod utils;
