//! Database rows and configuration models.

pub mod activity;
pub mod article;
pub mod chat;
pub mod config;
pub mod customer;
pub mod deal;
pub mod drive_file;
pub mod email;
pub mod lead;
pub mod quiz_result;
pub mod task;
