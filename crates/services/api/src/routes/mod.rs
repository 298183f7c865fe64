pub mod announcements;
pub mod auth;
pub mod chat;
pub mod comments;
pub mod favorites;
pub mod games;
pub mod health_check;
pub mod ratings;
pub mod requests;
pub mod stats;
pub mod support;
pub mod uploads;
pub mod users;
