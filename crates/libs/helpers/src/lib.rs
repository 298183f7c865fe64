pub mod auth_jwt;
pub mod passwords;
pub mod validations;
