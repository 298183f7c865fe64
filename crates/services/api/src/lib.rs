pub mod db_error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod startup;
