pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod schema;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
