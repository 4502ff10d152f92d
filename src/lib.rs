pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod response;
pub mod routes;

#[cfg(test)]
pub mod testing;
