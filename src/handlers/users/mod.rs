mod permissions;

pub use permissions::{permissions_get, permissions_missing_username};
