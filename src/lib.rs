pub mod annotation;
pub mod config;
pub mod error;
pub mod mask;
pub mod session;
pub mod source;
pub mod store;
