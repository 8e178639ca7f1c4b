//! Request handler helpers

pub mod error;

pub use error::{handle_domain_error, rejection_response, validation_error_response};
