//! Common utility functions

pub mod phone;

pub use phone::{mask_phone_number, meets_min_length, normalize_phone_number};
