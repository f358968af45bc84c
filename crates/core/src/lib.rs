#![forbid(unsafe_code)]

pub mod curriculum;
pub mod error;
pub mod model;
pub mod signals;

pub use error::Error;
