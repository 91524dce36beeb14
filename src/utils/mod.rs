pub mod error;
#[cfg(feature = "web")]
pub mod hex;
pub mod logger;
pub mod validation;
