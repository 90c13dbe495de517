pub mod config;
pub mod health;
pub mod proof;
pub mod qris;

pub use config::*;
pub use health::*;
pub use proof::*;
pub use qris::*;
