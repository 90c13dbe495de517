pub mod qris;
pub mod response;

pub use qris::*;
pub use response::*;
