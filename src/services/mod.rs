pub mod countdown_service;
pub mod emv_service;
pub mod payload_service;
pub mod proof_service;
pub mod signature_service;

pub use countdown_service::*;
pub use emv_service::*;
pub use payload_service::*;
pub use proof_service::*;
pub use signature_service::*;
