pub mod qr;
pub mod response;
pub mod transaction;

pub use qr::*;
pub use response::*;
pub use transaction::*;
