pub mod etherscan;
pub mod matcher;
pub mod qr;
pub mod tether;
pub mod trongrid;
pub mod tronscan;

pub use etherscan::EtherscanSource;
pub use matcher::{confirm_payment, LedgerSource};
pub use qr::render_wallet_qr;
pub use tether::TetherClient;
pub use trongrid::TrongridSource;
pub use tronscan::TronscanClient;
