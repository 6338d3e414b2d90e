pub mod health;
pub mod tether;
pub mod transactions;
pub mod tronscan;
pub mod utils;

pub use health::*;
pub use tether::*;
pub use transactions::*;
pub use tronscan::*;
pub use utils::*;

use crate::services::{EtherscanSource, TetherClient, TrongridSource, TronscanClient};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub trongrid: Arc<TrongridSource>,
    pub etherscan: Arc<EtherscanSource>,
    pub tronscan: Arc<TronscanClient>,
    pub tether: Arc<TetherClient>,
    pub started_at: Instant,
}
