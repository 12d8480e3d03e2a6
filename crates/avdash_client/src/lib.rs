//! Dashboard client: controller HTTP boundary, polling loops, and the
//! maintenance-chain driver.
mod chain_driver;
mod controller;
mod poller;
mod sweep;
mod types;

pub use chain_driver::{run_chain, ChainError};
pub use controller::{ActionStatus, ClientSettings, Controller, HttpController};
pub use poller::{spawn_poller, PollHandle, PollValue};
pub use sweep::sweep_completed;
pub use types::{ClientError, FailureKind};
