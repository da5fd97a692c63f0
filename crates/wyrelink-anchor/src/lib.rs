//! # Wyrelink Anchor
//!
//! Deposit glue between an anchoring framework and the wyrelink custody
//! core: translate the framework's transaction record into a custody
//! transfer, wait for settlement, and hand back the finalized ledger record.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`deposit`] | Deposit flow: distribution account, memo assignment, submission |
//! | [`ledger`] | Ledger gateway trait and the Horizon implementation |
//! | [`transaction`] | Framework-level deposit record types |
//!
//! The flow is generic over [`CustodyProvider`](wyrelink_core::CustodyProvider)
//! and [`LedgerGateway`], so tests script both collaborators at the transport
//! level.

pub mod deposit;
pub mod ledger;
pub mod transaction;

pub use deposit::{AnchorError, DepositFlow};
pub use ledger::{HorizonGateway, LedgerError, LedgerGateway};
pub use transaction::{AnchorAsset, DepositTransaction, MemoType};
