//! Custody provider adapters.

pub mod wyre;

pub use wyre::{WyreAdapter, WyreApi, WyreConfig, TEST_BASE_URL};
