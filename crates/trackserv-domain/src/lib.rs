//! trackserv-domain
//!
//! Pure domain models (ServiceProvider, Client, PaymentPeriod,
//! ServiceRecord, ProviderBook) plus the summary shapes derived from them.
//! No I/O, no storage. Only data types and core enums.

pub mod book;
pub mod client;
pub mod common;
pub mod period;
pub mod provider;
pub mod record;
pub mod summary;

pub use book::*;
pub use client::*;
pub use common::*;
pub use period::*;
pub use provider::*;
pub use record::*;
pub use summary::*;
