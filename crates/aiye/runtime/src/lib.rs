//! Aiye runtime
//!
//! Wires the gateway, the scene and a panel together:
//! - [`Synchronizer`]: organ cache, quota snapshot, selection and actions
//! - [`Poller`]: the repeating refresh timer
//! - [`UserIntent`]: what the panel may ask for, through one dispatch point
//! - [`AiyeConfig`]: layered configuration
//!
//! Polling ticks are not serialized against each other. If an older fetch
//! finishes after a newer one, its (stale) organ set replaces the newer
//! one; the cache always reflects the fetch that completed last.

pub mod cache;
pub mod config;
pub mod error;
pub mod intent;
pub mod panel;
pub mod poller;
pub mod synchronizer;

pub use cache::OrganCache;
pub use config::AiyeConfig;
pub use error::{RuntimeError, RuntimeResult, ValidationError};
pub use intent::{ImageUpload, PaymentForm, UserIntent, VerificationForm};
pub use panel::{Notification, Panel, PanelAction, Severity};
pub use poller::{Poller, PollerState};
pub use synchronizer::Synchronizer;
