//! Token discovery view
//!
//! A live table of the top assets by market cap with client-side filtering and
//! sorting, a 7-day chart for the selected row, and an optional analyst chat.
//! State, formatting and geometry are plain Rust and always compiled; the
//! terminal front end sits behind the `tui` feature.

pub mod chart;
pub mod fetch;
pub mod format;
mod logging;
pub mod refresh;
pub mod sparkline;
pub mod state;

#[cfg(feature = "tui")]
mod event_loop;
#[cfg(feature = "tui")]
pub mod input;
#[cfg(feature = "tui")]
mod keys;
#[cfg(feature = "tui")]
pub mod layout;
#[cfg(feature = "tui")]
mod render;

#[cfg(feature = "tui")]
pub use event_loop::{DiscoveryServices, run_discovery_tui};
pub use state::DiscoveryAppState;
