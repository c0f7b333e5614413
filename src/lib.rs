//! # bankportal
//!
//! Client side of the banking portal. The backend REST service owns every
//! balance, ledger entry and authorization decision; this crate only holds the
//! session, talks to the backend through one typed gateway, and derives view
//! state for the pages that render it.
//!
//! `net` is the gateway (pipeline, storage port, typed resource groups),
//! `state` holds the session store and page view models, and `util` carries
//! small presentation helpers shared by pages.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;
