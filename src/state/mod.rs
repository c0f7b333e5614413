//! Client-side state: the session store and page view models.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the authenticated session. `route` tracks the current location
//! and receives the login redirect issued by the request pipeline. The page
//! models (`dashboard`, `admin`, `transactions`) derive display data from
//! gateway responses, and `toast` carries the notifications pages raise when
//! a call fails.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod route;
pub mod toast;
pub mod transactions;
