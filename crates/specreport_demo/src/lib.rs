//! Demo utilities exercised by the specreport built-in suites.
//!
//! Each module is deliberately small: arithmetic, string helpers, an in-memory user store, simulated async
//! fetches, and a controller that reaches the user store through a trait seam so it can be tested with doubles.

#![deny(clippy::unwrap_used)]

pub mod calculator;
pub mod controller;
pub mod errors;
pub mod fetch;
pub mod strings;
pub mod users;

pub use calculator::Calculator;
pub use controller::{UNKNOWN_USER_NAME, UserController, UserDirectory};
pub use errors::{CalcError, FetchError, UserError};
pub use fetch::{FetchLatency, FetchService, FetchedData, UserProfile};
pub use users::{NewUser, User, UserService, UserUpdate};
