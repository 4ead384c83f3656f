//! Routing module
//!
//! A `Site` dispatches each request to the first rule whose path condition
//! matches, and answers 404 when none does.

mod matcher;
mod site;

pub use matcher::{match_rule, PathMatch};
pub use site::Site;
