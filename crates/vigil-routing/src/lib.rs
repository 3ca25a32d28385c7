//! Vigil Route Guarding
//!
//! Consumes the resolver's session snapshot to keep navigation honest:
//! wrong-role routes redirect, role-gated routes wait while the first
//! resolution is still in flight, and the navbar link set derives from
//! the same snapshot.

mod guard;
mod links;
mod route;

pub use guard::{Access, RouteGuard};
pub use links::{home_target, nav_links, NavLink};
pub use route::{Requirement, RoutePattern, RouteRule};
