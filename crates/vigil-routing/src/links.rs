//! Navigation links
//!
//! The navbar derives its link set from the session snapshot.

use serde::Serialize;
use vigil_auth::SessionView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub target: &'static str,
}

impl NavLink {
    const fn new(label: &'static str, target: &'static str) -> Self {
        Self { label, target }
    }
}

/// Links shown in the navigation bar for the given session.
pub fn nav_links(view: &SessionView) -> Vec<NavLink> {
    let mut links = Vec::new();

    if view.is_admin() {
        links.push(NavLink::new("Dashboard", "/admin/home"));
    } else {
        links.push(NavLink::new("Home", "/"));
    }

    links.push(NavLink::new("Contacts", "/contacts"));
    links.push(NavLink::new("Profiles", "/profiles"));

    if view.is_authenticated() {
        links.push(NavLink::new("Logout", "/logout"));
    } else {
        links.push(NavLink::new("Sign In", "/auth"));
    }

    links
}

/// Where the logo links to.
pub fn home_target(view: &SessionView) -> &'static str {
    if view.is_admin() {
        "/admin/home"
    } else {
        "/"
    }
}
