//! Route guard
//!
//! Every navigation attempt is checked against the current session
//! snapshot before rendering.

use vigil_auth::SessionView;

use crate::route::{Requirement, RouteRule};

/// Decision for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(String),
    /// No snapshot to decide on yet; the UI keeps its loading state
    Pending,
}

#[derive(Clone)]
pub struct RouteGuard {
    rules: Vec<RouteRule>,
}

impl RouteGuard {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The application's route table.
    pub fn standard() -> Self {
        Self::new(vec![
            RouteRule::new("/", Requirement::Public),
            RouteRule::new("/faq", Requirement::Public),
            RouteRule::new("/contacts", Requirement::Public),
            RouteRule::new(
                "/auth",
                Requirement::GuestOnly {
                    redirect: "/".to_string(),
                },
            ),
            RouteRule::new(
                "/logout",
                Requirement::ResolvedOnly {
                    redirect: "/auth".to_string(),
                },
            ),
            RouteRule::new(
                "/complaint",
                Requirement::RegisteredOnly {
                    redirect: "/auth".to_string(),
                },
            ),
            RouteRule::new(
                "/profiles",
                Requirement::RegisteredOnly {
                    redirect: "/auth".to_string(),
                },
            ),
            RouteRule::new(
                "/admin/auth",
                Requirement::NonAdmin {
                    redirect: "/admin/home".to_string(),
                },
            ),
            RouteRule::new(
                "/admin/home",
                Requirement::AdminOnly {
                    redirect: "/admin/auth".to_string(),
                },
            ),
            RouteRule::new(
                "/admin/complaint/:id",
                Requirement::AdminOnly {
                    redirect: "/admin/auth".to_string(),
                },
            ),
        ])
    }

    /// Decide a navigation attempt. Unknown paths are granted; the
    /// not-found page is public.
    pub fn decide(&self, path: &str, view: &SessionView) -> Access {
        let rule = match self.rules.iter().find(|rule| rule.pattern.matches(path)) {
            Some(rule) => rule,
            None => return Access::Granted,
        };

        let access = evaluate(&rule.requirement, view);
        if let Access::Redirect(target) = &access {
            tracing::debug!(path, target = %target, "Navigation redirected");
        }

        access
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::standard()
    }
}

fn evaluate(requirement: &Requirement, view: &SessionView) -> Access {
    match requirement {
        Requirement::Public => Access::Granted,
        Requirement::GuestOnly { redirect } => {
            if view.is_authenticated() {
                Access::Redirect(redirect.clone())
            } else {
                Access::Granted
            }
        }
        Requirement::RegisteredOnly { redirect } => match &view.session {
            None => Access::Pending,
            Some(session) if session.is_registered() => Access::Granted,
            Some(_) => Access::Redirect(redirect.clone()),
        },
        Requirement::AdminOnly { redirect } => match &view.session {
            None => Access::Pending,
            Some(session) if session.is_admin() => Access::Granted,
            Some(_) => Access::Redirect(redirect.clone()),
        },
        Requirement::NonAdmin { redirect } => {
            if view.is_admin() {
                Access::Redirect(redirect.clone())
            } else {
                Access::Granted
            }
        }
        Requirement::ResolvedOnly { redirect } => match &view.session {
            None => Access::Redirect(redirect.clone()),
            Some(_) => Access::Granted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_auth::{ResolutionState, Role, Session};

    fn view(role: Role) -> SessionView {
        SessionView {
            session: Some(Session::new(role, role.as_str().to_string())),
            resolution: ResolutionState::Resolved,
        }
    }

    fn unresolved() -> SessionView {
        SessionView {
            session: None,
            resolution: ResolutionState::Resolving,
        }
    }

    #[test]
    fn test_public_routes_are_open_to_everyone() {
        let guard = RouteGuard::standard();

        for path in ["/", "/faq", "/contacts"] {
            assert_eq!(guard.decide(path, &view(Role::Admin)), Access::Granted);
            assert_eq!(guard.decide(path, &unresolved()), Access::Granted);
        }
    }

    #[test]
    fn test_registered_routes() {
        let guard = RouteGuard::standard();

        assert_eq!(
            guard.decide("/complaint", &view(Role::Registered)),
            Access::Granted
        );
        // Guests are sent to sign in
        assert_eq!(
            guard.decide("/complaint", &view(Role::Unregistered)),
            Access::Redirect("/auth".to_string())
        );
        // Admins do not qualify as registered users
        assert_eq!(
            guard.decide("/profiles", &view(Role::Admin)),
            Access::Redirect("/auth".to_string())
        );
        // No snapshot yet: keep loading
        assert_eq!(guard.decide("/complaint", &unresolved()), Access::Pending);
    }

    #[test]
    fn test_admin_routes() {
        let guard = RouteGuard::standard();

        assert_eq!(
            guard.decide("/admin/home", &view(Role::Admin)),
            Access::Granted
        );
        assert_eq!(
            guard.decide("/admin/complaint/42", &view(Role::Admin)),
            Access::Granted
        );
        assert_eq!(
            guard.decide("/admin/home", &view(Role::Registered)),
            Access::Redirect("/admin/auth".to_string())
        );
        assert_eq!(guard.decide("/admin/home", &unresolved()), Access::Pending);
    }

    #[test]
    fn test_sign_in_pages_bounce_the_signed_in() {
        let guard = RouteGuard::standard();

        assert_eq!(
            guard.decide("/auth", &view(Role::Unregistered)),
            Access::Granted
        );
        assert_eq!(guard.decide("/auth", &unresolved()), Access::Granted);
        assert_eq!(
            guard.decide("/auth", &view(Role::Registered)),
            Access::Redirect("/".to_string())
        );
        assert_eq!(
            guard.decide("/admin/auth", &view(Role::Admin)),
            Access::Redirect("/admin/home".to_string())
        );
        assert_eq!(
            guard.decide("/admin/auth", &view(Role::Registered)),
            Access::Granted
        );
    }

    #[test]
    fn test_logout_requires_a_settled_session() {
        let guard = RouteGuard::standard();

        // Any resolved session may log out, guest included
        assert_eq!(
            guard.decide("/logout", &view(Role::Unregistered)),
            Access::Granted
        );
        assert_eq!(
            guard.decide("/logout", &unresolved()),
            Access::Redirect("/auth".to_string())
        );
    }

    #[test]
    fn test_unknown_paths_are_granted() {
        let guard = RouteGuard::standard();

        assert_eq!(
            guard.decide("/no/such/page", &unresolved()),
            Access::Granted
        );
    }
}
