//! Route table building blocks

/// `/`-segmented path pattern; `:name` segments match any one segment.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param,
}

impl RoutePattern {
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.starts_with(':') {
                    Segment::Param
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();

        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| match segment {
                Segment::Literal(lit) => lit == part,
                Segment::Param => true,
            })
    }
}

/// Who may enter a route, and where everyone else goes.
#[derive(Debug, Clone)]
pub enum Requirement {
    /// Open to everyone, resolved or not
    Public,
    /// Sign-in pages: anyone already signed in is bounced
    GuestOnly { redirect: String },
    /// Registered users only; admins do not qualify
    RegisteredOnly { redirect: String },
    AdminOnly { redirect: String },
    /// Admin sign-in page: admins are bounced to their dashboard
    NonAdmin { redirect: String },
    /// Any settled session, guest included
    ResolvedOnly { redirect: String },
}

#[derive(Debug, Clone)]
pub struct RouteRule {
    pub pattern: RoutePattern,
    pub requirement: Requirement,
}

impl RouteRule {
    pub fn new(pattern: &str, requirement: Requirement) -> Self {
        Self {
            pattern: RoutePattern::new(pattern),
            requirement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = RoutePattern::new("/admin/home");

        assert!(pattern.matches("/admin/home"));
        assert!(pattern.matches("admin/home/"));
        assert!(!pattern.matches("/admin"));
        assert!(!pattern.matches("/admin/home/extra"));
    }

    #[test]
    fn test_param_pattern() {
        let pattern = RoutePattern::new("/admin/complaint/:id");

        assert!(pattern.matches("/admin/complaint/42"));
        assert!(pattern.matches("/admin/complaint/abc-def"));
        assert!(!pattern.matches("/admin/complaint"));
        assert!(!pattern.matches("/admin/complaint/42/edit"));
    }

    #[test]
    fn test_root_pattern() {
        let pattern = RoutePattern::new("/");

        assert!(pattern.matches("/"));
        assert!(pattern.matches(""));
        assert!(!pattern.matches("/faq"));
    }
}
