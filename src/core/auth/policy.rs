//! Role-based access predicates
//!
//! Roles are plain strings. Both predicates are pure and take the required
//! roles first and the roles held by the current user second.

/// Check whether any held role is one of the required roles.
///
/// An empty list on either side never grants permission.
pub fn has_permission<R, H>(required: &[R], held: &[H]) -> bool
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    if required.is_empty() || held.is_empty() {
        return false;
    }

    intersects(required, held)
}

/// Check whether a user holding `held` may open a route requiring `required`.
///
/// A route without required roles is open to any authenticated user, i.e. any
/// user holding at least one role. A user without roles is always denied.
pub fn has_route_access<R, H>(required: &[R], held: &[H]) -> bool
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    if held.is_empty() {
        return false;
    }

    // Unrestricted route
    if required.is_empty() {
        return true;
    }

    intersects(required, held)
}

fn intersects<R, H>(required: &[R], held: &[H]) -> bool
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    required
        .iter()
        .any(|r| held.iter().any(|h| h.as_ref() == r.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_has_permission() {
        assert!(has_permission(&["admin"], &["admin"]));
        assert!(has_permission(&["superadmin", "admin"], &["viewer", "admin"]));
        assert!(!has_permission(&["admin"], &["viewer"]));
    }

    #[test]
    fn test_has_permission_empty_sides() {
        assert!(!has_permission(NONE, NONE));
        assert!(!has_permission(NONE, &["admin"]));
        assert!(!has_permission(&["admin"], NONE));
    }

    #[test]
    fn test_has_route_access_table() {
        assert!(!has_route_access(NONE, NONE));
        assert!(has_route_access(NONE, &["viewer"]));
        assert!(!has_route_access(&["admin"], NONE));
        assert!(!has_route_access(&["admin"], &["viewer"]));
        assert!(has_route_access(&["admin"], &["admin", "viewer"]));
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        assert!(!has_route_access(&["admin"], &["Admin"]));
        assert!(!has_permission(&["admin"], &["ADMIN"]));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let held = vec!["admin".to_string()];
        assert!(has_route_access(&["superadmin", "admin"], &held));
        assert!(has_permission(&["admin"], &held));
    }
}
