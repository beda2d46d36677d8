//! Dashboard route table and access gating

use crate::{EntityId, EntityKind};

pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const HOME: &str = "/";
    pub const EXPERTS: &str = "/experts";
    pub const PRICES: &str = "/prices";
    pub const PERMISSION_DENIED: &str = "/permission-denied";
    pub const SERVICES: &str = "/services";
}

pub const PUBLIC_ROUTES: [&str; 2] = [paths::LOGIN, paths::PERMISSION_DENIED];
pub const PRIVATE_ROUTES: [&str; 3] = [paths::EXPERTS, paths::PRICES, paths::SERVICES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Private,
    /// Not in either list, e.g. the home redirect
    Unlisted,
}

pub fn list_path(kind: EntityKind) -> &'static str {
    kind.page_path()
}

pub fn create_path(kind: EntityKind) -> String {
    format!("{}/create", kind.page_path())
}

pub fn edit_path(kind: EntityKind, id: EntityId) -> String {
    format!("{}/edit/{}", kind.page_path(), id)
}

/// `/experts/edit/5` matches `/experts`, `/expertsfoo` does not
fn is_under(path: &str, route: &str) -> bool {
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn route_access(path: &str) -> RouteAccess {
    let path = path.split(['?', '#']).next().unwrap_or(path);

    if PUBLIC_ROUTES.iter().any(|route| is_under(path, route)) {
        RouteAccess::Public
    } else if PRIVATE_ROUTES.iter().any(|route| is_under(path, route)) {
        RouteAccess::Private
    } else {
        RouteAccess::Unlisted
    }
}

/// Where to send the visitor instead, if anywhere
pub fn guard(path: &str, authenticated: bool) -> Option<&'static str> {
    match route_access(path) {
        RouteAccess::Private if !authenticated => Some(paths::LOGIN),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_access() {
        assert_eq!(route_access("/login"), RouteAccess::Public);
        assert_eq!(route_access("/permission-denied"), RouteAccess::Public);
        assert_eq!(route_access("/experts"), RouteAccess::Private);
        assert_eq!(route_access("/prices/edit/12"), RouteAccess::Private);
        assert_eq!(route_access("/services/create?from=menu"), RouteAccess::Private);
        assert_eq!(route_access("/"), RouteAccess::Unlisted);
        assert_eq!(route_access("/expertsfoo"), RouteAccess::Unlisted);
    }

    #[test]
    fn test_guard_redirects_anonymous_visitors() {
        assert_eq!(guard("/experts", false), Some(paths::LOGIN));
        assert_eq!(guard("/experts", true), None);
        assert_eq!(guard("/login", false), None);
        assert_eq!(guard("/", false), None);
    }

    #[test]
    fn test_entity_paths() {
        assert_eq!(create_path(EntityKind::Expert), "/experts/create");
        assert_eq!(edit_path(EntityKind::Price, 9), "/prices/edit/9");
        assert_eq!(list_path(EntityKind::Service), "/services");
    }
}
