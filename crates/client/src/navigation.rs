//! Seams to the surrounding router and toast system.

use domain::{listing_route, Resource, Role};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);

    /// Re-fetch server data for the current route
    fn refresh(&self);
}

#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Post-mutation navigation: go to the role's listing for `resource`, then
/// refresh. Without a role only the current route is refreshed.
pub fn settle(navigator: &dyn Navigator, role: Option<Role>, resource: Resource) {
    if let Some(route) = listing_route(role, resource) {
        navigator.push(route);
    }
    navigator.refresh();
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_settle_pushes_role_route_then_refreshes() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(eq("/agent/records"))
            .times(1)
            .return_const(());
        navigator.expect_refresh().times(1).return_const(());

        settle(&navigator, Some(Role::Agent), Resource::Payments);
    }

    #[test]
    fn test_settle_without_role_only_refreshes() {
        let mut navigator = MockNavigator::new();
        navigator.expect_push().never();
        navigator.expect_refresh().times(1).return_const(());

        settle(&navigator, None, Resource::Properties);
    }
}
