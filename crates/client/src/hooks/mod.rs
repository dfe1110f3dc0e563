//! Mutation hooks.
//!
//! Each mutation sanitizes its payload, calls the action, and only after a
//! successful response cancels in-flight fetches for the affected keys and
//! patches the cached collection (and the single-item entry where one
//! exists). Whatever the outcome, the user is then sent to the role's
//! listing route and the current route is refreshed. Failures go through the
//! shared [`ErrorHandler`] and leave the cache untouched.

mod account;
mod appointment;
mod payment;
mod property;

pub use account::AccountMutations;
pub use appointment::AppointmentMutations;
pub use payment::PaymentMutations;
pub use property::PropertyMutations;

use std::future::Future;
use std::sync::Arc;

use domain::{Resource, Role};

use crate::actions::Api;
use crate::cache::QueryCache;
use crate::error::{ClientResult, ErrorHandler};
use crate::navigation::{settle, Navigator};

/// Everything a mutation needs from its surroundings.
#[derive(Clone)]
pub struct MutationContext {
    pub api: Arc<dyn Api>,
    pub cache: Arc<QueryCache>,
    pub navigator: Arc<dyn Navigator>,
    pub errors: ErrorHandler,
    /// Role of the signed-in account, if any
    pub role: Option<Role>,
}

impl MutationContext {
    pub fn new(
        api: Arc<dyn Api>,
        cache: Arc<QueryCache>,
        navigator: Arc<dyn Navigator>,
        errors: ErrorHandler,
    ) -> Self {
        Self {
            api,
            cache,
            navigator,
            errors,
            role: None,
        }
    }

    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    pub fn properties(&self) -> PropertyMutations<'_> {
        PropertyMutations::new(self)
    }

    pub fn accounts(&self) -> AccountMutations<'_> {
        AccountMutations::new(self)
    }

    pub fn payments(&self) -> PaymentMutations<'_> {
        PaymentMutations::new(self)
    }

    pub fn appointments(&self) -> AppointmentMutations<'_> {
        AppointmentMutations::new(self)
    }

    /// Run a mutation, then report its failure and settle navigation.
    async fn run<T, F>(&self, resource: Resource, mutation: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let result = mutation.await;
        if let Err(e) = &result {
            self.errors.handle(e);
        }
        settle(self.navigator.as_ref(), self.role, resource);
        result
    }
}
