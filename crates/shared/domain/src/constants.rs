//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Administrator role with full management rights
pub const ROLE_ADMIN: &str = "admin";

/// Agent role, manages listings and appointments
pub const ROLE_AGENT: &str = "agent";

/// Client role, browses listings and books appointments
pub const ROLE_CLIENT: &str = "client";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_AGENT, ROLE_CLIENT];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Collections
// =============================================================================

/// Document collection holding properties
pub const COLLECTION_PROPERTIES: &str = "properties";

/// Document collection holding appointments
pub const COLLECTION_APPOINTMENTS: &str = "appointments";

/// Document collection holding payments
pub const COLLECTION_PAYMENTS: &str = "payments";

/// Key-value entry holding the JSON array of accounts
pub const ACCOUNTS_KEY: &str = "accounts";

// =============================================================================
// Pagination
// =============================================================================

/// Default page number for listings
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on page size
pub const MAX_PAGE_SIZE: u64 = 100;

// =============================================================================
// Calendar
// =============================================================================

/// Number of entries shown in the upcoming events panel
pub const UPCOMING_EVENTS_LIMIT: usize = 5;

// =============================================================================
// Authentication
// =============================================================================

/// Minimum session secret length (security requirement)
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRATION_HOURS: i64 = 24;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";
