//! Account roles and the role lookup table.
//!
//! Every role-dependent decision (post-mutation destination, management
//! rights) is answered from [`ROLE_TABLE`] so callers never branch on the
//! role themselves.

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_AGENT, ROLE_CLIENT};
use crate::error::DomainError;

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
    Client,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Capability set granted to this role
    pub fn capabilities(&self) -> Capabilities {
        entry(*self).capabilities
    }

    /// Role string as stored and transmitted
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Agent => ROLE_AGENT,
            Role::Client => ROLE_CLIENT,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_AGENT => Ok(Role::Agent),
            ROLE_CLIENT => Ok(Role::Client),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources that own a listing page in the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Properties,
    /// Payment records
    Payments,
    Appointments,
    Accounts,
}

/// What a role may manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub manage_accounts: bool,
    pub manage_properties: bool,
    pub manage_payments: bool,
    pub manage_appointments: bool,
}

struct RoleEntry {
    role: Role,
    properties: &'static str,
    payments: &'static str,
    appointments: &'static str,
    accounts: &'static str,
    capabilities: Capabilities,
}

const ROLE_TABLE: [RoleEntry; 3] = [
    RoleEntry {
        role: Role::Admin,
        properties: "/admin/properties",
        payments: "/admin/records",
        appointments: "/admin/appointments",
        accounts: "/admin/users",
        capabilities: Capabilities {
            manage_accounts: true,
            manage_properties: true,
            manage_payments: true,
            manage_appointments: true,
        },
    },
    RoleEntry {
        role: Role::Agent,
        properties: "/agent/properties",
        payments: "/agent/records",
        appointments: "/agent/appointments",
        accounts: "/agent/account",
        capabilities: Capabilities {
            manage_accounts: false,
            manage_properties: true,
            manage_payments: true,
            manage_appointments: true,
        },
    },
    RoleEntry {
        role: Role::Client,
        properties: "/properties",
        payments: "/records",
        appointments: "/appointments",
        accounts: "/account",
        capabilities: Capabilities {
            manage_accounts: false,
            manage_properties: false,
            manage_payments: false,
            manage_appointments: true,
        },
    },
];

fn entry(role: Role) -> &'static RoleEntry {
    // The table has one row per variant.
    ROLE_TABLE
        .iter()
        .find(|e| e.role == role)
        .unwrap_or(&ROLE_TABLE[0])
}

/// Listing route a role is sent to after mutating `resource`.
///
/// Returns `None` when there is no role, meaning only the current route
/// should be refreshed.
pub fn listing_route(role: Option<Role>, resource: Resource) -> Option<&'static str> {
    let entry = entry(role?);
    Some(match resource {
        Resource::Properties => entry.properties,
        Resource::Payments => entry.payments,
        Resource::Appointments => entry.appointments,
        Resource::Accounts => entry.accounts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_route_per_role() {
        assert_eq!(
            listing_route(Some(Role::Admin), Resource::Properties),
            Some("/admin/properties")
        );
        assert_eq!(
            listing_route(Some(Role::Agent), Resource::Properties),
            Some("/agent/properties")
        );
        assert_eq!(
            listing_route(Some(Role::Client), Resource::Properties),
            Some("/properties")
        );
        assert_eq!(
            listing_route(Some(Role::Agent), Resource::Payments),
            Some("/agent/records")
        );
        assert_eq!(listing_route(None, Resource::Payments), None);
    }

    #[test]
    fn test_every_role_has_a_table_row() {
        for role in [Role::Admin, Role::Agent, Role::Client] {
            assert_eq!(entry(role).role, role);
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::try_from("agent"), Ok(Role::Agent));
        assert!(Role::try_from("owner").is_err());
        assert_eq!(Role::Client.to_string(), "client");
    }

    #[test]
    fn test_only_admin_manages_accounts() {
        assert!(Role::Admin.capabilities().manage_accounts);
        assert!(!Role::Agent.capabilities().manage_accounts);
        assert!(!Role::Client.capabilities().manage_properties);
    }
}
