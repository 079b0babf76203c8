//! Role-based access control.
//!
//! Every mutating operation is guarded by a single [`require_role`] check at
//! its entry point; ownership checks live next to the data they protect.

use serde::{Deserialize, Serialize};

use crate::auth::Claims;
use crate::error::{ApiError, ErrorCode, Result};

/// Marketplace role. Suppliers list produce, buyers request it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supplier,
    Buyer,
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supplier" => Ok(Role::Supplier),
            "buyer" => Ok(Role::Buyer),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Supplier => "supplier",
            Role::Buyer => "buyer",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug)]
pub struct RoleParseError(String);

impl std::fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

/// Require the authenticated user to hold `expected` role.
///
/// Returns `RoleNotAuthorized` on mismatch (or an unparseable role claim)
/// and is otherwise a no-op.
pub fn require_role(claims: &Claims, expected: Role) -> Result<()> {
    let actual: Role = claims.role.parse().map_err(|_| {
        ApiError::with_code(
            ErrorCode::RoleNotAuthorized,
            format!("Unknown role '{}'", claims.role),
        )
    })?;

    if actual != expected {
        return Err(ApiError::with_code(
            ErrorCode::RoleNotAuthorized,
            format!("This action requires the {} role", expected),
        ));
    }

    Ok(())
}
