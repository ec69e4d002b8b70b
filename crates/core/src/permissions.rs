//! Group and permission requirements for mutating component routes.
//!
//! Authorization is a pure capability check: a [`Requirement`] against the
//! groups and permissions a caller carries. The component pipeline never
//! looks at identity.

use crate::error::CoreError;

pub const GROUP_ADMIN: &str = "admin";

pub const PERMISSION_CREATE: &str = "vuement.create";
pub const PERMISSION_UPDATE: &str = "vuement.update";
pub const PERMISSION_DELETE: &str = "vuement.delete";

/// A group plus a permission, both of which the caller must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub group: &'static str,
    pub permission: &'static str,
}

impl Requirement {
    pub const fn new(group: &'static str, permission: &'static str) -> Self {
        Self { group, permission }
    }
}

pub const CREATE_COMPONENT: Requirement = Requirement::new(GROUP_ADMIN, PERMISSION_CREATE);
pub const UPDATE_COMPONENT: Requirement = Requirement::new(GROUP_ADMIN, PERMISSION_UPDATE);
pub const DELETE_COMPONENT: Requirement = Requirement::new(GROUP_ADMIN, PERMISSION_DELETE);

/// Allow or deny a caller holding `groups` and `permissions`.
pub fn authorize(
    requirement: Requirement,
    groups: &[String],
    permissions: &[String],
) -> Result<(), CoreError> {
    if !groups.iter().any(|g| g == requirement.group) {
        return Err(CoreError::Forbidden(format!(
            "Group '{}' required",
            requirement.group
        )));
    }
    if !permissions.iter().any(|p| p == requirement.permission) {
        return Err(CoreError::Forbidden(format!(
            "Permission '{}' required",
            requirement.permission
        )));
    }
    Ok(())
}
