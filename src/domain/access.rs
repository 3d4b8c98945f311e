//! Role-based access control.
//!
//! A fixed table assigns permission atoms to each role. The table is built
//! once at startup and injected wherever authorization decisions are made;
//! nothing consults global state.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;

use super::user::{User, UserRole};
use crate::errors::{AppError, AppResult};

/// Named capability gating a single resource/action pair.
///
/// The `*Own*` variants cover self-service access to an employee's own
/// records and are checked together with resource ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // User management
    CreateUser,
    ReadUser,
    UpdateUser,
    DeleteUser,

    // Employee management
    CreateEmployee,
    ReadEmployee,
    UpdateEmployee,
    DeleteEmployee,
    ReadOwnEmployeeData,

    // Department management
    CreateDepartment,
    ReadDepartment,
    UpdateDepartment,
    DeleteDepartment,

    // Position management
    CreatePosition,
    ReadPosition,
    UpdatePosition,
    DeletePosition,

    // Salary management
    CreateSalary,
    ReadSalary,
    UpdateSalary,
    DeleteSalary,
    ReadOwnSalary,

    // Attendance management
    CreateAttendance,
    ReadAttendance,
    UpdateAttendance,
    DeleteAttendance,
    ReadOwnAttendance,
    MarkOwnAttendance,

    // Leave management
    CreateLeave,
    ReadLeave,
    UpdateLeave,
    DeleteLeave,
    ApproveLeave,
    ReadOwnLeave,
    RequestOwnLeave,
}

/// The request-side identity facts authorization decisions depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub role: UserRole,
    pub employee_id: Option<i32>,
    pub is_active: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            role: user.role,
            employee_id: user.employee_id,
            is_active: user.is_active,
        }
    }
}

/// Menu visibility flags derived from a user's permissions,
/// consumed by frontends to decide what to render.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuAccess {
    pub dashboard: bool,
    pub employees: bool,
    pub users: bool,
    pub departments: bool,
    pub positions: bool,
    pub salaries: bool,
    pub attendances: bool,
    pub leaves: bool,
    pub can_create_employee: bool,
    pub can_edit_employee: bool,
    pub can_delete_employee: bool,
    pub can_approve_leave: bool,
    pub can_manage_departments: bool,
    pub can_manage_positions: bool,
}

/// Immutable role -> permission-set table plus the predicates built on it.
pub struct AccessPolicy {
    table: HashMap<UserRole, HashSet<Permission>>,
}

impl AccessPolicy {
    /// Build the policy with the standard role assignments.
    pub fn with_default_roles() -> Self {
        use Permission::*;

        let admin: HashSet<Permission> = [
            CreateUser, ReadUser, UpdateUser, DeleteUser,
            CreateEmployee, ReadEmployee, UpdateEmployee, DeleteEmployee,
            CreateDepartment, ReadDepartment, UpdateDepartment, DeleteDepartment,
            CreatePosition, ReadPosition, UpdatePosition, DeletePosition,
            CreateSalary, ReadSalary, UpdateSalary, DeleteSalary,
            CreateAttendance, ReadAttendance, UpdateAttendance, DeleteAttendance,
            CreateLeave, ReadLeave, UpdateLeave, DeleteLeave, ApproveLeave,
        ]
        .into();

        let manager: HashSet<Permission> = [
            ReadUser,
            CreateEmployee, ReadEmployee, UpdateEmployee,
            CreateDepartment, ReadDepartment, UpdateDepartment,
            CreatePosition, ReadPosition, UpdatePosition,
            CreateSalary, ReadSalary, UpdateSalary,
            ReadAttendance, UpdateAttendance,
            ReadLeave, UpdateLeave, ApproveLeave,
            // Own data access
            ReadOwnEmployeeData, ReadOwnSalary,
            ReadOwnAttendance, MarkOwnAttendance,
            ReadOwnLeave, RequestOwnLeave,
        ]
        .into();

        let employee: HashSet<Permission> = [
            ReadDepartment, ReadPosition,
            // Own data access only
            ReadOwnEmployeeData, ReadOwnSalary,
            ReadOwnAttendance, MarkOwnAttendance,
            ReadOwnLeave, RequestOwnLeave,
        ]
        .into();

        let mut table = HashMap::new();
        table.insert(UserRole::Admin, admin);
        table.insert(UserRole::Manager, manager);
        table.insert(UserRole::Employee, employee);
        Self { table }
    }

    /// Check whether the actor holds a permission. Inactive users hold none.
    pub fn has_permission(&self, actor: &Actor, permission: Permission) -> bool {
        if !actor.is_active {
            return false;
        }
        self.table
            .get(&actor.role)
            .map(|set| set.contains(&permission))
            .unwrap_or(false)
    }

    /// Check whether the actor may touch a record scoped to an employee.
    ///
    /// Admins and managers own everything; employees own only records linked
    /// to their own employee id. An actor with no linked employee owns nothing.
    pub fn check_resource_ownership(&self, actor: &Actor, resource_employee_id: Option<i32>) -> bool {
        if actor.role.is_manager_or_admin() {
            return true;
        }
        match (actor.employee_id, resource_employee_id) {
            (Some(own), Some(target)) => own == target,
            _ => false,
        }
    }

    /// Require a permission, translating absence into `Forbidden`.
    pub fn authorize(&self, actor: &Actor, permission: Permission) -> AppResult<()> {
        if self.has_permission(actor, permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Require either the blanket permission, or the own-data permission
    /// together with ownership of the target employee's records.
    pub fn authorize_record(
        &self,
        actor: &Actor,
        permission: Permission,
        own_permission: Permission,
        resource_employee_id: Option<i32>,
    ) -> AppResult<()> {
        if self.has_permission(actor, permission) {
            return Ok(());
        }
        if self.has_permission(actor, own_permission)
            && self.check_resource_ownership(actor, resource_employee_id)
        {
            return Ok(());
        }
        Err(AppError::Forbidden)
    }

    /// All permissions held by the actor, for the profile endpoint.
    pub fn permissions_for(&self, actor: &Actor) -> Vec<Permission> {
        if !actor.is_active {
            return Vec::new();
        }
        let mut permissions: Vec<Permission> = self
            .table
            .get(&actor.role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        permissions.sort_by_key(|p| format!("{:?}", p));
        permissions
    }

    /// Menu visibility flags for the actor.
    pub fn menu_access(&self, actor: &Actor) -> MenuAccess {
        use Permission::*;
        let has = |p| self.has_permission(actor, p);

        MenuAccess {
            dashboard: true,
            employees: has(ReadEmployee) || has(ReadOwnEmployeeData),
            users: has(ReadUser),
            departments: has(ReadDepartment),
            positions: has(ReadPosition),
            salaries: has(ReadSalary) || has(ReadOwnSalary),
            attendances: has(ReadAttendance) || has(ReadOwnAttendance),
            leaves: has(ReadLeave) || has(ReadOwnLeave),
            can_create_employee: has(CreateEmployee),
            can_edit_employee: has(UpdateEmployee),
            can_delete_employee: has(DeleteEmployee),
            can_approve_leave: has(ApproveLeave),
            can_manage_departments: has(UpdateDepartment),
            can_manage_positions: has(UpdatePosition),
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::with_default_roles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: UserRole, employee_id: Option<i32>) -> Actor {
        Actor {
            role,
            employee_id,
            is_active: true,
        }
    }

    #[test]
    fn admin_holds_all_blanket_permissions() {
        let policy = AccessPolicy::with_default_roles();
        let admin = actor(UserRole::Admin, None);

        assert!(policy.has_permission(&admin, Permission::DeleteEmployee));
        assert!(policy.has_permission(&admin, Permission::ApproveLeave));
        assert!(policy.has_permission(&admin, Permission::DeleteUser));
    }

    #[test]
    fn employee_is_limited_to_own_data() {
        let policy = AccessPolicy::with_default_roles();
        let employee = actor(UserRole::Employee, Some(7));

        assert!(policy.has_permission(&employee, Permission::ReadOwnLeave));
        assert!(policy.has_permission(&employee, Permission::ReadDepartment));
        assert!(!policy.has_permission(&employee, Permission::ReadEmployee));
        assert!(!policy.has_permission(&employee, Permission::ApproveLeave));
    }

    #[test]
    fn inactive_user_holds_nothing() {
        let policy = AccessPolicy::with_default_roles();
        let mut admin = actor(UserRole::Admin, None);
        admin.is_active = false;

        assert!(!policy.has_permission(&admin, Permission::ReadUser));
        assert!(policy.permissions_for(&admin).is_empty());
    }

    #[test]
    fn ownership_matrix() {
        let policy = AccessPolicy::with_default_roles();

        let employee = actor(UserRole::Employee, Some(7));
        assert!(policy.check_resource_ownership(&employee, Some(7)));
        assert!(!policy.check_resource_ownership(&employee, Some(8)));
        assert!(!policy.check_resource_ownership(&employee, None));

        let unlinked = actor(UserRole::Employee, None);
        assert!(!policy.check_resource_ownership(&unlinked, Some(7)));
        assert!(!policy.check_resource_ownership(&unlinked, None));

        let manager = actor(UserRole::Manager, None);
        assert!(policy.check_resource_ownership(&manager, Some(8)));
        let admin = actor(UserRole::Admin, None);
        assert!(policy.check_resource_ownership(&admin, None));
    }

    #[test]
    fn authorize_record_combines_permission_and_ownership() {
        let policy = AccessPolicy::with_default_roles();
        let employee = actor(UserRole::Employee, Some(7));

        assert!(policy
            .authorize_record(
                &employee,
                Permission::ReadLeave,
                Permission::ReadOwnLeave,
                Some(7)
            )
            .is_ok());
        assert!(policy
            .authorize_record(
                &employee,
                Permission::ReadLeave,
                Permission::ReadOwnLeave,
                Some(8)
            )
            .is_err());

        let manager = actor(UserRole::Manager, None);
        assert!(policy
            .authorize_record(
                &manager,
                Permission::ReadLeave,
                Permission::ReadOwnLeave,
                Some(8)
            )
            .is_ok());
    }

    #[test]
    fn menu_access_reflects_role() {
        let policy = AccessPolicy::with_default_roles();

        let employee_menu = policy.menu_access(&actor(UserRole::Employee, Some(1)));
        assert!(employee_menu.dashboard);
        assert!(employee_menu.leaves);
        assert!(!employee_menu.users);
        assert!(!employee_menu.can_approve_leave);

        let manager_menu = policy.menu_access(&actor(UserRole::Manager, None));
        assert!(manager_menu.users);
        assert!(manager_menu.can_approve_leave);
        assert!(!manager_menu.can_delete_employee);
    }
}
