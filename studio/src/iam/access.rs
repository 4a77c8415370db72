// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::User;
use crate::modulestore::Location;

pub const ADMIN_ROLE: &str = "admin";

/// Decides whether a user may edit the course a location belongs to.
pub trait CourseAccess: Send + Sync {
    fn has_access(&self, user: &User, location: &Location) -> bool;
}

/// Grants access to `admin` and to the course's `staff_{org}.{course}` and
/// `instructor_{org}.{course}` groups.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleAccess;

impl RoleAccess {
    pub fn staff_role(location: &Location) -> String {
        format!("staff_{}", location.course_id())
    }

    pub fn instructor_role(location: &Location) -> String {
        format!("instructor_{}", location.course_id())
    }
}

impl CourseAccess for RoleAccess {
    fn has_access(&self, user: &User, location: &Location) -> bool {
        user.has_role(ADMIN_ROLE)
            || user.has_role(&Self::staff_role(location))
            || user.has_role(&Self::instructor_role(location))
    }
}
