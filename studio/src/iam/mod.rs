// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod access;
pub mod jwt;
pub mod middleware;
pub(crate) mod types;

pub use access::{CourseAccess, RoleAccess};
pub use jwt::{Claims, JwtError, JwtService};
pub use middleware::{AuthRequest, JwtAuthMiddlewareFactory, RequireLoginMiddleware};
pub use types::User;
