// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

use super::jwt::Claims;

/// Caller identity, rebuilt from verified token claims on every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        let username = username.into();
        Self {
            name: username.clone(),
            username,
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|existing| existing == role)
    }
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            name: claims.name,
            roles: claims.roles,
        }
    }
}
