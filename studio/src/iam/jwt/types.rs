// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token payload. `roles` carries the course groups that
/// `RoleAccess` checks, e.g. `staff_MITx.999`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub enum JwtError {
    Config(String),
    Encode(String),
    Decode(String),
}

impl fmt::Display for JwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtError::Config(msg) => write!(f, "Invalid token settings: {}", msg),
            JwtError::Encode(msg) => write!(f, "Cannot sign token: {}", msg),
            JwtError::Decode(msg) => write!(f, "Rejected token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}
