// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Replaces `target` with `content` via a sibling temp file, fsync and rename.
/// The existing file is left untouched when any step fails.
pub fn write_atomically(target: &Path, content: &[u8]) -> io::Result<()> {
    let parent = target.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", target.display()),
        )
    })?;
    let file_name = target.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", target.display()),
        )
    })?;
    let (mut file, temp_path) = create_temp_file(parent, file_name)?;

    #[cfg(unix)]
    {
        if let Ok(metadata) = std::fs::metadata(target)
            && let Err(err) = std::fs::set_permissions(&temp_path, metadata.permissions())
        {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err);
        }
    }

    if let Err(err) = file.write_all(content).and_then(|_| file.sync_all()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err);
    }
    drop(file);

    if let Err(err) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(err);
    }

    #[cfg(unix)]
    {
        if let Err(err) = File::open(parent).and_then(|dir| dir.sync_all()) {
            log::warn!("Directory sync failed for {}: {}", parent.display(), err);
        }
    }

    Ok(())
}

fn create_temp_file(dir: &Path, file_name: &std::ffi::OsStr) -> io::Result<(File, PathBuf)> {
    const MAX_ATTEMPTS: u32 = 100;
    let base = file_name.to_string_lossy();
    for attempt in 0..MAX_ATTEMPTS {
        let candidate = dir.join(format!(".{}.tmp.{}.{}", base, std::process::id(), attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((file, candidate)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::other(format!(
        "Failed to create temp file for {} after repeated attempts",
        base
    )))
}
