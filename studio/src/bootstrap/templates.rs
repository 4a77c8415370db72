// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use crate::modulestore::{Category, Item, Location};
use crate::util::write_atomically;
use std::io;
use std::path::Path;

pub const TEMPLATE_ORG: &str = "edx";
pub const TEMPLATE_COURSE: &str = "templates";

const VIDEO_TEMPLATE_DATA: &str =
    r#"<video youtube="0.75:JMD_ifUUfsU,1.0:hI10vDNYz4M,1.25:AKqURZnYqpk,1.50:DYpADpL7jAY"/>"#;

/// Items new course content is cloned from, under `i4x://edx/templates/`.
pub fn default_templates() -> Vec<Item> {
    vec![
        template(Category::Video, "default", "Video", VIDEO_TEMPLATE_DATA),
        template(Category::Html, "Empty", "Empty", ""),
        template(
            Category::Html,
            "Announcement",
            "Announcement",
            "<h2>Announcement</h2><p>Details go here.</p>",
        ),
        template(Category::StaticTab, "Empty", "Empty", ""),
        template(Category::About, "overview", "Overview", "<section class=\"about\"></section>"),
        template(Category::CourseInfo, "Empty", "Empty", "<ol></ol>"),
    ]
}

fn template(category: Category, name: &str, display_name: &str, data: &str) -> Item {
    Item::new(Location::new(TEMPLATE_ORG, TEMPLATE_COURSE, category, name))
        .with_data(data)
        .with_metadata(crate::modulestore::DISPLAY_NAME_KEY, display_name)
}

/// Writes the module store file with the default templates unless it exists.
pub fn ensure_templates(modulestore_file: &Path) -> Result<bool, BootstrapError> {
    if modulestore_file.exists() {
        return Ok(false);
    }

    let items = default_templates();
    let yaml = serde_yaml::to_string(&items).map_err(|err| {
        BootstrapError::Io(io::Error::other(format!(
            "Failed to serialize templates: {}",
            err
        )))
    })?;
    write_atomically(modulestore_file, yaml.as_bytes())?;

    log_action(format!(
        "seeded {} with {} template item(s)",
        modulestore_file.display(),
        items.len()
    ));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulestore::{ModuleStore, YamlModuleStore};
    use crate::subtitles::TimingMap;

    #[test]
    fn templates_cover_every_clone_source() {
        let urls: Vec<String> = default_templates()
            .iter()
            .map(|item| item.location.url())
            .collect();
        assert_eq!(
            urls,
            vec![
                "i4x://edx/templates/video/default",
                "i4x://edx/templates/html/Empty",
                "i4x://edx/templates/html/Announcement",
                "i4x://edx/templates/static_tab/Empty",
                "i4x://edx/templates/about/overview",
                "i4x://edx/templates/course_info/Empty",
            ]
        );
    }

    #[test]
    fn video_template_has_parsable_timing() {
        let video = &default_templates()[0];
        let xml = roxmltree::Document::parse(video.data_text().unwrap()).unwrap();
        let youtube = xml.root_element().attribute("youtube").unwrap();
        assert_eq!(TimingMap::parse(youtube).unwrap().len(), 4);
    }

    #[test]
    fn seeded_file_loads_as_module_store() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("modulestore.yaml");

        assert!(ensure_templates(&path).unwrap());
        assert!(!ensure_templates(&path).unwrap());

        let store = YamlModuleStore::open(path).unwrap();
        let about = Location::parse("i4x://edx/templates/about/overview").unwrap();
        assert_eq!(
            store.get_item(&about).unwrap().display_name(),
            Some("Overview")
        );
    }
}
