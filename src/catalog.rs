//! The fixed set of preview images produced by a run

use std::path::{Component, Path};

use serde::Serialize;

/// One output image: where it goes and the text printed on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSpec<'a> {
    /// Destination, relative to the output root
    pub output_path: &'a str,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub description: &'a str,
}

impl<'a> ImageSpec<'a> {
    pub const fn new(
        output_path: &'a str,
        title: &'a str,
        subtitle: &'a str,
        description: &'a str,
    ) -> Self {
        Self {
            output_path,
            title,
            subtitle,
            description,
        }
    }

    /// True when `output_path` is relative, never climbs out of the root and
    /// names something below it (not the root itself).
    pub fn is_safe_relative(&self) -> bool {
        let mut named = false;
        for component in Path::new(self.output_path).components() {
            match component {
                Component::Normal(_) => named = true,
                Component::CurDir => {}
                _ => return false,
            }
        }
        named
    }
}

/// Every image rendered by a full run, in render order.
pub const CATALOG: &[ImageSpec<'static>] = &[
    ImageSpec::new(
        "og-image.png",
        "MUIN",
        "The First AI-Run Company",
        "Run by AI, for humans",
    ),
    ImageSpec::new(
        "tools/og-image.png",
        "Developer Tools",
        "Free Tools for Developers",
        "No tracking, no BS",
    ),
    ImageSpec::new(
        "tools/cron-explain/og-image.png",
        "Cron Explain",
        "Cron Expression Converter",
        "Convert cron to natural language and back",
    ),
    ImageSpec::new(
        "tools/json-to-types/og-image.png",
        "JSON to Types",
        "Convert JSON to TypeScript, Zod, Python",
        "Generate types from JSON instantly",
    ),
    ImageSpec::new(
        "tools/curl-to-code/og-image.png",
        "curl to Code",
        "Convert curl to Production Code",
        "Python, JavaScript, Go, PHP, Ruby",
    ),
    ImageSpec::new(
        "tools/paste-checker/og-image.png",
        "Paste Checker",
        "Detect Sensitive Data",
        "Check before you paste - 100% client-side",
    ),
    ImageSpec::new(
        "tools/readme-gen/og-image.png",
        "README Generator",
        "Generate README from Package",
        "Auto-generate README.md from package.json",
    ),
    ImageSpec::new(
        "tools/depcheck-lite/og-image.png",
        "Depcheck Lite",
        "Find Unused Dependencies",
        "Lightweight dependency checker",
    ),
    ImageSpec::new(
        "tools/lockcheck/og-image.png",
        "Lockfile Checker",
        "Validate Package Lock Files",
        "Detect lockfile drift and issues",
    ),
    ImageSpec::new(
        "tools/bundlesize/og-image.png",
        "Bundle Size",
        "Check Bundle Size Impact",
        "See how packages affect your bundle",
    ),
];

/// Look up a catalog entry by its output path.
pub fn find(output_path: &str) -> Option<&'static ImageSpec<'static>> {
    CATALOG.iter().find(|s| s.output_path == output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_starts_with_the_company_card() {
        assert_eq!(CATALOG.len(), 10);
        let first = CATALOG[0];
        assert_eq!(first.output_path, "og-image.png");
        assert_eq!(first.title, "MUIN");
        assert_eq!(first.subtitle, "The First AI-Run Company");
        assert_eq!(first.description, "Run by AI, for humans");
    }

    #[test]
    fn output_paths_are_distinct_and_contained() {
        let mut seen = HashSet::new();
        for spec in CATALOG {
            assert!(spec.is_safe_relative(), "unsafe path: {}", spec.output_path);
            assert!(spec.output_path.ends_with(".png"));
            assert!(seen.insert(spec.output_path), "duplicate: {}", spec.output_path);
        }
    }

    #[test]
    fn parent_and_absolute_paths_are_flagged() {
        assert!(!ImageSpec::new("../og.png", "", "", "").is_safe_relative());
        assert!(!ImageSpec::new("/tmp/og.png", "", "", "").is_safe_relative());
        assert!(!ImageSpec::new("", "", "", "").is_safe_relative());
        assert!(!ImageSpec::new(".", "", "", "").is_safe_relative());
        assert!(!ImageSpec::new("./", "", "", "").is_safe_relative());
        assert!(ImageSpec::new("./a/b.png", "", "", "").is_safe_relative());
    }

    #[test]
    fn find_by_output_path() {
        let spec = find("tools/lockcheck/og-image.png").expect("present");
        assert_eq!(spec.title, "Lockfile Checker");
        assert!(find("tools/missing/og-image.png").is_none());
    }

    #[test]
    fn catalog_serializes_to_json() {
        let json = serde_json::to_value(CATALOG[1]).unwrap();
        assert_eq!(json["output_path"], "tools/og-image.png");
        assert_eq!(json["description"], "No tracking, no BS");
    }
}
