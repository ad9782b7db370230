//! Content kinds and their on-disk conventions.
//!
//! A site carries one directory and one registry file per content kind.
//! The conventions here (`_data/<kind>/` plus `<kind>-registry.yml`) are
//! shared by the filesystem-side reconciler and the HTTP-side resolver so
//! both derive the same paths from the same kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The content file extension, without the dot.
pub const CONTENT_EXTENSION: &str = "yml";

/// A kind of content record, one per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Portfolio projects.
    Projects,
    /// Offered services.
    Services,
}

impl ContentKind {
    /// All kinds, in processing order.
    pub const ALL: [ContentKind; 2] = [ContentKind::Projects, ContentKind::Services];

    /// The top-level key under which the registry lists filenames.
    pub fn key(&self) -> &'static str {
        match self {
            ContentKind::Projects => "projects",
            ContentKind::Services => "services",
        }
    }

    /// Directory name holding this kind's content files.
    pub fn dir_name(&self) -> &'static str {
        self.key()
    }

    /// File name of this kind's registry.
    pub fn registry_file_name(&self) -> String {
        format!("{}-registry.yml", self.key())
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "projects" => Ok(ContentKind::Projects),
            "services" => Ok(ContentKind::Services),
            other => Err(Error::invalid_data(format!(
                "Unknown content kind: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keys() {
        assert_eq!(ContentKind::Projects.key(), "projects");
        assert_eq!(ContentKind::Services.key(), "services");
    }

    #[test]
    fn test_kind_registry_file_name() {
        assert_eq!(
            ContentKind::Projects.registry_file_name(),
            "projects-registry.yml"
        );
        assert_eq!(
            ContentKind::Services.registry_file_name(),
            "services-registry.yml"
        );
    }

    #[test]
    fn test_kind_display_round_trip() {
        for kind in ContentKind::ALL {
            let parsed: ContentKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        let err = "articles".parse::<ContentKind>().unwrap_err();
        assert!(err.to_string().contains("articles"));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&ContentKind::Services).unwrap();
        assert_eq!(json, "\"services\"");
    }
}
