//! The content record type and its YAML parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use loam_core::{Error, Result};

/// Sort position assigned to records that carry no `order` field.
pub const DEFAULT_ORDER: i64 = 999;

/// One structured unit of page content, sourced from one YAML file.
///
/// Recognized fields are typed; any other top-level field is preserved in
/// [`extra`](Self::extra) so authors can add fields the renderer does not
/// know about yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Display title. Required: a record without a title is invalid.
    pub title: String,

    /// Body or teaser text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Sort position, ascending. Absent sorts as [`DEFAULT_ORDER`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Whether the record is visually highlighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    /// Call-to-action label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    /// Call-to-action target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,

    /// Ordered tag strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Ordered feature entries, plain or structured.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,

    /// Unrecognized top-level fields, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One feature entry of a record.
///
/// Authors write either a bare string, an `{icon, text}` pair, or an
/// `{icon, title, description}` object; all three forms appear in real
/// content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feature {
    /// `- icon: fas fa-bolt` / `text: Fast turnaround`
    Iconed {
        /// Icon class name.
        icon: String,
        /// Short label.
        text: String,
    },
    /// `- icon: ...` / `title: ...` / `description: ...`
    Detailed {
        /// Icon class name.
        icon: String,
        /// Feature heading.
        title: String,
        /// Feature body text.
        description: String,
    },
    /// `- "Panel upgrades"`
    Plain(String),
}

impl ContentRecord {
    /// Parse a record from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] when the document is not valid YAML
    /// or lacks a `title`, and [`Error::InvalidData`] when the title is
    /// present but empty. Both mean the record must not be rendered.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let record: ContentRecord = serde_yaml::from_str(text)
            .map_err(|e| Error::serialization(format!("content record: {e}")))?;

        if record.title.trim().is_empty() {
            return Err(Error::invalid_data("content record has an empty title"));
        }

        Ok(record)
    }

    /// The position this record sorts at.
    pub fn sort_order(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }

    /// Whether the record is marked featured.
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

/// Sort records by `order` ascending, [`DEFAULT_ORDER`] for absent values.
///
/// The sort is stable: records with equal order keep their encounter order.
pub fn sort_by_order(records: &mut [ContentRecord]) {
    records.sort_by_key(ContentRecord::sort_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_titled(title: &str, order: Option<i64>) -> ContentRecord {
        ContentRecord {
            title: title.into(),
            description: None,
            image: None,
            order,
            featured: None,
            button_text: None,
            button_link: None,
            tags: Vec::new(),
            features: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_from_yaml_full_record() {
        let text = r##"
title: Commercial Electrical
description: Full-service commercial work.
image: /images/commercial.jpg
order: 2
featured: true
button_text: Get Quote
button_link: "#contact"
tags:
  - commercial
  - lighting
features:
  - Panel upgrades
  - icon: fas fa-bolt
    text: Fast turnaround
"##;
        let record = ContentRecord::from_yaml(text).unwrap();
        assert_eq!(record.title, "Commercial Electrical");
        assert_eq!(record.order, Some(2));
        assert!(record.is_featured());
        assert_eq!(record.tags, vec!["commercial", "lighting"]);
        assert_eq!(record.features.len(), 2);
        assert_eq!(record.features[0], Feature::Plain("Panel upgrades".into()));
        assert_eq!(
            record.features[1],
            Feature::Iconed {
                icon: "fas fa-bolt".into(),
                text: "Fast turnaround".into(),
            }
        );
    }

    #[test]
    fn test_from_yaml_minimal_record() {
        let record = ContentRecord::from_yaml("title: Solar Installation\n").unwrap();
        assert_eq!(record.title, "Solar Installation");
        assert_eq!(record.order, None);
        assert_eq!(record.sort_order(), DEFAULT_ORDER);
        assert!(!record.is_featured());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_from_yaml_missing_title_rejected() {
        let err = ContentRecord::from_yaml("description: no title here\n").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_yaml_empty_title_rejected() {
        let err = ContentRecord::from_yaml("title: \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_from_yaml_not_yaml_rejected() {
        assert!(ContentRecord::from_yaml("{ not yaml ][").is_err());
    }

    #[test]
    fn test_detailed_feature_form() {
        let text = r#"
title: About
features:
  - icon: fas fa-award
    title: Licensed
    description: CSLB licensed and insured.
"#;
        let record = ContentRecord::from_yaml(text).unwrap();
        assert_eq!(
            record.features[0],
            Feature::Detailed {
                icon: "fas fa-award".into(),
                title: "Licensed".into(),
                description: "CSLB licensed and insured.".into(),
            }
        );
    }

    #[test]
    fn test_extra_fields_preserved() {
        let text = "title: Hero\nbadge: Family Owned\nyears: 25\n";
        let record = ContentRecord::from_yaml(text).unwrap();
        assert_eq!(
            record.extra.get("badge"),
            Some(&serde_yaml::Value::String("Family Owned".into()))
        );
        assert!(record.extra.contains_key("years"));
    }

    #[test]
    fn test_sort_by_order_default_last() {
        // order [5, none, 1] must resolve as 1, 5, none(999)
        let mut records = vec![
            record_titled("five", Some(5)),
            record_titled("none", None),
            record_titled("one", Some(1)),
        ];
        sort_by_order(&mut records);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "five", "none"]);
    }

    #[test]
    fn test_sort_by_order_stable_for_ties() {
        let mut records = vec![
            record_titled("first", None),
            record_titled("second", None),
            record_titled("third", Some(1)),
        ];
        sort_by_order(&mut records);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_yaml_round_trip() {
        let original = ContentRecord::from_yaml(
            "title: Generators\norder: 3\ntags:\n  - backup\n",
        )
        .unwrap();
        let text = serde_yaml::to_string(&original).unwrap();
        let reparsed = ContentRecord::from_yaml(&text).unwrap();
        assert_eq!(original, reparsed);
    }
}
