//! Label ↔ index bijection for one categorical field

use crate::dataset::FlowField;
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// Dense index over the distinct labels of a categorical field
///
/// Labels are indexed in sorted order so the layout does not depend on the
/// order rows arrive in. Cardinality is fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVocabulary {
    field: FlowField,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryVocabulary {
    /// Build from every label observed for the field
    pub fn fit<'a, I>(field: FlowField, labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = labels.into_iter().collect();
        let labels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let index = labels.iter().enumerate().map(|(i, l)| (l.clone(), i)).collect();
        Self { field, labels, index }
    }

    pub fn field(&self) -> FlowField {
        self.field
    }

    /// Number of distinct labels, which is also the one-hot width
    pub fn cardinality(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of a label, or `UnknownCategory` if it was never seen
    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.index.get(label).copied().ok_or_else(|| Error::UnknownCategory {
            field: self.field.column().to_string(),
            label: label.to_string(),
        })
    }

    /// Label at an index
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }
}
