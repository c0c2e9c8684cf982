//! This module contains the row and label types shared by the dataset and the classifier.

use std::fmt;

/// A discrete class label.
///
/// Labels read from tabular data become `Integer` when the field parses as an
/// `i64` and `Text` otherwise, so `"1"` and `"1.0"` are distinct labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Class {
    Integer(i64),
    Text(String),
}

impl Class {
    /// Interprets a raw field as a label.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => Class::Integer(value),
            Err(_) => Class::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Integer(value) => write!(f, "{}", value),
            Class::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Class {
    fn from(value: i64) -> Self {
        Class::Integer(value)
    }
}

impl From<&str> for Class {
    fn from(value: &str) -> Self {
        Class::Text(value.to_string())
    }
}

impl From<String> for Class {
    fn from(value: String) -> Self {
        Class::Text(value)
    }
}

/// A single row: a feature vector and, for labelled data, its target class.
///
/// Query-only rows carry no target.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    features: Vec<f64>,
    target: Option<Class>,
}

impl Row {
    pub fn new(features: Vec<f64>, target: Class) -> Self {
        Row { features, target: Some(target) }
    }

    /// A row with no target, used only as a classification query.
    pub fn unlabeled(features: Vec<f64>) -> Self {
        Row { features, target: None }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn target(&self) -> Option<&Class> {
        self.target.as_ref()
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_field_integer_and_text() {
        assert_eq!(Class::from_field("3"), Class::Integer(3));
        assert_eq!(Class::from_field(" -7 "), Class::Integer(-7));
        assert_eq!(Class::from_field("setosa"), Class::Text("setosa".to_string()));
        // Not an integer, so kept verbatim as text.
        assert_eq!(Class::from_field("1.0"), Class::Text("1.0".to_string()));
        assert_ne!(Class::from_field("1"), Class::from_field("1.0"));
    }

    #[test]
    fn test_class_display() {
        assert_eq!(Class::Integer(42).to_string(), "42");
        assert_eq!(Class::from("B").to_string(), "B");
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::new(vec![1.0, 2.0], Class::from("A"));
        assert_eq!(row.features(), &[1.0, 2.0]);
        assert_eq!(row.target(), Some(&Class::from("A")));
        assert_eq!(row.num_features(), 2);

        let query = Row::unlabeled(vec![0.5]);
        assert!(query.target().is_none());
    }
}
