//! Option values supplied by the frontend for a single invocation.

use super::catalog::{RmgOption, ValueKind};
use crate::error::{Result, RmgError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    Path(PathBuf),
    TextList(Vec<String>),
    IntegerList(Vec<i64>),
}

impl OptionValue {
    /// Parse a raw command line token according to the option's value kind
    pub fn parse(option: RmgOption, raw: &str) -> Result<Self> {
        let invalid = |reason: &str| RmgError::InvalidOptionValue {
            option,
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        match option.kind() {
            ValueKind::Flag => raw
                .parse::<bool>()
                .map(OptionValue::Flag)
                .map_err(|_| invalid("expected true or false")),
            ValueKind::Integer => raw
                .parse::<i64>()
                .map(OptionValue::Integer)
                .map_err(|_| invalid("expected an integer")),
            ValueKind::Text => Ok(OptionValue::Text(raw.to_string())),
            ValueKind::Path => Ok(OptionValue::Path(PathBuf::from(raw))),
            ValueKind::TextList => Ok(OptionValue::TextList(
                raw.split_whitespace().map(str::to_string).collect(),
            )),
            ValueKind::IntegerList => raw
                .split_whitespace()
                .map(|token| token.parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(OptionValue::IntegerList)
                .map_err(|_| invalid("expected a list of integers")),
        }
    }
}

/// Values keyed by option identity. Ordered so validation reports deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionValues {
    values: BTreeMap<RmgOption, OptionValue>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, option: RmgOption, value: OptionValue) -> &mut Self {
        self.values.insert(option, value);
        self
    }

    pub fn with(mut self, option: RmgOption, value: OptionValue) -> Self {
        self.set(option, value);
        self
    }

    pub fn contains(&self, option: RmgOption) -> bool {
        self.values.contains_key(&option)
    }

    /// Options that carry a value, in catalog order
    pub fn supplied(&self) -> impl Iterator<Item = RmgOption> + '_ {
        self.values.keys().copied()
    }

    pub fn get(&self, option: RmgOption) -> Option<&OptionValue> {
        self.values.get(&option)
    }

    pub fn flag(&self, option: RmgOption) -> bool {
        matches!(self.values.get(&option), Some(OptionValue::Flag(true)))
    }

    pub fn integer(&self, option: RmgOption) -> Option<i64> {
        match self.values.get(&option) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, option: RmgOption) -> Option<&str> {
        match self.values.get(&option) {
            Some(OptionValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn path(&self, option: RmgOption) -> Option<&Path> {
        match self.values.get(&option) {
            Some(OptionValue::Path(value)) => Some(value.as_path()),
            _ => None,
        }
    }

    pub fn text_list(&self, option: RmgOption) -> &[String] {
        match self.values.get(&option) {
            Some(OptionValue::TextList(values)) => values,
            _ => &[],
        }
    }

    pub fn integer_list(&self, option: RmgOption) -> &[i64] {
        match self.values.get(&option) {
            Some(OptionValue::IntegerList(values)) => values,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_kind() {
        assert_eq!(
            OptionValue::parse(RmgOption::TargetPort, "1099").unwrap(),
            OptionValue::Integer(1099)
        );
        assert_eq!(
            OptionValue::parse(RmgOption::ScanPorts, "1090 1098 1099").unwrap(),
            OptionValue::IntegerList(vec![1090, 1098, 1099])
        );
        assert!(matches!(
            OptionValue::parse(RmgOption::TargetPort, "registry"),
            Err(RmgError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn test_typed_accessors() {
        let values = OptionValues::new()
            .with(RmgOption::TargetHost, OptionValue::Text("10.0.0.1".into()))
            .with(RmgOption::ConnSsl, OptionValue::Flag(true))
            .with(RmgOption::Threads, OptionValue::Integer(8));

        assert_eq!(values.text(RmgOption::TargetHost), Some("10.0.0.1"));
        assert!(values.flag(RmgOption::ConnSsl));
        assert!(!values.flag(RmgOption::ConnFollow));
        assert_eq!(values.integer(RmgOption::Threads), Some(8));
        assert!(values.text_list(RmgOption::EnumAction).is_empty());
        assert_eq!(values.supplied().count(), 3);
    }
}
