//! Daily index naming
//!
//! Index names take the form `<prefix>:<type>-<yyyy><sep><MM><sep><dd>`,
//! for example `zipkin:span-2024-01-31`.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::core::constants::{DEFAULT_ES_DATE_SEPARATOR, DEFAULT_ES_INDEX};
use crate::utils::time::millis_to_date;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexNameError {
    #[error("date separator must be empty or a single character, got '{0}'")]
    DateSeparator(String),

    #[error("index prefix must not be empty")]
    EmptyPrefix,
}

/// Builds daily index names. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNameFormatter {
    index: String,
    date_separator: Option<char>,
}

impl IndexNameFormatter {
    pub fn builder() -> IndexNameFormatterBuilder {
        IndexNameFormatterBuilder::default()
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn date_separator(&self) -> Option<char> {
        self.date_separator
    }

    /// `<prefix>:` shared by every index this formatter names
    pub fn index_type_prefix(&self) -> String {
        format!("{}:", self.index)
    }

    /// Wildcard pattern matching every daily index of `index_type`
    pub fn format_type(&self, index_type: &str) -> String {
        format!("{}:{}-*", self.index, index_type)
    }

    pub fn format_type_and_timestamp(&self, index_type: &str, epoch_millis: i64) -> String {
        self.format_type_and_date(index_type, millis_to_date(epoch_millis))
    }

    /// One index name per UTC day between `begin_millis` and `end_millis`, inclusive
    pub fn format_type_and_range(
        &self,
        index_type: &str,
        begin_millis: i64,
        end_millis: i64,
    ) -> Vec<String> {
        if end_millis < begin_millis {
            return Vec::new();
        }
        let end = millis_to_date(end_millis);
        let mut day = millis_to_date(begin_millis);
        let mut indices = Vec::new();
        while day <= end {
            indices.push(self.format_type_and_date(index_type, day));
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        indices
    }

    fn format_type_and_date(&self, index_type: &str, date: NaiveDate) -> String {
        let sep = self.date_separator.map(String::from).unwrap_or_default();
        format!(
            "{}:{}-{:04}{sep}{:02}{sep}{:02}",
            self.index,
            index_type,
            date.year(),
            date.month(),
            date.day()
        )
    }
}

impl Default for IndexNameFormatter {
    fn default() -> Self {
        Self {
            index: DEFAULT_ES_INDEX.to_string(),
            date_separator: Some(DEFAULT_ES_DATE_SEPARATOR),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexNameFormatterBuilder {
    index: Option<String>,
    date_separator: Option<String>,
}

impl IndexNameFormatterBuilder {
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Empty string disables the separator; anything longer than one
    /// character is rejected by [`build`](Self::build)
    pub fn date_separator(mut self, separator: impl Into<String>) -> Self {
        self.date_separator = Some(separator.into());
        self
    }

    pub fn build(self) -> Result<IndexNameFormatter, IndexNameError> {
        let index = self
            .index
            .unwrap_or_else(|| DEFAULT_ES_INDEX.to_string());
        if index.is_empty() {
            return Err(IndexNameError::EmptyPrefix);
        }

        let date_separator = match self.date_separator {
            None => Some(DEFAULT_ES_DATE_SEPARATOR),
            Some(sep) => {
                let mut chars = sep.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Some(c),
                    (Some(_), Some(_)) => return Err(IndexNameError::DateSeparator(sep)),
                }
            }
        };

        Ok(IndexNameFormatter {
            index,
            date_separator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MILLIS: i64 = 86_400_000;

    #[test]
    fn test_default_format_at_epoch() {
        let formatter = IndexNameFormatter::builder().build().unwrap();
        assert_eq!(
            formatter.format_type_and_timestamp("span", 0),
            "zipkin:span-1970-01-01"
        );
        assert_eq!(formatter, IndexNameFormatter::default());
    }

    #[test]
    fn test_overriding_prefix() {
        let formatter = IndexNameFormatter::builder()
            .index("zipkin_prod")
            .build()
            .unwrap();
        assert_eq!(
            formatter.format_type_and_timestamp("span", 0),
            "zipkin_prod:span-1970-01-01"
        );
    }

    #[test]
    fn test_overriding_date_separator() {
        let formatter = IndexNameFormatter::builder()
            .date_separator(".")
            .build()
            .unwrap();
        assert_eq!(
            formatter.format_type_and_timestamp("span", 0),
            "zipkin:span-1970.01.01"
        );
    }

    #[test]
    fn test_empty_date_separator() {
        let formatter = IndexNameFormatter::builder()
            .date_separator("")
            .build()
            .unwrap();
        assert_eq!(formatter.date_separator(), None);
        assert_eq!(
            formatter.format_type_and_timestamp("span", 0),
            "zipkin:span-19700101"
        );
    }

    #[test]
    fn test_multi_char_separator_rejected_at_build() {
        let result = IndexNameFormatter::builder()
            .date_separator("blagho")
            .build();
        assert_eq!(
            result,
            Err(IndexNameError::DateSeparator("blagho".to_string()))
        );
    }

    #[test]
    fn test_single_non_ascii_separator_allowed() {
        let formatter = IndexNameFormatter::builder()
            .date_separator("·")
            .build()
            .unwrap();
        assert_eq!(
            formatter.format_type_and_timestamp("span", 0),
            "zipkin:span-1970·01·01"
        );
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let result = IndexNameFormatter::builder().index("").build();
        assert_eq!(result, Err(IndexNameError::EmptyPrefix));
    }

    #[test]
    fn test_format_known_date() {
        let formatter = IndexNameFormatter::default();
        // 2024-02-29 12:00:00 UTC
        assert_eq!(
            formatter.format_type_and_timestamp("dependency", 1_709_208_000_000),
            "zipkin:dependency-2024-02-29"
        );
    }

    #[test]
    fn test_format_type_wildcard() {
        let formatter = IndexNameFormatter::default();
        assert_eq!(formatter.format_type("span"), "zipkin:span-*");
        assert_eq!(formatter.index_type_prefix(), "zipkin:");
    }

    #[test]
    fn test_format_range_one_per_day() {
        let formatter = IndexNameFormatter::default();
        let indices = formatter.format_type_and_range("span", 0, 2 * DAY_MILLIS + 1);
        assert_eq!(
            indices,
            vec![
                "zipkin:span-1970-01-01",
                "zipkin:span-1970-01-02",
                "zipkin:span-1970-01-03",
            ]
        );
    }

    #[test]
    fn test_format_range_same_day() {
        let formatter = IndexNameFormatter::default();
        let indices = formatter.format_type_and_range("span", 10, DAY_MILLIS - 1);
        assert_eq!(indices, vec!["zipkin:span-1970-01-01"]);
    }

    #[test]
    fn test_format_range_reversed_is_empty() {
        let formatter = IndexNameFormatter::default();
        assert!(formatter.format_type_and_range("span", DAY_MILLIS, 0).is_empty());
    }
}
