// src/pipeline/options.rs
// =============================================================================
// Raw form values in, typed search options out.
//
// Whatever front end collects the user's input hands us every option as an
// untyped string (think HTML form: a ticked checkbox sends "on", an unticked
// one sends nothing). normalize() is the one place that turns those strings
// into a QueryOptions value. Nothing past this point sees raw strings.
//
// The rule is simple and total:
// - query            -> copied as-is (empty means "nothing submitted")
// - checkbox options -> true iff present and non-empty
// - dates            -> Some(text) iff present and non-empty
// =============================================================================

use std::collections::HashMap;

use serde::Serialize;

use crate::archive::ArchiveQuery;

// Form field names
pub const QUERY: &str = "query";
pub const INCLUDE_SUBDOMAINS: &str = "include_subdomains";
pub const INCLUDE_SUBPAGES: &str = "include_subpages";
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
pub const FILTER_REDIRECTS: &str = "filter_redirects";
pub const FILTER_REVISITS: &str = "filter_revisits";

/// Raw option values keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: HashMap<String, String>,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    // Present and non-empty, the definition of a ticked checkbox
    fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

impl<K, V> FromIterator<(K, V)> for RawForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = RawForm::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

/// The canonical search options for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    pub query: String,
    pub include_subdomains: bool,
    pub include_subpages: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub filter_redirects: bool,
    pub filter_revisits: bool,
}

impl QueryOptions {
    /// An empty query means the user has not submitted anything yet.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    // The request handed to the archive client, field for field
    pub fn to_archive_query(&self) -> ArchiveQuery {
        ArchiveQuery {
            search_term: self.query.clone(),
            include_subpages: self.include_subpages,
            include_subdomains: self.include_subdomains,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            filter_redirects: self.filter_redirects,
            filter_revisits: self.filter_revisits,
        }
    }
}

/// Maps raw form values to typed options. Never fails.
pub fn normalize(form: &RawForm) -> QueryOptions {
    QueryOptions {
        query: form.get(QUERY).unwrap_or_default().to_string(),
        include_subdomains: form.is_set(INCLUDE_SUBDOMAINS),
        include_subpages: form.is_set(INCLUDE_SUBPAGES),
        start_date: form.non_empty(START_DATE),
        end_date: form.non_empty(END_DATE),
        filter_redirects: form.is_set(FILTER_REDIRECTS),
        filter_revisits: form.is_set(FILTER_REVISITS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_example_form() {
        let form: RawForm = [(QUERY, "example.com"), (INCLUDE_SUBPAGES, "on")]
            .into_iter()
            .collect();

        let options = normalize(&form);

        assert_eq!(
            options,
            QueryOptions {
                query: "example.com".to_string(),
                include_subpages: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_normalize_empty_form() {
        let options = normalize(&RawForm::new());
        assert_eq!(options, QueryOptions::default());
        assert!(!options.has_query());
    }

    #[test]
    fn test_checkbox_truthiness() {
        for name in [
            INCLUDE_SUBDOMAINS,
            INCLUDE_SUBPAGES,
            FILTER_REDIRECTS,
            FILTER_REVISITS,
        ] {
            // Any non-empty value counts, even one that reads as "false"
            for value in ["on", "1", "true", "false", "0", " "] {
                let options = normalize(&[(name, value)].into_iter().collect());
                let flags = [
                    options.include_subdomains,
                    options.include_subpages,
                    options.filter_redirects,
                    options.filter_revisits,
                ];
                assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{}={:?}", name, value);
            }

            let options = normalize(&[(name, "")].into_iter().collect());
            assert!(!options.include_subdomains);
            assert!(!options.include_subpages);
            assert!(!options.filter_redirects);
            assert!(!options.filter_revisits);
        }
    }

    #[test]
    fn test_dates_pass_through() {
        let form: RawForm = [(START_DATE, "2019-01-01"), (END_DATE, "")]
            .into_iter()
            .collect();
        let options = normalize(&form);
        assert_eq!(options.start_date.as_deref(), Some("2019-01-01"));
        assert_eq!(options.end_date, None);

        // No parsing: whatever text was typed is kept verbatim
        let form: RawForm = [(END_DATE, "last tuesday")].into_iter().collect();
        assert_eq!(normalize(&form).end_date.as_deref(), Some("last tuesday"));
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let form: RawForm = [(QUERY, " example.com ")].into_iter().collect();
        assert_eq!(normalize(&form).query, " example.com ");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let form: RawForm = [(QUERY, "example.com"), ("diversify", "on")]
            .into_iter()
            .collect();
        let options = normalize(&form);
        assert_eq!(options.query, "example.com");
        assert!(!options.include_subpages);
    }

    #[test]
    fn test_to_archive_query() {
        let options = QueryOptions {
            query: "example.com".to_string(),
            include_subdomains: true,
            include_subpages: false,
            start_date: Some("2019".to_string()),
            end_date: None,
            filter_redirects: false,
            filter_revisits: true,
        };
        let query = options.to_archive_query();
        assert_eq!(query.search_term, "example.com");
        assert!(query.include_subdomains);
        assert!(!query.include_subpages);
        assert_eq!(query.start_date.as_deref(), Some("2019"));
        assert_eq!(query.end_date, None);
        assert!(!query.filter_redirects);
        assert!(query.filter_revisits);
    }
}
