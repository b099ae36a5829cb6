//! Query parameter builder.
//!
//! Operations collect their query parameters here; the executor appends them
//! to the resolved request URL.

use std::fmt::Display;
use url::Url;

/// Ordered collection of query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append every pair to the query string of `url`, form-encoding the values.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            query.append_pair(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;
    use url::Url;

    #[test]
    fn apply_to_encodes_values() {
        let mut params = QueryParams::new();
        params.push("site_id", "site 1&2");

        let mut url = Url::parse("https://vmware.cloud.ibm.com/v1/director_site_password").unwrap();
        params.apply_to(&mut url);

        assert_eq!(url.query(), Some("site_id=site+1%262"));
        assert_eq!(
            url.query_pairs().next().map(|(_, v)| v.into_owned()),
            Some("site 1&2".to_string())
        );
    }

    #[test]
    fn apply_to_leaves_url_untouched_when_empty() {
        let mut url = Url::parse("https://vmware.cloud.ibm.com/v1/vdcs").unwrap();
        QueryParams::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "https://vmware.cloud.ibm.com/v1/vdcs");
    }
}
