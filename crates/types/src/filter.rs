//! Allow-lists gating which territories and languages get documents.

use std::collections::BTreeSet;

/// A set of upper-cased codes. An empty list allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(BTreeSet<String>);

impl AllowList {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            codes
                .into_iter()
                .map(|code| code.as_ref().trim().to_uppercase())
                .filter(|code| !code.is_empty())
                .collect(),
        )
    }

    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn allows(&self, code: &str) -> bool {
        self.0.is_empty() || self.0.contains(&code.trim().to_uppercase())
    }
}

/// The territory and language gates applied to both rendering and export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub territories: AllowList,
    pub languages: AllowList,
}

impl Filters {
    pub fn new(territories: AllowList, languages: AllowList) -> Self {
        Self { territories, languages }
    }

    pub fn allows(&self, territory: &str, language: &str) -> bool {
        self.territories.allows(territory) && self.languages.allows(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_allows_everything() {
        let list = AllowList::new(Vec::<String>::new());
        assert!(list.is_unrestricted());
        assert!(list.allows("anything"));
    }

    #[test]
    fn blank_entries_do_not_restrict() {
        assert!(AllowList::new(["", "  "]).is_unrestricted());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let list = AllowList::new(["mad"]);
        assert!(list.allows("MAD"));
        assert!(list.allows("mad"));
        assert!(!list.allows("CAT"));
    }

    #[test]
    fn filters_compose() {
        let filters = Filters::new(AllowList::new(["MAD"]), AllowList::allow_all());
        assert!(filters.allows("MAD", "cas"));
        assert!(filters.allows("mad", "eus"));
        assert!(!filters.allows("CAT", "cas"));
    }
}
