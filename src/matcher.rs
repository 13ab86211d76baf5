//! Fuzzy student lookup.
//!
//! The query is split into tokens; a display name is not. Every token must
//! appear somewhere in the name, so "an" finds "Andrew".

use crate::model::RosterEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    tokens: Vec<String>,
}

fn normalize(text: &str) -> String {
    text.replace(',', "").to_lowercase()
}

impl NameQuery {
    /// Splits on single spaces, so runs of spaces leave empty tokens and an
    /// empty query matches everyone.
    pub fn parse(query: &str) -> Self {
        Self {
            tokens: normalize(query).split(' ').map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, entry: &RosterEntry) -> bool {
        let name = normalize(&entry.name);
        self.tokens.iter().all(|token| name.contains(token.as_str()))
    }

    pub fn filter<I>(&self, entries: I) -> Vec<RosterEntry>
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}
