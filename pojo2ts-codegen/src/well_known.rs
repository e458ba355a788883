//! Well-known wrapper types that collapse to TypeScript primitives.
//!
//! Lookup is by simple name. Wrappers missing from the table (`Integer`,
//! `Long`, `String`, ...) reach an entry through a supertype such as
//! `Number` or `CharSequence`.

use crate::typescript::types::{TS_BOOLEAN, TS_NUMBER, TS_STRING};

/// Static table of well-known simple names and their TypeScript names.
pub struct WellKnownTypeTable;

impl WellKnownTypeTable {
    /// Table entries in lookup order.
    pub const ENTRIES: &'static [(&'static str, &'static str)] = &[
        ("Boolean", TS_BOOLEAN),
        ("Float", TS_NUMBER),
        ("Double", TS_NUMBER),
        ("BigDecimal", TS_NUMBER),
        ("Number", TS_NUMBER),
        ("CharSequence", TS_STRING),
        ("Date", TS_STRING),
        ("LocalDateTime", TS_STRING),
        ("LocalDate", TS_STRING),
        ("LocalTime", TS_STRING),
    ];

    /// Looks up a single simple name.
    #[must_use]
    pub fn lookup(simple_name: &str) -> Option<&'static str> {
        Self::ENTRIES
            .iter()
            .find(|(name, _)| *name == simple_name)
            .map(|(_, ts)| *ts)
    }

    /// Returns the mapping of the first candidate present in the table.
    #[must_use]
    pub fn first_match<'n, I>(candidates: I) -> Option<&'static str>
    where
        I: IntoIterator<Item = &'n str>,
    {
        candidates.into_iter().find_map(Self::lookup)
    }
}
