//! Supported document languages.

/// A language code paired with the column name used in the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl Language {
    pub const CAS: Language = Language { code: "cas", name: "Castellano" };
    pub const CAT: Language = Language { code: "cat", name: "Català" };
    pub const EUS: Language = Language { code: "eus", name: "Euskera" };
    pub const GAL: Language = Language { code: "gal", name: "Galego" };

    pub const ALL: [Language; 4] = [Self::CAS, Self::CAT, Self::EUS, Self::GAL];

    /// Case-insensitive lookup by code.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}
