//! Mapping from fence language tags to formatter parser profiles.
//!
//! A handful of common tags are aliases for a differently named parser (`js` is
//! formatted by `babel`). Every other tag is passed through unchanged as the
//! parser name. Configuration can add or override aliases.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Parser profile handed to the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile {
    pub parser: String,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.parser)
    }
}

/// Resolver from language tags to profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileResolver {
    /// User-defined aliases (override built-ins)
    overrides: HashMap<String, String>,
}

impl ProfileResolver {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Resolve a language tag to the profile used to format it.
    pub fn profile_for(&self, language: &str) -> Profile {
        let parser = self
            .overrides
            .get(language)
            .map(String::as_str)
            .or_else(|| BUILTIN_ALIASES.get(language).copied())
            .unwrap_or(language);
        Profile {
            parser: parser.to_string(),
        }
    }

    /// Whether the formatter can be expected to handle this tag.
    pub fn is_supported(&self, language: &str) -> bool {
        self.overrides.contains_key(language)
            || BUILTIN_ALIASES.contains_key(language)
            || BUILTIN_PARSERS.contains(language)
    }

    /// Every supported tag, sorted.
    pub fn supported_languages(&self) -> Vec<&str> {
        let mut all: BTreeSet<&str> = BUILTIN_PARSERS.iter().copied().collect();
        all.extend(BUILTIN_ALIASES.keys().copied());
        all.extend(self.overrides.keys().map(String::as_str));
        all.into_iter().collect()
    }
}

/// Parser names the formatter accepts directly.
static BUILTIN_PARSERS: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    [
        "acorn",
        "angular",
        "babel",
        "babel-flow",
        "babel-ts",
        "css",
        "espree",
        "flow",
        "glimmer",
        "graphql",
        "html",
        "json",
        "json-stringify",
        "json5",
        "jsonc",
        "less",
        "lwc",
        "markdown",
        "mdx",
        "meriyah",
        "scss",
        "typescript",
        "vue",
        "yaml",
    ]
    .into_iter()
    .collect()
});

/// Tags that are formatted by a differently named parser.
static BUILTIN_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // JavaScript
    m.insert("js", "babel");
    m.insert("javascript", "babel");
    m.insert("jsx", "babel");
    m.insert("mjs", "babel");
    m.insert("cjs", "babel");

    // TypeScript
    m.insert("ts", "typescript");
    m.insert("tsx", "typescript");

    // Data and markup
    m.insert("yml", "yaml");
    m.insert("md", "markdown");
    m.insert("gql", "graphql");
    m.insert("handlebars", "glimmer");
    m.insert("hbs", "glimmer");

    m
});
