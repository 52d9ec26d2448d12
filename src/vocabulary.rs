/// Named variables a rule may reference, matched case-insensitively.
///
/// Single ASCII letters are always accepted as ad hoc variables on top of these
/// names, so short test rules such as `A + B < 2` need no vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    names: Vec<String>,
}

pub const DEFAULT_VARIABLES: [&str; 6] = [
    "followers_count",
    "following_count",
    "tweet_count",
    "days",
    "favourites_count",
    "media_count",
];

impl Vocabulary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary { names: names.into_iter().map(Into::into).collect() }
    }

    /// Returns the vocabulary's spelling of `word`, if it names a variable.
    pub fn canonical(&self, word: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(word))
            .map(String::as_str)
    }

    /// Resolves a scanned word to a variable name, including the single-letter fallback.
    pub fn resolve<'a>(&'a self, word: &'a str) -> Option<&'a str> {
        if let Some(name) = self.canonical(word) {
            return Some(name);
        }
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(word),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::new(DEFAULT_VARIABLES)
    }
}
