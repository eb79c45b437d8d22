use std::fmt;

/// TMDB's movie genres and their ids
pub const MOVIE_GENRES: &[(&str, u32)] = &[
    ("Action", 28),
    ("Adventure", 12),
    ("Animation", 16),
    ("Comedy", 35),
    ("Crime", 80),
    ("Documentary", 99),
    ("Drama", 18),
    ("Family", 10751),
    ("Fantasy", 14),
    ("History", 36),
    ("Horror", 27),
    ("Music", 10402),
    ("Mystery", 9648),
    ("Romance", 10749),
    ("Science Fiction", 878),
    ("TV Movie", 10770),
    ("Thriller", 53),
    ("War", 10752),
    ("Western", 37),
];

const ALIASES: &[(&str, u32)] = &[("sci-fi", 878), ("scifi", 878), ("musical", 10402)];

/// A genre filter for discovery, as the user asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    label: String,
    filter: String,
}

impl Genre {
    /// Interpret user input as a genre.
    ///
    /// Known genre names (case-insensitive) are mapped to their TMDB id, numbers are used as ids
    /// directly and anything else is passed through untouched. Blank input means "no genre".
    pub fn parse(input: &str) -> Option<Self> {
        let label = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if label.is_empty() {
            return None;
        }
        let filter = match lookup_id(&label) {
            Some(id) => id.to_string(),
            None => label.clone(),
        };
        Some(Self { label, filter })
    }

    /// The genre as the user wrote it
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value sent as TMDB's `with_genres` parameter
    pub fn tmdb_filter(&self) -> &str {
        &self.filter
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn lookup_id(name: &str) -> Option<u32> {
    MOVIE_GENRES
        .iter()
        .chain(ALIASES)
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, id)| *id)
}
