/// TMDB movie genre codes and their display names
///
/// Ids are unique and names are unique, so the table reads both ways.
const GENRES: &[(u64, &str)] = &[
    (27, "Horror"),
    (53, "Thriller"),
    (9648, "Mystery"),
    (18, "Drama"),
    (35, "Comedy"),
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (80, "Crime"),
    (99, "Documentary"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (10402, "Music"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (10752, "War"),
    (37, "Western"),
];

/// Label for ids missing from the table
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Display name for a genre id, or [`UNKNOWN_GENRE`]
pub fn genre_name(id: u64) -> &'static str {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_GENRE)
}

/// Reverse lookup, case-insensitive
pub fn genre_id(name: &str) -> Option<u64> {
    let name = name.trim();
    GENRES
        .iter()
        .find(|(_, genre)| genre.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}

/// Resolves each id to its name, order preserved
pub fn resolve_genre_names(ids: &[u64]) -> Vec<String> {
    ids.iter().map(|id| genre_name(*id).to_string()).collect()
}
