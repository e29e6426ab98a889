//! Rendering movie lines and splitting long output into chat-sized messages.

use crate::fuzzy::Scored;
use crate::types::{LookupMovie, Movie};

/// Upper bound on a single chat message, in characters.
pub const MESSAGE_LIMIT: usize = 1800;

/// Render one library movie as `   id: Title (year)`, with the fuzzy score
/// appended when the listing came from a search.
pub fn movie_line(movie: &Movie, score: Option<i64>) -> String {
    match score {
        Some(score) => format!(
            "{:>5}: {} ({}) (fuzzy score: {})",
            movie.id, movie.title, movie.year, score
        ),
        None => format!("{:>5}: {} ({})", movie.id, movie.title, movie.year),
    }
}

/// Render one catalog result as `  tmdb-id: Title (year)`.
pub fn lookup_line(movie: &LookupMovie, score: Option<i64>) -> String {
    match score {
        Some(score) => format!(
            "{:>9}: {} ({}) (fuzzy score: {})",
            movie.tmdb_id, movie.title, movie.year, score
        ),
        None => format!("{:>9}: {} ({})", movie.tmdb_id, movie.title, movie.year),
    }
}

/// Render a ranked movie list, one line per entry.
pub fn render_movie_lines(scored: &[Scored<Movie>]) -> String {
    scored
        .iter()
        .map(|s| movie_line(&s.item, Some(s.score)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `text` into messages of at most `limit` characters without breaking
/// a line in two. A single line longer than the limit goes out on its own.
pub fn chunk_lines(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let needed = line.len() + usize::from(!current.is_empty());
        if !current.is_empty() && current.len() + needed > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Human-readable size in decimal units, one decimal place above bytes.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["kB", "MB", "GB", "TB", "PB"];

    if bytes == 1 {
        return "1 Byte".to_string();
    }
    if bytes < 1000 {
        return format!("{bytes} Bytes");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, year: u16) -> Movie {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "year": year,
        }))
        .unwrap()
    }

    #[test]
    fn test_movie_line_padding() {
        let m = movie(7, "Alien", 1979);
        assert_eq!(movie_line(&m, None), "    7: Alien (1979)");
        assert_eq!(
            movie_line(&m, Some(54)),
            "    7: Alien (1979) (fuzzy score: 54)"
        );
    }

    #[test]
    fn test_chunk_lines_respects_limit() {
        let text = (0..100)
            .map(|i| format!("line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");

        let chunks = chunk_lines(&text, 100);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 100);
            assert!(!chunk.starts_with('\n'));
            assert!(!chunk.ends_with('\n'));
        }

        // Nothing lost
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn test_chunk_lines_short_text_is_single_chunk() {
        assert_eq!(chunk_lines("hello\nworld", MESSAGE_LIMIT), vec!["hello\nworld"]);
    }

    #[test]
    fn test_chunk_lines_empty() {
        assert!(chunk_lines("", MESSAGE_LIMIT).is_empty());
    }

    #[test]
    fn test_chunk_lines_overlong_line_goes_out_alone() {
        let long = "x".repeat(50);
        let text = format!("short\n{long}\nshort");
        let chunks = chunk_lines(&text, 20);
        assert_eq!(chunks, vec!["short".to_string(), long, "short".to_string()]);
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 Bytes");
        assert_eq!(human_size(1), "1 Byte");
        assert_eq!(human_size(532), "532 Bytes");
        assert_eq!(human_size(1_500), "1.5 kB");
        assert_eq!(human_size(4_200_000_000), "4.2 GB");
        assert_eq!(human_size(12_000_000_000_000), "12.0 TB");
    }
}
