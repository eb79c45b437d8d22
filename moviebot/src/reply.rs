//! Every piece of text the bot sends back

use crate::{
    command::{CommandKind, ParseError},
    genre::Genre,
    metadata::{MovieDetails, MovieSummary},
    ratings::Stars,
};

/// Reply to `/start`
pub const WELCOME: &str = "Welcome to Movie/TV Show Recommendation Bot! You can ask for recommendations by genre, actors, directors, or titles. You can also search for a specific movie trailer using /trailer <movie_title>.";
/// Discovery succeeded but returned nothing
pub const NO_RECOMMENDATIONS: &str = "Sorry, couldn't find any recommendations for the given genre.";
/// Discovery failed upstream
pub const RECOMMENDATIONS_FAILED: &str = "Failed to fetch recommendations. Please try again later.";
/// No person matched an actor search
pub const ACTOR_NOT_FOUND: &str = "Actor not found.";
/// No person matched a director search
pub const DIRECTOR_NOT_FOUND: &str = "Director not found.";
/// No trailer could be found
pub const TRAILER_NOT_FOUND: &str = "Trailer not found.";
/// `/recommend_by_rating` before any `/rate`
pub const NO_RATINGS: &str = "You haven't rated any movies yet.";
/// Free text that was not a command
pub const NOT_UNDERSTOOD: &str = "Sorry, I couldn't understand your request.";

/// The full recommendation message
pub fn recommendation(
    genre: Option<&Genre>,
    movie: &MovieSummary,
    details: Option<&MovieDetails>,
    trailer: Option<&str>,
) -> String {
    let mut message = match genre {
        Some(genre) => format!("Recommendation for genre {}:\n", genre),
        None => "Recommendation:\n".to_owned(),
    };
    message.push_str(&format!("Title: {}\n", movie.title));
    if let Some(details) = details {
        message.push_str(&format!("\n{}\n", details_block(details)));
    }
    message.push_str(&format!("Trailer: {}", trailer.unwrap_or("not available")));
    message
}

/// The bold overview / release date / runtime / genres block
pub fn details_block(details: &MovieDetails) -> String {
    let or_unknown = |value: Option<&str>| value.unwrap_or("unknown").to_owned();
    format!(
        "**Overview:** {}\n**Release Date:** {}\n**Runtime:** {}\n**Genres:** {}",
        or_unknown(details.overview.as_deref()),
        or_unknown(details.release_date.as_deref()),
        details
            .runtime_minutes
            .map(|minutes| format!("{} minutes", minutes))
            .unwrap_or_else(|| "unknown".to_owned()),
        if details.genre_names.is_empty() {
            "unknown".to_owned()
        } else {
            details.genres()
        },
    )
}

/// `Movies featuring X:` followed by one line per title
pub fn movies_featuring(name: &str, titles: &[String]) -> String {
    title_list(&format!("Movies featuring {}:", name), titles)
}

/// `Movies directed by X:` followed by one line per title
pub fn movies_directed_by(name: &str, titles: &[String]) -> String {
    title_list(&format!("Movies directed by {}:", name), titles)
}

fn title_list(heading: &str, titles: &[String]) -> String {
    let mut message = format!("{}\n", heading);
    for title in titles {
        message.push_str(&format!("- {}\n", title));
    }
    message
}

/// The person was found but has no acting credits
pub fn no_movies_featuring(name: &str) -> String {
    format!("No movies found featuring {}.", name)
}

/// The person was found but has no directing credits
pub fn no_movies_directed_by(name: &str) -> String {
    format!("No movies found directed by {}.", name)
}

/// A trailer was found
pub fn trailer_found(title: &str, url: &str) -> String {
    format!("Trailer for '{}': {}", title, url)
}

/// A rating was recorded
pub fn rating_recorded(title: &str, stars: Stars) -> String {
    format!("Thank you for rating {} as {} stars.", title, stars)
}

/// The user's top rated title
pub fn top_rated(title: &str) -> String {
    format!("Based on your ratings, you might like: {}", title)
}

/// The command list
pub fn help() -> String {
    let mut message = "Here's what I can do:\n".to_owned();
    for kind in CommandKind::ALL {
        message.push_str(&format!("`{}` - {}\n", kind.usage(), kind.description()));
    }
    message
}

/// Explain why a command could not be parsed
pub fn parse_error(err: &ParseError) -> String {
    match err {
        ParseError::UnknownCommand(_) => NOT_UNDERSTOOD.to_owned(),
        _ => match err.command() {
            Some(command) => format!("Invalid input: {}. Usage: `{}`", err, command.usage()),
            None => format!("Invalid input: {}.", err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MovieId;

    fn heat() -> MovieSummary {
        MovieSummary {
            id: MovieId(949),
            title: "Heat".to_owned(),
        }
    }

    #[test]
    fn recommendation_with_everything() {
        let details = MovieDetails {
            overview: Some("A heist.".to_owned()),
            release_date: Some("1995-12-15".to_owned()),
            runtime_minutes: Some(170),
            genre_names: vec!["Action".to_owned(), "Crime".to_owned()],
        };
        let genre = Genre::parse("action").unwrap();
        assert_eq!(
            recommendation(Some(&genre), &heat(), Some(&details), Some("https://youtu.be/x")),
            "Recommendation for genre action:\nTitle: Heat\n\n\
             **Overview:** A heist.\n**Release Date:** 1995-12-15\n**Runtime:** 170 minutes\n**Genres:** Action, Crime\n\
             Trailer: https://youtu.be/x"
        );
    }

    #[test]
    fn recommendation_without_extras() {
        assert_eq!(
            recommendation(None, &heat(), None, None),
            "Recommendation:\nTitle: Heat\nTrailer: not available"
        );
    }

    #[test]
    fn missing_details_render_as_unknown() {
        let block = details_block(&MovieDetails::default());
        assert_eq!(
            block,
            "**Overview:** unknown\n**Release Date:** unknown\n**Runtime:** unknown\n**Genres:** unknown"
        );
    }

    #[test]
    fn parse_errors_carry_usage() {
        let err = ParseError::RatingOutOfRange(9);
        assert_eq!(
            parse_error(&err),
            "Invalid input: a rating must be between 1 and 5 stars, not 9. Usage: `/rate <title> <stars>`"
        );
        assert_eq!(parse_error(&ParseError::UnknownCommand("x".into())), NOT_UNDERSTOOD);
    }

    #[test]
    fn help_lists_every_command() {
        let text = help();
        for kind in CommandKind::ALL {
            assert!(text.contains(kind.usage()));
        }
    }
}
