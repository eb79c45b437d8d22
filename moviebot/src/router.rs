use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    command::{BotCommand, ParseError},
    genre::Genre,
    metadata::MetadataApi,
    ratings::{RatingStore, Stars, UserId},
    reply,
    video::VideoApi,
};

/// Which credits a person search lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Actor,
    Director,
}

/// Dispatches parsed commands to the metadata and video services and the rating store, producing
/// the text to send back.
///
/// Every failure is turned into a reply for the user who sent the command; nothing here panics or
/// returns an error.
#[derive(Debug)]
pub struct Router<M, V> {
    metadata: M,
    video: V,
    ratings: Arc<RatingStore>,
}

impl<M, V> Router<M, V>
where
    M: MetadataApi,
    V: VideoApi,
{
    /// Create a router over the given services and rating store
    pub fn new(metadata: M, video: V, ratings: Arc<RatingStore>) -> Self {
        Self {
            metadata,
            video,
            ratings,
        }
    }

    /// The rating store shared by this router
    pub fn ratings(&self) -> &Arc<RatingStore> {
        &self.ratings
    }

    /// Handle a free text message by looking for a leading command keyword
    pub async fn handle_text(&self, user: UserId, text: &str) -> String {
        match BotCommand::parse(text) {
            Ok(command) => self.dispatch(user, command).await,
            Err(err) => self.reject(&err),
        }
    }

    /// The reply for input that could not be parsed
    pub fn reject(&self, err: &ParseError) -> String {
        if !matches!(err, ParseError::UnknownCommand(_)) {
            info!(error = %err, "rejected command input");
        }
        reply::parse_error(err)
    }

    /// Run a command on behalf of a user
    #[instrument(skip_all, fields(user = user.0, command = command.kind().name()))]
    pub async fn dispatch(&self, user: UserId, command: BotCommand) -> String {
        match command {
            BotCommand::Start => reply::WELCOME.to_owned(),
            BotCommand::Help => reply::help(),
            BotCommand::Recommend { genre } => self.recommend(genre.as_ref()).await,
            BotCommand::SearchActor { name } => self.search_person(&name, Role::Actor).await,
            BotCommand::SearchDirector { name } => self.search_person(&name, Role::Director).await,
            BotCommand::Trailer { title } => self.trailer(&title).await,
            BotCommand::Rate { title, stars } => self.rate(user, title, stars).await,
            BotCommand::RecommendByRating => match self.ratings.top_rated_for(user).await {
                Some(title) => reply::top_rated(&title),
                None => reply::NO_RATINGS.to_owned(),
            },
        }
    }

    async fn recommend(&self, genre: Option<&Genre>) -> String {
        let movies = match self.metadata.discover_by_genre(genre).await {
            Ok(movies) => movies,
            Err(err) => {
                warn!(error = %err, "movie discovery failed");
                return reply::RECOMMENDATIONS_FAILED.to_owned();
            }
        };
        // Always the first result, no ranking on our side.
        let Some(movie) = movies.into_iter().next() else {
            return reply::NO_RECOMMENDATIONS.to_owned();
        };

        let details = match self.metadata.movie_details(movie.id).await {
            Ok(details) => Some(details),
            Err(err) => {
                warn!(error = %err, movie = %movie.id, "movie details lookup failed");
                None
            }
        };
        let trailer = self.find_trailer(&movie.title).await;
        reply::recommendation(genre, &movie, details.as_ref(), trailer.as_deref())
    }

    async fn search_person(&self, name: &str, role: Role) -> String {
        let person = match self.metadata.search_person(name).await {
            Ok(person) => person,
            Err(err) => {
                warn!(error = %err, person_name = name, "person search failed");
                None
            }
        };
        let Some(person) = person else {
            return match role {
                Role::Actor => reply::ACTOR_NOT_FOUND,
                Role::Director => reply::DIRECTOR_NOT_FOUND,
            }
            .to_owned();
        };

        let credits = match self.metadata.credits_for_person(person).await {
            Ok(credits) => credits,
            Err(err) => {
                warn!(error = %err, %person, "credits lookup failed");
                Default::default()
            }
        };
        match role {
            Role::Actor => {
                let titles = credits.acted_in();
                if titles.is_empty() {
                    reply::no_movies_featuring(name)
                } else {
                    reply::movies_featuring(name, &titles)
                }
            }
            Role::Director => {
                let titles = credits.directed();
                if titles.is_empty() {
                    reply::no_movies_directed_by(name)
                } else {
                    reply::movies_directed_by(name, &titles)
                }
            }
        }
    }

    async fn trailer(&self, title: &str) -> String {
        match self.find_trailer(title).await {
            Some(url) => reply::trailer_found(title, &url),
            None => reply::TRAILER_NOT_FOUND.to_owned(),
        }
    }

    async fn find_trailer(&self, title: &str) -> Option<String> {
        self.video
            .find_trailer(title)
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, title, "trailer search failed");
                None
            })
    }

    async fn rate(&self, user: UserId, title: String, stars: Stars) -> String {
        let message = reply::rating_recorded(&title, stars);
        self.ratings.record(user, title, stars).await;
        message
    }
}
