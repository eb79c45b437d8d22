//! The chat-command core of a movie recommendation bot
//!
//! Moviebot turns short chat commands into lookups against [TMDB](https://developer.themoviedb.org/docs)
//! and the [YouTube Data API](https://developers.google.com/youtube/v3) and formats the answers as
//! chat replies. It knows nothing about any particular chat platform: a transport hands it a user
//! id and either a line of text or an already parsed [`BotCommand`], and gets back the text to
//! send.
//!
//! The commands understood are:
//!
//! | Command                      | What it does                                                   |
//! |------------------------------|----------------------------------------------------------------|
//! | `/start`                     | Welcome text                                                   |
//! | `/help`                      | List of commands                                               |
//! | `/recommend [genre]`         | The first movie TMDB discovers (in that genre), with a trailer |
//! | `/search_actor <name>`       | Movies the first matching person acted in                      |
//! | `/search_director <name>`    | Movies the first matching person directed                      |
//! | `/trailer <title>`           | A YouTube link for the movie's trailer                         |
//! | `/rate <title> <stars>`      | Remember a 1-5 star rating for the current user                |
//! | `/recommend_by_rating`       | The current user's highest rated movie                         |
//!
//! Whenever a service returns a list, the first entry is used. There is no ranking.
//!
//! Wiring it up takes three steps:
//! ```no_run
//! # use moviebot::*;
//! # use std::sync::Arc;
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Load the API keys (and optionally a .env file)
//! config::load_dotenv();
//! let config = ServiceConfig::from_env()?;
//!
//! // 2. Build the clients and a router that owns the rating store
//! let http = http::build_client(&config)?;
//! let router = Router::new(
//!     TmdbClient::from_config(http.clone(), &config),
//!     YoutubeClient::from_config(http, &config),
//!     Arc::new(RatingStore::new()),
//! );
//!
//! // 3. Feed it messages from your transport
//! let reply = router.handle_text(UserId(42), "/recommend comedy").await;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```
//!
//! The services sit behind the [`MetadataApi`] and [`VideoApi`] traits, so the router can be driven
//! by anything that implements them, which is how the tests run without a network.

#![warn(missing_docs)]

/// Parsing text and arguments into typed commands
pub mod command;
/// Loading API keys and endpoints from the environment
pub mod config;
/// Error types for the clients and configuration
pub mod error;
/// Genre names and their TMDB ids
pub mod genre;
/// The shared HTTP client
pub mod http;
/// The movie metadata service
pub mod metadata;
/// Per-user movie ratings
pub mod ratings;
pub mod reply;
/// Command dispatch
pub mod router;
/// The video search service
pub mod video;

pub use command::{BotCommand, CommandKind, ParseError};
pub use config::ServiceConfig;
pub use error::{ClientError, ConfigError};
pub use genre::Genre;
pub use metadata::{
    CrewCredit, MetadataApi, MovieDetails, MovieId, MovieSummary, PersonCredits, PersonId,
    TmdbClient,
};
pub use ratings::{RatingEntry, RatingStore, Stars, UserId};
pub use router::Router;
pub use video::{VideoApi, YoutubeClient};
