use thiserror::Error;

use crate::{genre::Genre, ratings::Stars};

/// Every command the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `start`
    Start,
    /// `help`
    Help,
    /// `recommend [genre]`
    Recommend,
    /// `search_actor <name>`
    SearchActor,
    /// `search_director <name>`
    SearchDirector,
    /// `trailer <title>`
    Trailer,
    /// `rate <title> <stars>`
    Rate,
    /// `recommend_by_rating`
    RecommendByRating,
}

impl CommandKind {
    /// All commands, in the order they are listed to users
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::Recommend,
        CommandKind::SearchActor,
        CommandKind::SearchDirector,
        CommandKind::Trailer,
        CommandKind::Rate,
        CommandKind::RecommendByRating,
    ];

    /// The keyword that invokes the command
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::Recommend => "recommend",
            CommandKind::SearchActor => "search_actor",
            CommandKind::SearchDirector => "search_director",
            CommandKind::Trailer => "trailer",
            CommandKind::Rate => "rate",
            CommandKind::RecommendByRating => "recommend_by_rating",
        }
    }

    /// A one line description of the command
    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Start => "Say hello and explain what I can do",
            CommandKind::Help => "List the commands I understand",
            CommandKind::Recommend => "Recommend me a movie, optionally from a genre",
            CommandKind::SearchActor => "List movies featuring an actor",
            CommandKind::SearchDirector => "List movies directed by someone",
            CommandKind::Trailer => "Find the trailer for a movie",
            CommandKind::Rate => "Rate a movie from 1 to 5 stars",
            CommandKind::RecommendByRating => "Recommend a movie based on your ratings",
        }
    }

    /// How to invoke the command
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Start => "/start",
            CommandKind::Help => "/help",
            CommandKind::Recommend => "/recommend [genre]",
            CommandKind::SearchActor => "/search_actor <name>",
            CommandKind::SearchDirector => "/search_director <name>",
            CommandKind::Trailer => "/trailer <title>",
            CommandKind::Rate => "/rate <title> <stars>",
            CommandKind::RecommendByRating => "/recommend_by_rating",
        }
    }

    /// Look a command up by keyword. The match is exact apart from ASCII case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(keyword))
    }
}

/// A fully parsed command, ready to be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Show the welcome text
    Start,
    /// Show the command list
    Help,
    /// Recommend the first discovered movie
    Recommend {
        /// Optional genre filter
        genre: Option<Genre>,
    },
    /// List the movies a person acted in
    SearchActor {
        /// The actor's name
        name: String,
    },
    /// List the movies a person directed
    SearchDirector {
        /// The director's name
        name: String,
    },
    /// Find a trailer
    Trailer {
        /// The movie title
        title: String,
    },
    /// Rate a movie
    Rate {
        /// The movie title
        title: String,
        /// The rating
        stars: Stars,
    },
    /// Recommend the user's own top rated movie
    RecommendByRating,
}

/// An error that occured while trying to parse a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text did not start with a command we know about
    #[error("`{0}` is not a command I know")]
    UnknownCommand(String),
    /// A required argument was missing
    #[error("missing {what}")]
    MissingArgument {
        /// The command being parsed
        command: CommandKind,
        /// The argument that was missing
        what: &'static str,
    },
    /// An argument was present but malformed
    #[error("{what} is malformed")]
    InvalidArgument {
        /// The command being parsed
        command: CommandKind,
        /// The argument that was malformed
        what: &'static str,
    },
    /// The rating was not a whole number
    #[error("`{0}` is not a whole number of stars")]
    InvalidNumber(String),
    /// The rating was outside the accepted range
    #[error("a rating must be between {} and {} stars, not {0}", Stars::MIN, Stars::MAX)]
    RatingOutOfRange(i64),
}

impl ParseError {
    /// The command the error relates to, if it got that far
    pub fn command(&self) -> Option<CommandKind> {
        match self {
            ParseError::UnknownCommand(_) => None,
            ParseError::MissingArgument { command, .. }
            | ParseError::InvalidArgument { command, .. } => Some(*command),
            ParseError::InvalidNumber(_) | ParseError::RatingOutOfRange(_) => {
                Some(CommandKind::Rate)
            }
        }
    }
}

impl BotCommand {
    /// Parse a line of text such as `/rate The Thing 5` or `trailer heat`.
    ///
    /// The leading `/` is optional and the keyword is matched case-insensitively; arguments keep
    /// their case and runs of whitespace between them collapse to a single space.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let (keyword, rest) = match text.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest),
            None => (text, ""),
        };
        let keyword = keyword.strip_prefix('/').unwrap_or(keyword);
        let kind = CommandKind::from_keyword(keyword)
            .ok_or_else(|| ParseError::UnknownCommand(keyword.to_owned()))?;
        Self::from_args(kind, rest)
    }

    /// Build a command of a known kind from its free-form argument text
    pub fn from_args(kind: CommandKind, args: &str) -> Result<Self, ParseError> {
        let words: Vec<&str> = args.split_whitespace().collect();
        match kind {
            CommandKind::Start => Ok(BotCommand::Start),
            CommandKind::Help => Ok(BotCommand::Help),
            CommandKind::RecommendByRating => Ok(BotCommand::RecommendByRating),
            CommandKind::Recommend => Ok(BotCommand::recommend(&words.join(" "))),
            CommandKind::SearchActor => BotCommand::search_actor(&words.join(" ")),
            CommandKind::SearchDirector => BotCommand::search_director(&words.join(" ")),
            CommandKind::Trailer => BotCommand::trailer(&words.join(" ")),
            CommandKind::Rate => {
                let (last, title) = words.split_last().ok_or(ParseError::MissingArgument {
                    command: CommandKind::Rate,
                    what: "a title and a rating",
                })?;
                if title.is_empty() {
                    // A lone word is a title without a rating unless it is a number.
                    let what = if last.parse::<i64>().is_ok() {
                        "a title"
                    } else {
                        "a rating"
                    };
                    return Err(ParseError::MissingArgument {
                        command: CommandKind::Rate,
                        what,
                    });
                }
                let stars = last
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidNumber((*last).to_owned()))?;
                BotCommand::rate(&title.join(" "), stars)
            }
        }
    }

    /// `recommend`, with a blank genre meaning no filter
    pub fn recommend(genre: &str) -> Self {
        BotCommand::Recommend {
            genre: Genre::parse(genre),
        }
    }

    /// `search_actor`, rejecting a blank name
    pub fn search_actor(name: &str) -> Result<Self, ParseError> {
        Ok(BotCommand::SearchActor {
            name: required(CommandKind::SearchActor, "an actor name", name)?,
        })
    }

    /// `search_director`, rejecting a blank name
    pub fn search_director(name: &str) -> Result<Self, ParseError> {
        Ok(BotCommand::SearchDirector {
            name: required(CommandKind::SearchDirector, "a director name", name)?,
        })
    }

    /// `trailer`, rejecting a blank title
    pub fn trailer(title: &str) -> Result<Self, ParseError> {
        Ok(BotCommand::Trailer {
            title: required(CommandKind::Trailer, "a movie title", title)?,
        })
    }

    /// `rate`, rejecting a blank title or an out of range rating
    pub fn rate(title: &str, stars: i64) -> Result<Self, ParseError> {
        let title = required(CommandKind::Rate, "a title", title)?;
        let stars = Stars::new(stars).ok_or(ParseError::RatingOutOfRange(stars))?;
        Ok(BotCommand::Rate { title, stars })
    }

    /// Which kind of command this is
    pub fn kind(&self) -> CommandKind {
        match self {
            BotCommand::Start => CommandKind::Start,
            BotCommand::Help => CommandKind::Help,
            BotCommand::Recommend { .. } => CommandKind::Recommend,
            BotCommand::SearchActor { .. } => CommandKind::SearchActor,
            BotCommand::SearchDirector { .. } => CommandKind::SearchDirector,
            BotCommand::Trailer { .. } => CommandKind::Trailer,
            BotCommand::Rate { .. } => CommandKind::Rate,
            BotCommand::RecommendByRating => CommandKind::RecommendByRating,
        }
    }
}

fn required(command: CommandKind, what: &'static str, value: &str) -> Result<String, ParseError> {
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if value.is_empty() {
        Err(ParseError::MissingArgument { command, what })
    } else {
        Ok(value)
    }
}
