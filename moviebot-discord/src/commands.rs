//! Slash command registration and handling
//!
//! Every [`CommandKind`] is registered as a slash command with typed options, so Discord does the
//! argument validation it can (required options, the genre choices, the star range) before the
//! interaction ever reaches us.

use std::collections::HashMap;

use moviebot::{
    genre::MOVIE_GENRES, BotCommand, CommandKind, MetadataApi, ParseError, Router, Stars, VideoApi,
};
use serenity::{
    builder::{CreateApplicationCommand, CreateApplicationCommandOption, CreateApplicationCommands},
    client::Context,
    model::{
        id::GuildId,
        interactions::{
            application_command::{
                ApplicationCommand, ApplicationCommandInteraction,
                ApplicationCommandInteractionDataOption,
            },
            InteractionResponseType,
        },
    },
};
use tracing::debug;

use crate::parsable::{OptionError, ParsableCommandOption};

/// Discord refuses messages longer than this many characters
pub const MESSAGE_LIMIT: usize = 2000;

const GENRE: &str = "genre";
const NAME: &str = "name";
const TITLE: &str = "title";
const STARS: &str = "stars";

/// Set up a single option the way its Rust type asks for
fn describe_option<'a, T: ParsableCommandOption>(
    option: &'a mut CreateApplicationCommandOption,
    name: &str,
    description: &str,
) -> &'a mut CreateApplicationCommandOption {
    option
        .name(name)
        .description(description)
        .kind(T::application_command_option_type())
        .required(T::is_required())
}

/// Fill in the builder for one command
pub fn register(
    kind: CommandKind,
    command: &mut CreateApplicationCommand,
) -> &mut CreateApplicationCommand {
    command.name(kind.name()).description(kind.description());
    match kind {
        CommandKind::Start | CommandKind::Help | CommandKind::RecommendByRating => command,
        CommandKind::Recommend => command.create_option(|option| {
            describe_option::<Option<String>>(option, GENRE, "The genre of movie to recommend");
            for (genre, _) in MOVIE_GENRES {
                option.add_string_choice(genre, genre);
            }
            option
        }),
        CommandKind::SearchActor => command.create_option(|option| {
            describe_option::<String>(option, NAME, "The actor to look up")
        }),
        CommandKind::SearchDirector => command.create_option(|option| {
            describe_option::<String>(option, NAME, "The director to look up")
        }),
        CommandKind::Trailer => command.create_option(|option| {
            describe_option::<String>(option, TITLE, "The movie to find a trailer for")
        }),
        CommandKind::Rate => command
            .create_option(|option| {
                describe_option::<String>(option, TITLE, "The movie you watched")
            })
            .create_option(|option| {
                describe_option::<i64>(option, STARS, "How many stars you give it")
                    .min_int_value(Stars::MIN)
                    .max_int_value(Stars::MAX)
            }),
    }
}

fn register_all(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    for kind in CommandKind::ALL {
        commands.create_application_command(|command| register(kind, command));
    }
    commands
}

/// Register every command, either for a single guild (which takes effect immediately) or
/// globally. Returns how many commands Discord now knows about.
pub async fn register_commands(ctx: &Context, guild_id: Option<GuildId>) -> serenity::Result<usize> {
    let registered = match guild_id {
        Some(guild_id) => guild_id
            .set_application_commands(&ctx.http, register_all)
            .await?
            .len(),
        None => ApplicationCommand::set_global_application_commands(&ctx.http, register_all)
            .await?
            .len(),
    };
    Ok(registered)
}

/// Read a typed option, naming the argument in the error if it is missing or malformed
fn option_value<T: ParsableCommandOption>(
    kind: CommandKind,
    options: &HashMap<&str, &ApplicationCommandInteractionDataOption>,
    name: &'static str,
) -> Result<T, ParseError> {
    T::parse_from(options.get(name).copied()).map_err(|err| match err {
        OptionError::Missing => ParseError::MissingArgument {
            command: kind,
            what: name,
        },
        OptionError::WrongType => ParseError::InvalidArgument {
            command: kind,
            what: name,
        },
    })
}

/// Turn a slash command interaction into a [`BotCommand`]
pub fn parse(command: &ApplicationCommandInteraction) -> Result<BotCommand, ParseError> {
    let kind = CommandKind::from_keyword(&command.data.name)
        .ok_or_else(|| ParseError::UnknownCommand(command.data.name.clone()))?;
    let options: HashMap<&str, &ApplicationCommandInteractionDataOption> = command
        .data
        .options
        .iter()
        .map(|option| (option.name.as_str(), option))
        .collect();

    match kind {
        CommandKind::Start => Ok(BotCommand::Start),
        CommandKind::Help => Ok(BotCommand::Help),
        CommandKind::RecommendByRating => Ok(BotCommand::RecommendByRating),
        CommandKind::Recommend => {
            let genre: Option<String> = option_value(kind, &options, GENRE)?;
            Ok(BotCommand::recommend(genre.as_deref().unwrap_or_default()))
        }
        CommandKind::SearchActor => {
            BotCommand::search_actor(&option_value::<String>(kind, &options, NAME)?)
        }
        CommandKind::SearchDirector => {
            BotCommand::search_director(&option_value::<String>(kind, &options, NAME)?)
        }
        CommandKind::Trailer => BotCommand::trailer(&option_value::<String>(kind, &options, TITLE)?),
        CommandKind::Rate => BotCommand::rate(
            &option_value::<String>(kind, &options, TITLE)?,
            option_value(kind, &options, STARS)?,
        ),
    }
}

/// Answer a slash command.
///
/// The response is deferred first: a recommendation makes three upstream calls, which can take
/// longer than the three seconds Discord waits for an initial response.
pub async fn respond<M, V>(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    router: &Router<M, V>,
) -> serenity::Result<()>
where
    M: MetadataApi,
    V: VideoApi,
{
    command
        .create_interaction_response(&ctx.http, |response| {
            response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
        })
        .await?;

    let user = moviebot::UserId(command.user.id.0);
    let reply = match parse(command) {
        Ok(bot_command) => router.dispatch(user, bot_command).await,
        Err(err) => router.reject(&err),
    };
    debug!(command = %command.data.name, len = reply.len(), "sending reply");

    command
        .edit_original_interaction_response(&ctx.http, |response| {
            response.content(fit_message(&reply))
        })
        .await?;
    Ok(())
}

/// Cut a reply down to [`MESSAGE_LIMIT`] characters, ending it with an ellipsis if anything was
/// dropped
pub fn fit_message(text: &str) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text.to_owned();
    }
    let mut fitted: String = text.chars().take(MESSAGE_LIMIT - 1).collect();
    fitted.push('…');
    fitted
}
