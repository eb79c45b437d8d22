use std::sync::Arc;

use anyhow::Context as _;
use moviebot::{http, RatingStore, Router, TmdbClient, YoutubeClient};
use serenity::{
    async_trait,
    client::{Context, EventHandler},
    model::{
        channel::Message,
        id::{GuildId, UserId},
        interactions::Interaction,
        prelude::Ready,
    },
    prelude::{GatewayIntents, TypeMapKey},
    Client,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod parsable;

use config::BotConfig;

type MovieRouter = Router<TmdbClient, YoutubeClient>;

struct Movies;
impl TypeMapKey for Movies {
    type Value = Arc<MovieRouter>;
}

async fn movie_router(ctx: &Context) -> Option<Arc<MovieRouter>> {
    let router = ctx.data.read().await.get::<Movies>().cloned();
    if router.is_none() {
        error!("movie router missing from the client data");
    }
    router
}

/// Remove mentions of the bot from a guild message, leaving the command text
fn strip_mention(content: &str, bot: UserId) -> String {
    content
        .replace(&format!("<@{}>", bot.0), " ")
        .replace(&format!("<@!{}>", bot.0), " ")
        .trim()
        .to_owned()
}

struct Handler {
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let router = match movie_router(&ctx).await {
                Some(router) => router,
                None => return,
            };
            if let Err(why) = commands::respond(&ctx, &command, &router).await {
                error!(command = %command.data.name, error = %why, "failed to answer command");
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        // In a guild, only messages addressed to the bot are commands.
        let text = if msg.guild_id.is_none() {
            msg.content.trim().to_owned()
        } else {
            let bot = ctx.cache.current_user_id();
            if !msg.mentions_user_id(bot) {
                return;
            }
            strip_mention(&msg.content, bot)
        };

        let router = match movie_router(&ctx).await {
            Some(router) => router,
            None => return,
        };
        let reply = router
            .handle_text(moviebot::UserId(msg.author.id.0), &text)
            .await;
        if let Err(why) = msg.reply(&ctx.http, commands::fit_message(&reply)).await {
            warn!(channel = %msg.channel_id, error = %why, "failed to send reply");
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected");
        match commands::register_commands(&ctx, self.guild_id).await {
            Ok(count) => match self.guild_id {
                Some(guild_id) => info!(count, guild = %guild_id, "registered commands for guild"),
                None => info!(count, "registered commands globally"),
            },
            Err(why) => error!(error = %why, "unable to register commands"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    moviebot::config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env().context("invalid configuration")?;
    info!(?config, "starting");

    let http = http::build_client(&config.services).context("building the HTTP client")?;
    let router = Router::new(
        TmdbClient::from_config(http.clone(), &config.services),
        YoutubeClient::from_config(http, &config.services),
        Arc::new(RatingStore::new()),
    );

    let intents =
        GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler {
            guild_id: config.guild_id,
        })
        .application_id(config.application_id)
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<Movies>(Arc::new(router));
    }

    client.start().await.context("Discord client stopped")?;
    Ok(())
}
