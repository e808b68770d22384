mod config;
mod controller;
mod error;
mod lead;
mod quiz;
mod screens;

use std::sync::Arc;

use controller::{Effect, Intent, State};
use dotenv::dotenv;
use lead::{LeadSink, LogLeads};
use teloxide::{
    dispatching::{
        dialogue::{ErasedStorage, InMemStorage, Storage},
        HandlerExt,
    },
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
    utils::command::BotCommands,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type SessionStorage = Arc<ErasedStorage<State>>;
type Leads = Arc<dyn LeadSink>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
enum Command {
    #[command(description = "iniciar a avaliação")]
    Start,
    #[command(description = "recomeçar do início")]
    Restart,
    #[command(description = "mostrar esta ajuda")]
    Help,
}

#[tokio::main]
async fn main() -> Result<(), error::ConfigError> {
    // `.env` may carry RUST_LOG, so it is read before the logger starts.
    let dotenv_loaded = dotenv().is_ok();
    pretty_env_logger::init();
    if !dotenv_loaded {
        log::warn!("No .env file found, using the process environment");
    }
    log::info!("Starting navigation audit bot...");

    let config = config::Config::from_env()?;
    let bot = Bot::new(config.bot_token);

    // Sessions live in memory only and are gone after a restart.
    let storage: SessionStorage = InMemStorage::<State>::new().erase();
    let leads: Leads = Arc::new(LogLeads);

    let handler = Update::filter_message()
        .enter_dialogue::<Message, ErasedStorage<State>, State>()
        .branch(dptree::entry().filter_command::<Command>().endpoint(command))
        .branch(dptree::endpoint(screen_input));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![storage, leads])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn command(
    bot: Bot,
    dialogue: QuizDialogue,
    leads: Leads,
    state: State,
    msg: Message,
    cmd: Command,
) -> HandlerResult {
    match cmd {
        Command::Start | Command::Restart => {
            apply(bot, dialogue, leads, state, msg.chat.id, Intent::Restart).await
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            Ok(())
        }
    }
}

async fn screen_input(
    bot: Bot,
    dialogue: QuizDialogue,
    leads: Leads,
    state: State,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, screens::TEXT_ONLY_HINT).await?;
        return Ok(());
    };

    let intent = screens::read_intent(&state, text);
    apply(bot, dialogue, leads, state, msg.chat.id, intent).await
}

async fn apply(
    bot: Bot,
    dialogue: QuizDialogue,
    leads: Leads,
    mut state: State,
    chat_id: ChatId,
    intent: Intent,
) -> HandlerResult {
    log::debug!("Chat {}: {:?} on {:?}", chat_id.0, intent, state.screen());
    let effects = state.handle(intent, leads.as_ref());

    // The transition is stored before anything is sent, so a failed send
    // never leaves the chat behind its session.
    dialogue.update(state.clone()).await?;

    for effect in effects {
        match effect {
            Effect::Render => send_view(&bot, chat_id, screens::render(&state)).await?,
            Effect::Prompt(field) => send_view(&bot, chat_id, screens::prompt(field)).await?,
            Effect::Hint(text) => {
                bot.send_message(chat_id, text).await?;
            }
            // Notifications and the call card are fire-and-forget.
            Effect::Notify(notification) => {
                if let Err(err) = bot
                    .send_message(chat_id, screens::notification(&notification))
                    .parse_mode(ParseMode::Html)
                    .await
                {
                    log::warn!("Chat {}: notification not delivered: {}", chat_id.0, err);
                }
            }
            Effect::PlaceCall(target) => {
                if let Err(err) = bot
                    .send_contact(chat_id, target.phone_number, target.name)
                    .await
                {
                    log::warn!("Chat {}: call card not delivered: {}", chat_id.0, err);
                }
            }
        }
    }
    Ok(())
}

async fn send_view(bot: &Bot, chat_id: ChatId, view: screens::View) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(
        view.keyboard
            .into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    );
    bot.send_message(chat_id, view.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}
