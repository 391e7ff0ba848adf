mod cli;
mod gui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};

use cli::{Cli, Command, GuiArgs};
use strimly::{
    config::Config,
    error::{Error, ListError},
    session::Session,
    storage::FileStorage,
    stream::Platform,
    twitch,
};

const ENV_LOG: &str = "STRIMLY_LOG";
const ENV_LOG_STYLE: &str = "STRIMLY_LOG_STYLE";

fn main() -> Result<()> {
    Builder::from_env(Env::new().filter_or(ENV_LOG, "info").write_style(ENV_LOG_STYLE)).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if !twitch::is_valid_parent(&config.embed_parent) {
        log::warn!(
            "embed parent {:?} is not localhost or a domain, Twitch players will refuse to load",
            config.embed_parent
        );
    }
    let storage_path = match &cli.storage {
        Some(path) => path.clone(),
        None => config.storage_path()?,
    };
    let storage = FileStorage::open(&storage_path)?;

    let command = cli.command.unwrap_or(Command::Gui(GuiArgs::default()));
    let share_link = match &command {
        Command::Gui(args) => args.share.clone(),
        _ => None,
    };
    let mut session = Session::bootstrap(storage, share_link.as_deref());
    log::debug!("loaded {} streams ({:?})", session.streams().len(), session.origin());

    match command {
        Command::Gui(_) => {
            return gui::run(session, config).map_err(|err| anyhow!("window failed: {err}"));
        }
        Command::Add(args) => match session.add_input(&args.input) {
            Ok(stream) => println!("Added {}", stream.label()),
            Err(Error::List(ListError::DuplicateEntry { .. })) => println!("Stream already added!"),
            Err(err) => return Err(err.into()),
        },
        Command::Remove(args) => {
            let platform = Platform::from(args.platform.as_str());
            if session.remove(&platform, &args.id) {
                println!("Removed {platform}/{}", args.id);
            } else {
                println!("No such stream: {platform}/{}", args.id);
            }
        }
        Command::Move(args) => {
            let from = args.from.checked_sub(1).context("positions start at 1")?;
            let to = args.to.checked_sub(1).context("positions start at 1")?;
            session.move_stream(from, to)?;
        }
        Command::List(args) => {
            let streams = session.streams();
            if args.json {
                println!("{}", streams.serialize_for_persistence());
                return Ok(());
            }
            if streams.is_empty() {
                println!("No streams. Add one with `strimly add <channel or url>`.");
                return Ok(());
            }
            println!("{:<6}  {:<8}  ID", "INDEX", "PLATFORM");
            for (idx, stream) in streams.iter().enumerate() {
                println!("{:<6}  {:<8}  {}", idx + 1, stream.platform, stream.id);
            }
        }
        Command::Share(args) => {
            if args.payload {
                println!("{}", session.share_payload());
            } else {
                println!("{}", session.share_url(&config.share_base_url)?);
            }
        }
        Command::Import(args) => {
            session.import_share_link(&args.link)?;
            println!("Imported {} streams", session.streams().len());
        }
        Command::Embed => {
            for stream in session.streams().iter() {
                println!("{}\t{}", stream.label(), stream.embed_url(&config.embed_parent));
            }
        }
    }

    Ok(())
}
