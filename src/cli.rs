use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "strimly",
    version,
    about = "Multi-stream layout builder for Twitch, Kick and YouTube"
)]
pub struct Cli {
    /// Config file to read instead of the one in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage file to use instead of the configured one.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the stream grid window.
    Gui(GuiArgs),
    /// Add a channel or video (URL or bare name/id).
    Add(AddArgs),
    /// Remove a stream from the layout.
    Remove(RemoveArgs),
    /// Move a stream to another position (positions start at 1).
    Move(MoveArgs),
    /// Print the current layout.
    List(ListArgs),
    /// Print a link that reproduces the current layout.
    Share(ShareArgs),
    /// Replace the current layout with the one in a share link.
    Import(ImportArgs),
    /// Print the player URL of every stream.
    Embed,
}

#[derive(Debug, Args, Default)]
pub struct GuiArgs {
    /// Share link to open with, takes priority over the saved layout.
    #[arg(long)]
    pub share: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub input: String,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// twitch, kick, youtube or any other stored platform name.
    pub platform: String,
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print the persisted JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Print only the encoded payload instead of a full link.
    #[arg(long, default_value_t = false)]
    pub payload: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub link: String,
}
