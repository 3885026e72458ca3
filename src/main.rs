use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use trueshuffle::{cli, config, context::AppContext, error, types::ShuffleAmount, utils, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Save or show the Spotify API credentials
    Credentials(CredentialsOptions),

    /// Run the local callback and action server
    Serve(ServeOptions),

    /// List your playlists
    Playlists,

    /// Queue random tracks from a playlist
    Shuffle(ShuffleOptions),

    /// Skip to the next track
    Skip,

    /// Pause playback
    Pause,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsOptions {
    /// Client id of your Spotify application (32 characters)
    #[clap(long, requires = "client_secret")]
    pub client_id: Option<String>,

    /// Client secret of your Spotify application (32 characters)
    #[clap(long, requires = "client_id")]
    pub client_secret: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Do not open the browser on start
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShuffleOptions {
    /// Id of the playlist to pick from
    pub playlist_id: String,

    /// Number of tracks to queue (1-25)
    #[clap(long, default_value = "1", value_parser = utils::parse_shuffle_amount)]
    pub amount: ShuffleAmount,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let ctx = match AppContext::load(config::Settings::from_env()).await {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => error!("Cannot initialize application: {}", e),
    };

    match cli.command {
        Command::Credentials(opt) => {
            cli::credentials(&ctx, opt.client_id, opt.client_secret).await
        }
        Command::Serve(opt) => cli::serve(ctx, opt.no_browser).await,
        Command::Playlists => cli::playlists(ctx).await,
        Command::Shuffle(opt) => cli::shuffle(ctx, opt.playlist_id, opt.amount).await,
        Command::Skip => cli::skip(ctx).await,
        Command::Pause => cli::pause(ctx).await,
        Command::Completions(_) => {}
    }
}
