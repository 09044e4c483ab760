use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spodlcli::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download a playlist as tagged MP3 files
    Download(DownloadOptions),

    /// List the tracks of a playlist without downloading
    Tracks(TracksOptions),

    /// Save or show the Spotify API credentials
    Credentials(CredentialsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Playlist URL or URI (e.g. spotify:playlist:ID or
    /// https://open.spotify.com/playlist/ID)
    pub url: String,

    /// Destination directory; must already exist
    #[clap(long, short, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Playlist URL or URI
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsOptions {
    /// Spotify application client ID
    #[clap(long)]
    pub client_id: Option<String>,

    /// Spotify application client secret
    #[clap(long)]
    pub client_secret: Option<String>,

    /// Show the stored credentials
    #[clap(long)]
    pub show: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Download(opt) => cli::download(opt.url, opt.output).await,
        Command::Tracks(opt) => cli::tracks(opt.url).await,
        Command::Credentials(opt) => {
            cli::credentials(opt.client_id, opt.client_secret, opt.show).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
