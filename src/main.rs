use std::sync::Arc;

use clap::{Parser, Subcommand};

use release_hub::config::{GitHubConfig, ServiceConfig};
use release_hub::logging;
use release_hub::module::catalog::ModuleCatalog;
use release_hub::release::client::GitHubReleaseClient;
use release_hub::release::service::ReleaseNoteService;
use release_hub::release::store::MemoryStore;

#[derive(Parser)]
#[command(name = "release-hub")]
#[command(version, about = "Cached release-notes service for a GitHub repository")]
struct Cli {
    /// Owner of the repository the releases are read from
    #[arg(long, env = "RELEASE_HUB_OWNER")]
    owner: String,

    /// Name of the repository the releases are read from
    #[arg(long, env = "RELEASE_HUB_REPO")]
    repo: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the release collection as JSON
    Releases,
    /// Print the module catalog as JSON
    Modules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ServiceConfig {
        github: GitHubConfig {
            owner: cli.owner,
            repo: cli.repo,
        },
        ..ServiceConfig::default()
    };

    match cli.command.unwrap_or(Command::Releases) {
        Command::Releases => {
            let store = Arc::new(MemoryStore::new(config.cache.ttl()));
            let client = Arc::new(GitHubReleaseClient::default());
            let service = ReleaseNoteService::start(config.github, store, client).await;

            let releases = service.get_releases().await?;
            println!("{}", serde_json::to_string_pretty(&releases)?);
        }
        Command::Modules => {
            let catalog = ModuleCatalog::new(config.module);
            println!("{}", serde_json::to_string_pretty(&catalog.modules_v2())?);
        }
    }

    Ok(())
}
