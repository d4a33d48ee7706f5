//! CONS3RT CLI - companion for the CONS3RT cloud orchestration platform

use clap::Parser;

mod asset;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod runner;

use cli::{
    AssetCommands, Cli, CloudCommands, CloudspaceCommands, Commands, DeploymentCommands,
    GlobalOptions, ProjectCommands, RunCommands, TeamCommands, UserCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("cons3rt version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Cloud(cmd) => match cmd {
            CloudCommands::List { pagination } => cli::cloud::list(&opts, &pagination).await,
            CloudCommands::Get { id } => cli::cloud::get(&opts, id).await,
            CloudCommands::Register { json } => cli::cloud::register(&opts, &json).await,
            CloudCommands::Delete { id } => cli::cloud::delete(&opts, id).await,
        },
        Commands::Cloudspace(cmd) => match cmd {
            CloudspaceCommands::List {
                cloud_id,
                pagination,
            } => cli::cloudspace::list(&opts, cloud_id, &pagination).await,
            CloudspaceCommands::Get { id } => cli::cloudspace::get(&opts, id).await,
            CloudspaceCommands::Runs {
                id,
                search_type,
                pagination,
            } => cli::cloudspace::runs(&opts, id, search_type, &pagination).await,
            CloudspaceCommands::ReleaseRuns { ids, background } => {
                cli::cloudspace::release_runs(&opts, &ids, background).await
            }
            CloudspaceCommands::DeleteRuns { ids } => {
                cli::cloudspace::delete_runs(&opts, &ids).await
            }
        },
        Commands::Team(cmd) => match cmd {
            TeamCommands::List { pagination } => cli::team::list(&opts, &pagination).await,
            TeamCommands::Get { id } => cli::team::get(&opts, id).await,
        },
        Commands::Project(cmd) => match cmd {
            ProjectCommands::List { pagination } => cli::project::list(&opts, &pagination).await,
            ProjectCommands::Get { id } => cli::project::get(&opts, id).await,
            ProjectCommands::AddUser { id, username } => {
                cli::project::add_user(&opts, id, &username).await
            }
        },
        Commands::Deployment(cmd) => match cmd {
            DeploymentCommands::List { pagination } => {
                cli::deployment::list(&opts, &pagination).await
            }
            DeploymentCommands::Get { id } => cli::deployment::get(&opts, id).await,
            DeploymentCommands::Runs { id } => cli::deployment::runs(&opts, id).await,
        },
        Commands::Run(cmd) => match cmd {
            RunCommands::Get { id } => cli::run::get(&opts, id).await,
            RunCommands::Release { ids } => cli::run::release(&opts, &ids).await,
            RunCommands::Launch {
                deployment_id,
                cloudspace_id,
                name,
                username,
                end_state,
                properties,
            } => {
                cli::run::launch(
                    &opts,
                    deployment_id,
                    cloudspace_id,
                    &name,
                    username.as_deref(),
                    end_state.as_deref(),
                    &properties,
                )
                .await
            }
        },
        Commands::User(cmd) => match cmd {
            UserCommands::List { limit } => cli::user::list(&opts, limit).await,
        },
        Commands::Asset(cmd) => match cmd {
            AssetCommands::Validate { asset_dir } => cli::asset::validate(&asset_dir),
            AssetCommands::Create {
                asset_dir,
                dest_dir,
            } => cli::asset::create(&asset_dir, dest_dir.as_deref()),
            AssetCommands::Import { asset_dir, force } => {
                cli::asset::import(&opts, &asset_dir, force).await
            }
            AssetCommands::Update {
                asset_dir,
                id,
                force,
            } => cli::asset::update(&opts, &asset_dir, id, force).await,
            AssetCommands::State {
                id,
                state,
                category,
            } => cli::asset::state(&opts, category, id, &state).await,
            AssetCommands::Visibility { id, visibility } => {
                cli::asset::visibility(&opts, id, visibility).await
            }
            AssetCommands::Delete { ids } => cli::asset::delete(&opts, &ids).await,
        },
    }
}
