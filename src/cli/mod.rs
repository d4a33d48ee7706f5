//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod asset;
pub mod cloud;
pub mod cloudspace;
pub mod completions;
pub mod context;
pub mod deployment;
pub mod init;
pub mod project;
pub mod run;
pub mod status;
pub mod team;
pub mod user;

pub use args::{
    AssetCategoryArg, GlobalOptions, OutputFormat, PaginationArgs, SearchTypeArg, VisibilityArg,
};
pub use context::CommandContext;

/// CONS3RT CLI - companion for the CONS3RT cloud orchestration platform
#[derive(Parser, Debug)]
#[command(name = "cons3rt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, csv)
    #[arg(
        long,
        global = true,
        env = "CONS3RT_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override the site ReST API base URL
    #[arg(long, global = true, env = "CONS3RT_ENDPOINT", hide_env = true)]
    pub url: Option<String>,

    /// Override the default project
    #[arg(long, global = true, env = "CONS3RT_PROJECT", hide_env = true)]
    pub project: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "CONS3RT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CONS3RT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the CONS3RT configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Manage clouds
    #[command(subcommand)]
    Cloud(CloudCommands),

    /// Manage cloudspaces
    #[command(subcommand)]
    Cloudspace(CloudspaceCommands),

    /// List teams
    #[command(subcommand)]
    Team(TeamCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// List deployments and their runs
    #[command(subcommand)]
    Deployment(DeploymentCommands),

    /// Manage deployment runs
    #[command(subcommand)]
    Run(RunCommands),

    /// List site users
    #[command(subcommand)]
    User(UserCommands),

    /// Validate, package, and import assets
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cloud management subcommands
#[derive(Subcommand, Debug)]
pub enum CloudCommands {
    /// List clouds
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Retrieve one cloud's details
    Get {
        /// Cloud ID
        #[arg(long)]
        id: u64,
    },

    /// Register a cloud from a JSON definition file
    Register {
        /// Path to the cloud definition JSON
        #[arg(long)]
        json: PathBuf,
    },

    /// Delete a cloud
    Delete {
        /// Cloud ID
        #[arg(long)]
        id: u64,
    },
}

/// Cloudspace management subcommands
#[derive(Subcommand, Debug)]
pub enum CloudspaceCommands {
    /// List cloudspaces in a cloud
    List {
        /// Cloud ID
        #[arg(long = "cloud-id")]
        cloud_id: u64,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Retrieve one cloudspace's details
    Get {
        /// Cloudspace ID
        #[arg(long)]
        id: u64,
    },

    /// List deployment runs in a cloudspace
    Runs {
        /// Cloudspace ID
        #[arg(long)]
        id: u64,

        /// Which runs to list
        #[arg(long = "search-type", value_enum, default_value = "all")]
        search_type: SearchTypeArg,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Release all active runs in one or more cloudspaces
    #[command(
        after_help = "EXAMPLES:\n  \
            cons3rt cloudspace release-runs --ids 12\n  \
            cons3rt cloudspace release-runs --ids 12,13,14\n  \
            cons3rt cloudspace release-runs --ids 12 --background"
    )]
    ReleaseRuns {
        /// Cloudspace IDs, comma-separated or repeated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,

        /// Run detached in a background process
        #[arg(long)]
        background: bool,
    },

    /// Delete all inactive runs in one or more cloudspaces
    DeleteRuns {
        /// Cloudspace IDs, comma-separated or repeated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List teams
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Retrieve one team's details
    Get {
        /// Team ID
        #[arg(long)]
        id: u64,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Retrieve one project's details
    Get {
        /// Project ID
        #[arg(long)]
        id: u64,
    },

    /// Add a user to a project
    AddUser {
        /// Project ID
        #[arg(long)]
        id: u64,

        /// Username to add
        #[arg(long)]
        username: String,
    },
}

/// Deployment subcommands
#[derive(Subcommand, Debug)]
pub enum DeploymentCommands {
    /// List deployments
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Retrieve one deployment's details
    Get {
        /// Deployment ID
        #[arg(long)]
        id: u64,
    },

    /// List the runs launched from a deployment
    Runs {
        /// Deployment ID
        #[arg(long)]
        id: u64,
    },
}

/// Deployment run subcommands
#[derive(Subcommand, Debug)]
pub enum RunCommands {
    /// Retrieve one run's details
    Get {
        /// Deployment run ID
        #[arg(long)]
        id: u64,
    },

    /// Release one or more runs
    Release {
        /// Deployment run IDs, comma-separated or repeated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,
    },

    /// Launch a deployment run
    #[command(
        after_help = "EXAMPLES:\n  \
            cons3rt run launch --deployment-id 12 --cloudspace-id 5 --name smoke\n  \
            cons3rt run launch --deployment-id 12 --cloudspace-id 5 --name nightly \\\n      \
                --property logLevel=debug --property region=us-gov-west-1"
    )]
    Launch {
        /// Deployment to launch from
        #[arg(long = "deployment-id")]
        deployment_id: u64,

        /// Target cloudspace
        #[arg(long = "cloudspace-id")]
        cloudspace_id: u64,

        /// Name for the new run
        #[arg(long)]
        name: String,

        /// Username to own the run
        #[arg(long)]
        username: Option<String>,

        /// Desired end state
        #[arg(long = "end-state")]
        end_state: Option<String>,

        /// Custom property as key=value, repeatable
        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List site users
    List {
        /// Maximum users to return (all pages are fetched up to this cap)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
}

/// Asset subcommands
#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// Validate an asset directory's structure
    Validate {
        /// Path to the asset directory
        #[arg(long = "asset-dir")]
        asset_dir: PathBuf,
    },

    /// Validate and package an asset directory into a zip
    Create {
        /// Path to the asset directory
        #[arg(long = "asset-dir")]
        asset_dir: PathBuf,

        /// Destination directory for the zip (defaults to ~/Downloads)
        #[arg(long = "dest-dir")]
        dest_dir: Option<PathBuf>,
    },

    /// Package and import an asset, recording the assigned id
    Import {
        /// Path to the asset directory
        #[arg(long = "asset-dir")]
        asset_dir: PathBuf,

        /// Import even if the packaged content is unchanged
        #[arg(long)]
        force: bool,
    },

    /// Package and update an existing asset's content
    Update {
        /// Path to the asset directory
        #[arg(long = "asset-dir")]
        asset_dir: PathBuf,

        /// Asset ID (defaults to the id recorded in asset_data.yml)
        #[arg(long)]
        id: Option<u64>,

        /// Update even if the packaged content is unchanged
        #[arg(long)]
        force: bool,
    },

    /// Update an asset's lifecycle state
    State {
        /// Asset ID
        #[arg(long)]
        id: u64,

        /// New state (e.g. IN_DEVELOPMENT, CERTIFIED, DEPRECATED)
        #[arg(long)]
        state: String,

        /// Asset category, which selects the API route
        #[arg(long = "asset-type", value_enum, default_value = "software")]
        category: AssetCategoryArg,
    },

    /// Update an asset's visibility
    Visibility {
        /// Asset ID
        #[arg(long)]
        id: u64,

        /// New visibility
        #[arg(long, value_enum)]
        visibility: VisibilityArg,
    },

    /// Delete one or more assets
    Delete {
        /// Asset IDs, comma-separated or repeated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ids_accept_comma_lists() {
        let cli = Cli::parse_from(["cons3rt", "cloudspace", "release-runs", "--ids", "1,2,3"]);
        match cli.command {
            Commands::Cloudspace(CloudspaceCommands::ReleaseRuns { ids, background }) => {
                assert_eq!(ids, vec![1, 2, 3]);
                assert!(!background);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["cons3rt", "cloud", "list", "--format", "json"]);
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
