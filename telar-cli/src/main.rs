use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use telar_core::{observability, Pattern, Platform};

mod banner;
mod commands;
mod session;

#[derive(Parser)]
#[command(name = "telar")]
#[command(about = "Slice topology editor for virtual infrastructure", long_about = None)]
#[command(version)]
struct Cli {
    /// Session file to operate on (default: ~/.telar/session.json)
    #[arg(long, global = true, value_name = "PATH")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage VMs in the topology
    #[command(subcommand)]
    Vm(VmCommands),

    /// Connect two VMs with a link
    Connect {
        /// Names of exactly two VMs
        vms: Vec<String>,
    },

    /// Remove the link between two VMs
    Disconnect {
        /// First endpoint
        a: String,

        /// Second endpoint
        b: String,
    },

    /// Replace the topology with a generated pattern
    Apply {
        /// Pattern name (omit to list the available patterns)
        pattern: Option<Pattern>,

        /// VM count, or levels for the tree pattern
        size: Option<u32>,
    },

    /// Show the editing session
    Status,

    /// Set the slice name
    Name {
        /// New slice name
        name: String,
    },

    /// Set the deployment platform
    Platform {
        /// Target platform (linux, openstack, aws)
        platform: Platform,
    },

    /// Save the slice to the provisioning service
    Save,

    /// Deploy the saved slice
    Deploy,

    /// Export the topology to a JSON file
    Export {
        /// Output path (default: derived from the slice name)
        path: Option<PathBuf>,
    },

    /// Import a topology from a JSON file
    Import {
        /// Export file to read
        path: PathBuf,
    },

    /// Reset the editing session
    Clear,

    /// Work with slices on the provisioning service
    #[command(subcommand)]
    Slices(SliceCommands),

    /// List the image catalog
    Images {
        /// Re-fetch the catalog even when cached
        #[arg(long)]
        refresh: bool,
    },

    /// Show the provisioning log feed
    Logs,
}

#[derive(Subcommand)]
enum VmCommands {
    /// Add a VM to the topology
    Add {
        /// VM name (default: next sequential VM{n})
        name: Option<String>,

        /// Virtual CPU count
        #[arg(long, default_value = "1")]
        cpu: u32,

        /// Memory in MB, in steps of 256
        #[arg(long, default_value = "256")]
        ram: u32,

        /// Disk size in GB
        #[arg(long, default_value = "2")]
        disk: u32,

        /// Catalog image id (default: first catalog entry)
        #[arg(long)]
        image: Option<i64>,
    },

    /// Edit a VM, optionally renaming it
    Edit {
        /// VM to edit
        name: String,

        /// New name (links follow the rename)
        #[arg(long)]
        rename: Option<String>,

        /// Virtual CPU count
        #[arg(long)]
        cpu: Option<u32>,

        /// Memory in MB, in steps of 256
        #[arg(long)]
        ram: Option<u32>,

        /// Disk size in GB
        #[arg(long)]
        disk: Option<u32>,

        /// Catalog image id
        #[arg(long)]
        image: Option<i64>,
    },

    /// Remove VMs and every link touching them
    Rm {
        /// VMs to remove
        names: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SliceCommands {
    /// List slices on the provisioning service
    List,

    /// Load a slice into the editing session
    Edit {
        /// Slice id
        id: i64,
    },

    /// Delete a slice on the provisioning service
    Rm {
        /// Slice id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    observability::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        banner::failure(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let session = cli.session;

    match cli.command {
        Commands::Vm(vm_cmd) => match vm_cmd {
            VmCommands::Add { name, cpu, ram, disk, image } => {
                commands::vm::add(session, name, cpu, ram, disk, image).await?;
            }

            VmCommands::Edit { name, rename, cpu, ram, disk, image } => {
                commands::vm::edit(session, &name, rename, cpu, ram, disk, image).await?;
            }

            VmCommands::Rm { names } => {
                commands::vm::rm(session, names)?;
            }
        },

        Commands::Connect { vms } => {
            commands::link::connect(session, vms)?;
        }

        Commands::Disconnect { a, b } => {
            commands::link::disconnect(session, &a, &b)?;
        }

        Commands::Apply { pattern, size } => {
            commands::apply::apply(session, pattern, size).await?;
        }

        Commands::Status => {
            commands::show::status(session)?;
        }

        Commands::Name { name } => {
            commands::show::set_name(session, &name)?;
        }

        Commands::Platform { platform } => {
            commands::show::set_platform(session, platform)?;
        }

        Commands::Save => {
            commands::save::save(session).await?;
        }

        Commands::Deploy => {
            commands::deploy::deploy(session).await?;
        }

        Commands::Export { path } => {
            commands::transfer::export(session, path)?;
        }

        Commands::Import { path } => {
            commands::transfer::import(session, &path)?;
        }

        Commands::Clear => {
            commands::clear::clear(session)?;
        }

        Commands::Slices(slice_cmd) => match slice_cmd {
            SliceCommands::List => {
                commands::slices::list().await?;
            }

            SliceCommands::Edit { id } => {
                commands::slices::edit(session, id).await?;
            }

            SliceCommands::Rm { id, yes } => {
                commands::slices::rm(id, yes).await?;
            }
        },

        Commands::Images { refresh } => {
            commands::images::images(session, refresh).await?;
        }

        Commands::Logs => {
            commands::logs::logs().await?;
        }
    }

    Ok(())
}
