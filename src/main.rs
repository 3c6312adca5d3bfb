#![allow(dead_code)]

use crate::areas::repository::Repository;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gggit",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "gggit is a minimal re-implementation of a content-addressed \
    version control system inspired by Git. It is not meant to be a replacement \
    for git, but a small core: an object database and a reference graph.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw content of an object in the repository. \
        It requires the full 40-character hash of the object."
    )]
    CatFile {
        #[arg(index = 1, help = "The object hash to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file or directory and optionally write it to the object database",
        long_about = "This command hashes a file as a blob, or a directory as a tree, \
        and can write the resulting object(s) to the object database."
    )]
    HashObject {
        #[arg(
            short,
            long,
            required = false,
            help = "Write the object to the object database"
        )]
        write: bool,
        #[arg(index = 1)]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Record a snapshot of the working tree on the current branch",
        long_about = "This command snapshots the working tree into a tree object, \
        records a commit with the specified message and advances the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create a new branch",
        long_about = "This command creates a new branch pointing at the current head commit."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Point HEAD at a branch",
        long_about = "This command attaches HEAD to the specified branch. \
        The working directory is not modified."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to check out")]
        branch: String,
    },
    #[command(
        name = "status",
        about = "Show which branch or commit HEAD points at"
    )]
    Status,
    #[command(
        name = "ls-objects",
        about = "List every object in the object database"
    )]
    LsObjects,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => std::path::PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            let mut repository = Repository::init_at(&path, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::CatFile { sha } => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, path } => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.hash_object(path, *write)?
        }
        Commands::Commit { message } => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.commit(message.as_str())?
        }
        Commands::Branch { name } => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.branch(name)?
        }
        Commands::Checkout { branch } => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.checkout(branch)?
        }
        Commands::Status => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.status()?
        }
        Commands::LsObjects => {
            let mut repository = Repository::discover(Box::new(std::io::stdout()))?;

            repository.ls_objects()?
        }
    }

    Ok(())
}
