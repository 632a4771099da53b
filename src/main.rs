use anyhow::Result;
use clap::{Parser, Subcommand};
use sprig::areas::repository::Repository;
use sprig::artifacts::objects::object_type::ObjectType;
use sprig::commands::porcelain::tag::TagOptions;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SPRIG_LOG=sprig=debug`
const LOG_ENV: &str = "SPRIG_LOG";

#[derive(Parser)]
#[command(
    name = "sprig",
    version = "0.1.0",
    about = "A Git-compatible object store and revision resolver",
    long_about = "sprig reads and writes Git repositories: loose objects, references and \
    revision expressions. It covers the object model, not the index or the network.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
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
        long_about = "This command creates a .git directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute an object ID and optionally write the object to the database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long = "type", value_enum, default_value_t = ObjectType::Blob)]
        object_type: ObjectType,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content of an object")]
    CatFile {
        #[arg(index = 1, value_enum, help = "The expected object type")]
        object_type: ObjectType,
        #[arg(index = 2, help = "The object to print")]
        object: String,
    },
    #[command(name = "ls-tree", about = "List the entries of a tree object")]
    LsTree {
        #[arg(index = 1, help = "A tree, or a commit or tag leading to one")]
        object: String,
    },
    #[command(name = "rev-parse", about = "Resolve a revision to an object ID")]
    RevParse {
        #[arg(short = 't', long = "type", value_enum, help = "Dereference to this object type")]
        object_type: Option<ObjectType>,
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "show-ref", about = "List references")]
    ShowRef,
    #[command(name = "tag", about = "List tags, or create one")]
    Tag {
        #[arg(short, long, help = "Create an annotated tag object")]
        annotate: bool,
        #[arg(short, long, help = "Message of the annotated tag")]
        message: Option<String>,
        #[arg(index = 1, help = "The new tag's name")]
        name: Option<String>,
        #[arg(index = 2, help = "The object the new tag points to (defaults to HEAD)")]
        object: Option<String>,
    },
    #[command(name = "update-ref", about = "Point a reference at an object")]
    UpdateRef {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        object: String,
    },
    #[command(name = "log", about = "Print commit history as a Graphviz graph")]
    Log {
        #[arg(index = 1, default_value = "HEAD")]
        commit: String,
    },
    #[command(
        name = "checkout",
        about = "Write the files of a commit or tree into an empty directory"
    )]
    Checkout {
        #[arg(index = 1)]
        commit: String,
        #[arg(index = 2)]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
            Repository::new(&path, Box::new(std::io::stdout())).init()?
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => {
            let repository = if *write {
                discover(&pwd)?
            } else {
                Repository::new(&pwd, Box::new(std::io::stdout()))
            };

            repository.hash_object(&pwd.join(file), *object_type, *write)?
        }
        Commands::CatFile {
            object_type,
            object,
        } => discover(&pwd)?.cat_file(*object_type, object)?,
        Commands::LsTree { object } => discover(&pwd)?.ls_tree(object)?,
        Commands::RevParse { object_type, name } => {
            discover(&pwd)?.rev_parse(name, *object_type)?
        }
        Commands::ShowRef => discover(&pwd)?.show_ref()?,
        Commands::Tag {
            annotate,
            message,
            name,
            object,
        } => {
            let options = TagOptions {
                annotate: *annotate,
                message: message.clone(),
            };

            discover(&pwd)?.tag(name.as_deref(), object.as_deref(), &options)?
        }
        Commands::UpdateRef { name, object } => discover(&pwd)?.update_ref(name, object)?,
        Commands::Log { commit } => discover(&pwd)?.log(commit)?,
        Commands::Checkout { commit, dir } => discover(&pwd)?.checkout(commit, &pwd.join(dir))?,
    }

    Ok(())
}

fn discover(pwd: &Path) -> Result<Repository> {
    let repository = Repository::discover(pwd, Box::new(std::io::stdout()))?;
    debug!(path = ?repository.path(), "using repository");

    Ok(repository)
}
