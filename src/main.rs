use archrepo::core::{format_error_with_help, ArchRepoError};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "archrepo")]
#[command(about = "Maintenance tooling for an unofficial Arch Linux package repository")]
#[command(version)]
struct Cli {
    /// Root of the packaging checkout (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to <root>/archrepo.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the Dropbox client for VERSION and regenerate its PKGBUILD
    UpdateDropbox {
        /// Dropbox client version, e.g. 190.4.6383
        version: Option<String>,
    },
    /// Pin ruby-trunk to the newest commit of ruby/ruby
    UpdateRubyTrunk,
    /// Pin vim-latest to the newest tag of vim/vim
    UpdateVimLatest,
    /// Commit the staged PKGBUILD change with a generated message
    CommitUpdate {
        /// Evaluate PKGBUILDs with bash instead of parsing them
        #[arg(long)]
        shell: bool,
    },
    /// Show `git diff` for submodules checked out at a new commit
    SubmoduleDiff,
    /// Render HTML index pages from repository databases
    RenderPages {
        /// Directory holding <repo>/os/<arch>/<repo>.db
        db_dir: PathBuf,
        /// Output directory
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                // Usage errors share the exit status of every other failure
                _ => ExitCode::from(1),
            };
        }
    };

    let default_filter = if cli.verbose {
        "archrepo=debug"
    } else {
        "archrepo=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = cli::GlobalOptions {
        root: cli.root,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::UpdateDropbox { version } => cli::update_dropbox::run(&options, version).await,
        Commands::UpdateRubyTrunk => cli::update_ruby_trunk::run(&options).await,
        Commands::UpdateVimLatest => cli::update_vim_latest::run(&options).await,
        Commands::CommitUpdate { shell } => cli::commit_update::run(&options, shell),
        Commands::SubmoduleDiff => cli::submodule_diff::run(&options),
        Commands::RenderPages { db_dir, out_dir } => {
            cli::render_pages::run(&options, &db_dir, &out_dir)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                // git already reported the failure
                ArchRepoError::SubprocessExit(_) => {}
                _ => eprintln!("{}", format_error_with_help(&e)),
            }
            ExitCode::from(e.exit_code())
        }
    }
}
