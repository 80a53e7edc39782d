mod app;
mod browser;
mod commands;
mod console;

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use doctordork_core::{DoctorIdentity, ExportFormat, Paths};
use doctordork_search::Category;
use doctordork_storage::DEFAULT_RECENT;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::App;
use crate::browser::SystemBrowser;
use crate::console::{ansi, Console};

#[derive(Parser)]
#[command(name = "doctordork")]
#[command(about = "Medical professional research tool: builds search links for a doctor and opens them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the config and history files (defaults to home)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Directory exported reports are written to (defaults to the working directory)
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct IdentityArgs {
    /// Doctor's full name
    #[arg(short, long)]
    name: String,

    /// City of practice
    #[arg(short, long)]
    city: String,

    /// 2-letter state code
    #[arg(short, long)]
    state: String,

    /// Specialty (optional)
    #[arg(long, default_value = "")]
    specialty: String,
}

impl IdentityArgs {
    fn identity(&self) -> DoctorIdentity {
        DoctorIdentity::new(&self.name, &self.city, &self.state, &self.specialty)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,

    /// Build links for one doctor; every operation when no category is given
    Search {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Category key or alias, repeatable or comma-separated (e.g. reviews,medicare)
        #[arg(short = 'k', long = "category", value_delimiter = ',')]
        categories: Vec<Category>,

        /// Open every generated link in the browser
        #[arg(long)]
        open: bool,

        /// Export the results after the search
        #[arg(long)]
        export: bool,

        /// Export format (overrides config export_format)
        #[arg(long, value_name = "csv|json|html")]
        format: Option<ExportFormat>,
    },

    /// Google search for the doctor's contact page
    Contact {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Open the search in the browser
        #[arg(long)]
        open: bool,
    },

    /// Medical licensing board for a state, or ALL
    Board {
        /// 2-letter state code or ALL
        code: String,

        /// Open the board website in the browser
        #[arg(long)]
        open: bool,
    },

    /// Contact searches for every doctor in a file (Name, City, State[, Specialty] per line)
    Batch {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Export the doctor list afterwards
        #[arg(long)]
        export: bool,

        /// Export format (overrides config export_format)
        #[arg(long, value_name = "csv|json|html")]
        format: Option<ExportFormat>,
    },

    /// List search categories and their platforms
    Categories,

    /// Show or clear search history
    History {
        /// Number of entries to show
        #[arg(short, long, default_value_t = DEFAULT_RECENT)]
        limit: usize,

        /// Delete all history
        #[arg(long)]
        clear: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Get a config value
    Get {
        /// Config key (auto_open_browser, export_format, save_history, show_progress)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Reset config to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show file locations
    Path,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn resolve_paths(home: Option<PathBuf>, output_dir: Option<PathBuf>) -> Paths {
    let paths = match home {
        Some(base) => Paths::with_base(base).with_export_dir(PathBuf::from(".")),
        None => Paths::new(),
    };
    match output_dir {
        Some(dir) => paths.with_export_dir(dir),
        None => paths,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\n{}An unexpected error occurred: {:#}{}", ansi::RED, e, ansi::RESET);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = resolve_paths(cli.home, cli.output_dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            drop(out);
            let app = App::new(paths, Box::new(SystemBrowser));
            let console = Console::new(io::stdin().lock(), io::stdout());
            commands::menu::Menu::new(app, console).run()?;
        }
        Commands::Search {
            identity,
            categories,
            open,
            export,
            format,
        } => {
            let mut app = App::new(paths, Box::new(SystemBrowser));
            let export = export.then(|| format.unwrap_or(app.config.export_format));
            commands::search_cmd::run(&mut app, &identity.identity(), &categories, open, export, &mut out)?;
        }
        Commands::Contact { identity, open } => {
            let mut app = App::new(paths, Box::new(SystemBrowser));
            commands::search_cmd::contact(&mut app, &identity.identity(), open, &mut out)?;
        }
        Commands::Board { code, open } => {
            let mut app = App::new(paths, Box::new(SystemBrowser));
            commands::board_cmd::run(&mut app, &code, open, &mut out)?;
        }
        Commands::Batch { file, export, format } => {
            let mut app = App::new(paths, Box::new(SystemBrowser));
            let export = export.then(|| format.unwrap_or(app.config.export_format));
            commands::batch_cmd::run(&mut app, &file, export, &mut out)?;
        }
        Commands::Categories => {
            commands::search_cmd::categories(&mut out)?;
        }
        Commands::History { limit, clear } => {
            let mut app = App::new(paths, Box::new(SystemBrowser));
            if clear {
                commands::history_cmd::clear(&mut app.history, &mut out)?;
            } else {
                commands::history_cmd::list(&app.history, limit, &mut out)?;
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_cmd::show(&paths, &mut out)?,
            ConfigCommands::Get { key } => commands::config_cmd::get(&paths, &key, &mut out)?,
            ConfigCommands::Set { key, value } => {
                commands::config_cmd::set(&paths, &key, &value, &mut out)?
            }
            ConfigCommands::Reset { force } => {
                commands::config_cmd::reset(&paths, force, &mut io::stdin().lock(), &mut out)?
            }
            ConfigCommands::Path => commands::config_cmd::path(&paths, &mut out)?,
        },
        Commands::Completions { shell } => {
            commands::completions_cmd::run(&shell, &mut Cli::command(), &mut out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["doctordork"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_parses_category_aliases() {
        let cli = Cli::try_parse_from([
            "doctordork", "search", "-n", "John Smith", "-c", "Boston", "-s", "ma",
            "-k", "reviews,npi", "--category", "social", "--export", "--format", "csv",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Search { identity, categories, export, format, .. }) => {
                assert_eq!(identity.identity().state, "MA");
                assert_eq!(categories, [Category::Reviews, Category::Medicare, Category::SocialMedia]);
                assert!(export);
                assert_eq!(format, Some(ExportFormat::Csv));
            }
            _ => panic!("expected search"),
        }

        assert!(Cli::try_parse_from([
            "doctordork", "search", "-n", "A", "-c", "B", "-s", "CA", "-k", "astrology",
        ])
        .is_err());
    }

    #[test]
    fn test_global_paths() {
        let cli = Cli::try_parse_from(["doctordork", "categories", "--home", "/tmp/dd", "--output-dir", "/tmp/out"])
            .unwrap();
        let paths = resolve_paths(cli.home, cli.output_dir);
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/dd/.doctordork_config.json"));
        assert_eq!(paths.export_dir, PathBuf::from("/tmp/out"));

        let paths = resolve_paths(Some(PathBuf::from("/tmp/dd")), None);
        assert_eq!(paths.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_completions() {
        let mut out = Vec::new();
        commands::completions_cmd::run("bash", &mut Cli::command(), &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("doctordork"));
        assert!(commands::completions_cmd::run("tcsh", &mut Cli::command(), &mut Vec::new()).is_err());
    }
}
