//! Portfolio Board CLI
//!
//! Usage:
//!   portfolio-board sync [--output FILE] [--api-base URL]
//!   portfolio-board layout [--board FILE] [--projects FILE] [--seed N] [--filter TAG]... [--format svg|json]
//!   portfolio-board card --projects FILE
//!
//! Set RUST_LOG=debug to trace layout passes.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::{Parser, Subcommand, ValueEnum};
    use log::debug;
    use thiserror::Error;

    use portfolio_board::project::{load_projects, load_projects_lenient};
    use portfolio_board::sync::{self, NotionClient, SyncConfig, SyncError};
    use portfolio_board::{preview, BoardSpec, CardSpec, Palette, PreviewConfig, SvgConfig};

    #[derive(Parser)]
    #[command(name = "portfolio-board")]
    #[command(about = "Scattered card layout for portfolio pages")]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Pull project pages from the content API and write the project file
        Sync {
            /// Output file
            #[arg(short, long, default_value = sync::config::DEFAULT_OUTPUT)]
            output: PathBuf,

            /// Scheme and host of the content API
            #[arg(long, default_value = sync::config::DEFAULT_API_BASE)]
            api_base: String,
        },

        /// Lay out project cards on a board and print a preview
        Layout {
            /// Board description (TOML format)
            #[arg(short, long)]
            board: Option<PathBuf>,

            /// Project file; a missing or malformed file means no project cards
            #[arg(short, long)]
            projects: Option<PathBuf>,

            /// Seed for the placement draws (random when omitted)
            #[arg(long)]
            seed: Option<u64>,

            /// Tag to filter by; repeat to show cards carrying any of several tags
            #[arg(short, long = "filter")]
            filters: Vec<String>,

            /// Palette file for preview colors (TOML format)
            #[arg(long)]
            palette: Option<PathBuf>,

            /// Draw hidden cards as faint outlines
            #[arg(long)]
            show_hidden: bool,

            #[arg(long, value_enum, default_value_t = Format::Svg)]
            format: Format,
        },

        /// Print the card markup for every project
        Card {
            #[arg(short, long)]
            projects: PathBuf,
        },
    }

    #[derive(Clone, Copy, ValueEnum)]
    enum Format {
        Svg,
        Json,
    }

    #[derive(Debug, Error)]
    enum Failure {
        #[error(transparent)]
        Preview(#[from] portfolio_board::Error),

        #[error(transparent)]
        Sync(#[from] SyncError),
    }

    impl Failure {
        fn hint(&self) -> Option<&'static str> {
            match self {
                Self::Sync(e) => e.hint(),
                Self::Preview(_) => None,
            }
        }
    }

    pub fn main() {
        env_logger::init();
        let cli = Cli::parse();

        if let Err(e) = run(cli.command) {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {}", hint);
            }
            std::process::exit(1);
        }
    }

    fn run(command: Command) -> Result<(), Failure> {
        match command {
            Command::Sync { output, api_base } => {
                let config = SyncConfig::from_env()?
                    .with_api_base(api_base)
                    .with_output(output);
                let client = NotionClient::new(config.clone())?;
                let records = sync::sync_projects(&client, &config.output)?;
                println!("Wrote {} projects to {}", records.len(), config.output.display());
            }
            Command::Layout {
                board,
                projects,
                seed,
                filters,
                palette,
                show_hidden,
                format,
            } => {
                let board = match &board {
                    Some(path) => BoardSpec::from_file(path).map_err(portfolio_board::Error::from)?,
                    None => BoardSpec::default(),
                };
                let projects = match &projects {
                    Some(path) => load_projects_lenient(path),
                    None => Vec::new(),
                };
                let palette = match &palette {
                    Some(path) => Palette::from_file(path).map_err(portfolio_board::Error::from)?,
                    None => Palette::default(),
                };
                let seed = seed.unwrap_or_else(clock_seed);
                debug!("layout seed {}", seed);

                let mut config = PreviewConfig::new()
                    .with_seed(seed)
                    .with_palette(palette)
                    .with_svg(SvgConfig::default().with_show_hidden(show_hidden));
                for tag in filters {
                    config = config.with_filter(tag);
                }

                let preview = preview(&board, &projects, &config)?;
                match format {
                    Format::Svg => println!("{}", preview.to_svg(&config.svg, &config.palette)),
                    Format::Json => println!("{}", preview.to_json()?),
                }
            }
            Command::Card { projects } => {
                let projects = load_projects(&projects).map_err(portfolio_board::Error::from)?;
                for record in &projects {
                    println!("{}", CardSpec::from_record(record).to_html());
                }
            }
        }
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    cli::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
