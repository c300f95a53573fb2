//! # homestock CLI
//!
//! Command-line interface for the homestock pantry tracker.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;

use homestock::{
    commands::{self, CatalogEntry, ImportArgs, ListArgs},
    logging,
    pantry::filter::SortBy,
    ui::InteractiveArgs,
    wizard::ImportMethod,
};

const GLOBAL_HELP: &str = "\
Configuration Files:
  ~/.config/homestock/config   Global configuration (interactive mode, ID pattern, converters)
  .homestock                   Household configuration (pantry directory, quick filters)

Import Methods:
  text      Type or paste a shopping list (built in)
  voice     Dictate what you bought (converters.voice)
  photo     Receipts, grocery photos, product labels (converters.photo)
  barcode   Scan or type barcodes (catalog, converters.barcode)
  receipt   Import from a receipt link (converters.receipt)

Getting Started:
  hs init                                  Initialize a household in the current directory
  hs import                                Open the import wizard
  hs import --method text --text \"milk, 6 eggs\"
  hs list                                  List pantry items

Learn more:
  hs <COMMAND> --help                      Show detailed help for a command";

#[derive(Parser)]
#[command(name = "hs")]
#[command(author = "Dominic Rodemer")]
#[command(version)]
#[command(about = "Household pantry tracker with a multi-method import wizard")]
#[command(
    long_about = "homestock keeps a household's pantry as Markdown files with YAML frontmatter. \
Items are added through an import wizard: pick a method (text, voice, photo, barcode, \
digital receipt), provide the input, review the converted items, and commit them.\n\n\
Voice, photo, and receipt conversion run external converter commands configured in \
the global config, so any recognizer can be plugged in."
)]
#[command(after_help = GLOBAL_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a household in the current directory
    #[command(
        long_about = "Initialize a household in the current directory.\n\n\
Creates the .homestock configuration file, the pantry directory, and the global \
configuration file if it does not exist yet."
    )]
    Init,

    /// Import items into the pantry
    #[command(
        long_about = "Import items into the pantry.\n\n\
Without --method the interactive wizard opens (method, input, review, complete). \
With --method the same steps run from flags: the input is converted, --drop and \
--filter remove unwanted items, and the rest is saved.",
        after_help = "Examples:\n  \
hs import                                        Open the wizard\n  \
hs import --method text --text \"2 l milk, bread\"\n  \
hs import --method text --file list.txt --drop bags\n  \
hs import --method photo --image r1.jpg --image r2.jpg --type receipt\n  \
hs import --method barcode --code 4006381333931 --code 4000417025005\n  \
hs import --method receipt --url https://shop.example/r/123 --dry-run"
    )]
    Import(ImportCli),

    /// List pantry items
    #[command(after_help = "Examples:\n  \
hs list\n  \
hs list --category dairy\n  \
hs list --expiring 3 --sort expiry\n  \
hs list --search milk")]
    List {
        /// Only items in this category ("uncategorized" for none)
        #[arg(short, long)]
        category: Option<String>,

        /// Match name, ID, barcode, or notes
        #[arg(short, long)]
        search: Option<String>,

        /// Only items expiring within this many days
        #[arg(long, value_name = "DAYS")]
        expiring: Option<u64>,

        /// Sort order
        #[arg(long, value_enum, default_value = "date")]
        sort: SortBy,
    },

    /// Manage the barcode catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct ImportCli {
    /// Import method: text, voice, photo, barcode, receipt
    #[arg(short, long)]
    method: Option<ImportMethod>,

    /// Shopping list text
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Shopping list file ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Audio file to transcribe
    #[arg(long, value_name = "FILE")]
    audio: Option<PathBuf>,

    /// Image file (repeatable)
    #[arg(long = "image", value_name = "FILE")]
    images: Vec<PathBuf>,

    /// What the images show: receipt, groceries, product
    #[arg(long = "type", value_name = "TYPE")]
    import_type: Option<String>,

    /// Digital receipt link
    #[arg(long)]
    url: Option<String>,

    /// Barcode to look up (repeatable)
    #[arg(long = "code", value_name = "CODE")]
    codes: Vec<String>,

    /// Remove staged items whose name contains this keyword (repeatable)
    #[arg(long, value_name = "KEYWORD")]
    drop: Vec<String>,

    /// Apply a named quick filter from .homestock (repeatable)
    #[arg(long = "filter", value_name = "NAME")]
    filters: Vec<String>,

    /// Show the staged items without saving
    #[arg(long)]
    dry_run: bool,

    /// Force the interactive wizard
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Never open the interactive wizard
    #[arg(long, conflicts_with = "interactive")]
    no_interactive: bool,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Remember a product under a barcode
    Add {
        /// Barcode digits
        code: String,

        /// Product name
        name: String,

        /// Default quantity
        #[arg(short, long)]
        quantity: Option<f64>,

        /// Unit (l, kg, pcs, ...)
        #[arg(short, long)]
        unit: Option<String>,

        /// Category subdirectory
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List catalog products
    List,
}

impl From<ImportCli> for ImportArgs {
    fn from(cli: ImportCli) -> Self {
        Self {
            method: cli.method,
            text: cli.text,
            file: cli.file,
            audio: cli.audio,
            images: cli.images,
            import_type: cli.import_type,
            url: cli.url,
            codes: cli.codes,
            drop: cli.drop,
            filters: cli.filters,
            dry_run: cli.dry_run,
            interactive: InteractiveArgs {
                interactive: cli.interactive,
                no_interactive: cli.no_interactive,
            },
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        tracing::error!(error = %format!("{err:#}"), "command failed");
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init(),

        Commands::Import(import) => commands::import(&import.into()),

        Commands::List {
            category,
            search,
            expiring,
            sort,
        } => commands::list(&ListArgs {
            category,
            search,
            expiring,
            sort,
        }),

        Commands::Catalog(CatalogCommand::Add {
            code,
            name,
            quantity,
            unit,
            category,
        }) => commands::catalog::add(CatalogEntry {
            code,
            name,
            quantity,
            unit,
            category,
        }),

        Commands::Catalog(CatalogCommand::List) => commands::catalog::list(),

        Commands::Completions { shell } => commands::completions(shell, &mut Cli::command()),
    }
}
