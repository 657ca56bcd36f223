use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{Level, info};

use zwave_cc_gen::catalog::{Catalog, IngestStats, build_catalog};
use zwave_cc_gen::codegen::{self, DEFAULT_PACKAGE, GenerateOptions};
use zwave_cc_gen::document::load_document;
use zwave_cc_gen::naming::IdentifierStyle;
use zwave_cc_gen::profile::Profile;

/// Generate typed enumerations from a Z-Wave command class catalog.
///
/// Reads the XML catalog, keeps the newest version of every command class,
/// and writes enum sources for the selected target language.
#[derive(Parser)]
#[command(name = "zwave-cc-gen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only report errors and warnings.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every skipped, discarded and superseded node.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sources into an output directory.
    ///
    /// The output directory is cleared first: point it at a location that
    /// holds nothing but generated files.
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory for generated sources.
        #[arg(long, env = "ZWAVE_CC_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Target language profile.
        #[arg(long, value_enum, default_value_t = ProfileArg::Java)]
        profile: ProfileArg,

        /// Package declaration for Java sources.
        #[arg(long, default_value = DEFAULT_PACKAGE)]
        package: String,
    },

    /// Print the resolved catalog.
    List {
        #[command(flatten)]
        input: InputArgs,

        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Command class catalog XML document.
    #[arg(long, env = "ZWAVE_CC_INPUT")]
    input: PathBuf,

    /// Identifier style; defaults to the profile's own (java: verbatim,
    /// javascript: upper-camel).
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Java,
    Javascript,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Java => Profile::Java,
            ProfileArg::Javascript => Profile::JavaScript,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Verbatim,
    UpperCamel,
}

impl From<StyleArg> for IdentifierStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Verbatim => IdentifierStyle::Verbatim,
            StyleArg::UpperCamel => IdentifierStyle::UpperCamel,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> zwave_cc_gen::error::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            profile,
            package,
        } => {
            let profile = Profile::from(profile);
            let style = input.style.map_or(profile.default_style(), Into::into);
            let catalog = ingest(&input.input, style)?;

            let options = GenerateOptions { profile, package };
            let stats = codegen::generate(&catalog, &options, &output_dir)?;

            info!(
                "Generated {} files: index of {} command classes, {} command enums",
                stats.artifacts_written, stats.command_classes, stats.command_artifacts
            );
            if stats.classes_without_commands > 0 {
                info!(
                    "{} command classes have no commands and got no command enum",
                    stats.classes_without_commands
                );
            }
        }

        Commands::List { input, json } => {
            let style = input.style.map_or(IdentifierStyle::Verbatim, Into::into);
            let catalog = ingest(&input.input, style)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for entry in catalog.iter() {
                    println!(
                        "{:<40} 0x{:02X}  v{:<3} {} commands",
                        entry.display_name,
                        entry.code,
                        entry.version,
                        entry.commands.len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn ingest(path: &Path, style: IdentifierStyle) -> zwave_cc_gen::error::Result<Catalog> {
    info!("Loading catalog from {}", path.display());
    let document = load_document(path)?;
    let (catalog, stats) = build_catalog(&document, style);
    report(&stats, &catalog);
    Ok(catalog)
}

fn report(stats: &IngestStats, catalog: &Catalog) {
    info!(
        "Resolved {} command classes from {} nodes",
        catalog.len(),
        stats.classes_seen
    );
    if stats.classes_superseded > 0 || stats.classes_discarded > 0 {
        info!(
            "Superseded {} older versions, discarded {} non-newer versions",
            stats.classes_superseded, stats.classes_discarded
        );
    }
    if stats.classes_invalid > 0 || stats.commands_invalid > 0 {
        info!(
            "Skipped {} invalid command classes, {} invalid commands",
            stats.classes_invalid, stats.commands_invalid
        );
    }
    if stats.classes_displaced > 0 {
        info!(
            "Replaced {} command classes on display name collisions",
            stats.classes_displaced
        );
    }
}
