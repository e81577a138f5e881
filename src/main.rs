//! fabricgen - boilerplate generator for Fabric Minecraft mods
//!
//! Command line front end. It initializes:
//! - Logging (daily rotating file, optional console output)
//! - Settings and form defaults ([`ConfigManager`])
//! - The generator registry, state manager and [`GeneratorController`]
//!
//! Form input is given as repeated `--set field=value` pairs using the same
//! camelCase field names the form uses (`modId`, `className`, `recipeType`, ...),
//! optionally on top of a saved profile.
//!
//! # Configuration Files
//!
//! Expected in the config directory (default `fabricgen/`):
//! - `settings.yaml`: cache size and key strategy, history depth, directories
//! - `defaults.yaml`: starting values for the form (optional)

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use fabricgen::services::{
    ClipboardSink, DirectorySink, ExportOptions, FileStore, ProfileManager, StdoutClipboard,
};
use fabricgen::{
    APP_NAME, AppSettings, AppState, ConfigManager, GeneratorController, GeneratorKind,
    GeneratorRegistry, ModConfig, StateManager, VERSION,
};
use indexmap::IndexMap;
use std::fs;

#[derive(Parser)]
#[command(name = "fabricgen")]
#[command(version)]
#[command(about = "Generate boilerplate for Fabric Minecraft mods", long_about = None)]
struct Cli {
    /// Directory holding settings.yaml and defaults.yaml
    #[arg(long, global = true, default_value = "fabricgen")]
    config_dir: String,

    /// Form field override, repeatable (e.g. --set modId=ruby-mod)
    #[arg(long = "set", global = true, value_name = "FIELD=VALUE")]
    fields: Vec<String>,

    /// Start from a saved profile instead of the defaults
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Verbose logging to the console
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available generators
    List,
    /// Check the identifying fields of the configuration
    Validate,
    /// Run generators and print or write their output
    #[clap(visible_alias = "g")]
    Generate {
        /// Generator types (entity, block, recipe, ...)
        kinds: Vec<String>,
        /// Run every generator
        #[arg(long, conflicts_with = "kinds")]
        all: bool,
        /// Write files under this directory instead of printing them
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Export a complete project skeleton
    Export {
        /// Destination directory (default: the configured output directory)
        #[arg(short, long)]
        out: Option<String>,
        /// Include docs/QUICK_START.md
        #[arg(long)]
        docs: bool,
        /// Remap a logical path, repeatable (e.g. --map README.md=docs/README.md)
        #[arg(long = "map", value_name = "LOGICAL=PHYSICAL")]
        folder_map: Vec<String>,
    },
    /// Manage saved configuration profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Generate twice and report cache statistics
    Stats {
        /// Generator types to exercise (default: all)
        kinds: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Save the resolved configuration under a name
    Save { name: String },
    /// Print a saved profile
    Load { name: String },
    /// List saved profile names
    List,
    /// Delete a saved profile
    Delete { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let settings = config_manager.load_settings()?;

    let _guard = fabricgen::logging::setup_logging_with_console(
        fabricgen::logging::DEFAULT_LOG_DIR,
        fabricgen::logging::DEFAULT_LOG_PREFIX,
        cli.debug || settings.debug_mode,
        cli.debug,
    )?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let result = run(&cli, &config_manager, &settings);
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    tracing::info!("Shutdown complete");
    result
}

fn run(cli: &Cli, config_manager: &ConfigManager, settings: &AppSettings) -> Result<()> {
    let profile_dir = config_manager.config_dir().join(&settings.profile_dir);
    fs::create_dir_all(&profile_dir)
        .with_context(|| format!("Failed to create profile directory: {}", profile_dir))?;
    let mut profiles = ProfileManager::new(FileStore::new(profile_dir));

    let base = match &cli.profile {
        Some(name) => profiles
            .load(name)?
            .ok_or_else(|| anyhow!("No profile named {}", name))?,
        None => config_manager.load_defaults()?,
    };
    let config = ConfigManager::merge(&base, &parse_pairs(&cli.fields)?)?;

    let registry = GeneratorRegistry::with_defaults(&settings.cache);
    let state = StateManager::with_state(AppState::with_history_depth(settings.history_depth))
        .with_metrics(registry.metrics().clone());
    let mut controller = GeneratorController::new(state, registry);
    controller.load_config(config);

    match &cli.command {
        Commands::List => {
            for kind in controller.registry().kinds() {
                println!("{:<10} {}", kind.as_str(), kind.description());
            }
        }
        Commands::Validate => {
            let errors = controller.validate_config();
            if errors.is_empty() {
                println!("✅ Configuration is valid");
            } else {
                for (field, message) in &errors {
                    println!("❌ {}: {}", field.field_name(), message);
                }
                anyhow::bail!("{} field(s) failed validation", errors.len());
            }
        }
        Commands::Generate { kinds, all, out } => {
            let kinds = if *all {
                GeneratorKind::ALL.to_vec()
            } else {
                parse_kinds(kinds)?
            };
            if kinds.is_empty() {
                anyhow::bail!("Name at least one generator type, or pass --all");
            }
            controller.select_generators(&kinds);
            let report = controller.generate_selected();

            match out {
                Some(dir) if !report.files.is_empty() => {
                    let mut sink = DirectorySink::new(dir.as_str());
                    let written = controller.download_all(&mut sink)?;
                    println!("✅ Wrote {} file(s) under {}", written, sink.root());
                }
                Some(_) => {}
                None => {
                    let mut clipboard = StdoutClipboard;
                    for file in &report.files {
                        clipboard.copy(&format!("// === {} ===", file.target_path()))?;
                        controller.copy_file(&file.filename, &mut clipboard)?;
                    }
                }
            }

            for failure in &report.failures {
                eprintln!("❌ {}: {}", failure.kind, failure.message);
            }
            if !report.is_complete_success() {
                anyhow::bail!("{} generator(s) failed", report.failures.len());
            }
        }
        Commands::Export { out, docs, folder_map } => {
            let options = ExportOptions {
                folder_map: parse_pairs(folder_map)?,
                extra_files: IndexMap::new(),
                include_docs: *docs,
            };
            let out = out.as_deref().unwrap_or(&settings.output_dir);
            let mut sink = DirectorySink::new(out);
            let written = controller.export_project_to(&options, &mut sink)?;
            println!("✅ Exported {} file(s) to {}", written, sink.root());
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Save { name } => {
                profiles.save(name, &controller.config())?;
                println!("✅ Saved profile {}", name);
            }
            ProfileCommands::Load { name } => {
                let loaded: ModConfig = profiles
                    .load(name)?
                    .ok_or_else(|| anyhow!("No profile named {}", name))?;
                print!("{}", serde_yaml_ng::to_string(&loaded)?);
            }
            ProfileCommands::List => {
                for name in profiles.list_all()? {
                    println!("{}", name);
                }
            }
            ProfileCommands::Delete { name } => {
                profiles.delete(name)?;
                println!("✅ Deleted profile {}", name);
            }
        },
        Commands::Stats { kinds } => {
            let kinds = if kinds.is_empty() {
                GeneratorKind::ALL.to_vec()
            } else {
                parse_kinds(kinds)?
            };
            controller.select_generators(&kinds);
            controller.generate_selected();
            controller.generate_selected();
            println!("{}", serde_json::to_string_pretty(&controller.cache_stats())?);
        }
    }

    controller.metrics().log_summary();
    Ok(())
}

fn parse_kinds(names: &[String]) -> Result<Vec<GeneratorKind>> {
    let kinds = names
        .iter()
        .map(|name| name.parse::<GeneratorKind>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(kinds)
}

/// Split `key=value` arguments; only the first `=` separates.
fn parse_pairs(pairs: &[String]) -> Result<IndexMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .with_context(|| format!("Expected KEY=VALUE, got {}", pair))
        })
        .collect()
}
