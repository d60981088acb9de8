//! fmtrc CLI
//!
//! Entry point for the `fmtrc` command-line tool: inspect, validate, and
//! explain formatter configuration.

use clap::{Parser, Subcommand};
use fmtrc::{discover_config_file, ExplainOutput, FormatterConfig, LoadedConfig, Resolver};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;
use walkdir::{DirEntry, WalkDir};

#[derive(Parser)]
#[command(name = "fmtrc")]
#[command(about = "Formatter configuration inspector", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged effective configuration and its sources
    Show {
        /// Path to a config file (default: probe fmtrc.json, .fmtrc.json,
        /// fmtrc.toml in the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// CLI option overrides, highest precedence (e.g. -O print_width=100)
        #[arg(long = "option", short = 'O', value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Output the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain which override rules apply to a path
    Explain {
        /// The file path to resolve
        path: PathBuf,

        /// Path to a config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// CLI option overrides, highest precedence
        #[arg(long = "option", short = 'O', value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Verify a configuration file
    Verify {
        /// Path to a config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Walk a directory and report the resolved parser and width per file
    Plan {
        /// Directory to walk
        dir: PathBuf,

        /// Path to a config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            config,
            options,
            json,
        } => run_show(config, options, json),
        Commands::Explain {
            path,
            config,
            options,
            human,
        } => run_explain(&path, config, options, human),
        Commands::Verify { config } => run_verify(config),
        Commands::Plan { dir, config, json } => run_plan(&dir, config, json),
    }
}

fn run_show(config_path: Option<PathBuf>, overrides: Vec<String>, json: bool) {
    let loaded = load_config(config_path, overrides);

    if json {
        match loaded.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Sources (in precedence order):");
    for source in &loaded.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("  {:?}: {} (sha256 {})", source.origin, path, &digest[..12]);
            }
            _ => println!("  {:?}", source.origin),
        }
    }
    println!();

    match loaded.config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_explain(path: &Path, config_path: Option<PathBuf>, overrides: Vec<String>, human: bool) {
    let loaded = load_config(config_path, overrides);
    let resolver = build_resolver(loaded.config);

    let resolved = resolver.resolve(path);
    let explanation = ExplainOutput::from_resolved(path, &resolved);

    if human {
        println!("{}", explanation.to_human());
    } else {
        match explanation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }
}

fn run_verify(config_path: Option<PathBuf>) {
    // Same candidate probing the loader uses, so verify agrees with
    // show/explain/plan about which file is in effect
    let path = match config_path.or_else(|| discover_config_file(Path::new("."))) {
        Some(path) => path,
        None => {
            eprintln!("No config file found (tried fmtrc.json, .fmtrc.json, fmtrc.toml)");
            process::exit(1);
        }
    };

    match FormatterConfig::from_file(&path) {
        Ok(config) => {
            println!("Configuration valid: {}", path.display());
            println!();
            let base_keys = config.base.specified_keys();
            if !base_keys.is_empty() {
                println!("  Base options: {}", base_keys.join(", "));
            }
            println!("  Overrides: {}", config.overrides.len());
            for rule in &config.overrides {
                println!(
                    "    {} -> {}",
                    rule.files.display(),
                    rule.options.specified_keys().join(", ")
                );
            }
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_plan(dir: &Path, config_path: Option<PathBuf>, json: bool) {
    let loaded = match LoadedConfig::discover(dir, config_path.as_deref(), None) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    let resolver = build_resolver(loaded.config);

    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Error walking {}: {}", dir.display(), e);
                process::exit(1);
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let resolved = resolver.resolve(relative);
        entries.push((relative.to_path_buf(), resolved));
    }

    if json {
        let output: Vec<Value> = entries
            .iter()
            .map(|(path, resolved)| {
                serde_json::json!({
                    "path": path.to_string_lossy(),
                    "parser": resolved.options.parser,
                    "print_width": resolved.options.print_width,
                    "tab_width": resolved.options.tab_width,
                    "matched_overrides": resolved.matched.len(),
                })
            })
            .collect();

        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        if entries.is_empty() {
            println!("No files found under {}", dir.display());
            return;
        }

        println!("{} files:\n", entries.len());
        for (path, resolved) in &entries {
            println!(
                "  {}  parser={} width={}{}",
                path.display(),
                resolved.options.parser.as_deref().unwrap_or("(inferred)"),
                resolved.options.print_width,
                if resolved.matched.is_empty() {
                    String::new()
                } else {
                    format!("  ({} overrides)", resolved.matched.len())
                }
            );
        }
    }
}

/// Skip VCS metadata, dependency trees, and other hidden directories.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules" || name == "target")
        .unwrap_or(false)
}

fn load_config(config_path: Option<PathBuf>, overrides: Vec<String>) -> LoadedConfig {
    let cli_layer = match parse_cli_overrides(&overrides) {
        Ok(layer) => layer,
        Err(e) => {
            eprintln!("Invalid --option value: {}", e);
            process::exit(1);
        }
    };

    match LoadedConfig::discover(Path::new("."), config_path.as_deref(), cli_layer) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

/// Parse repeated `KEY=VALUE` flags into a JSON object layer. Values parse
/// as JSON when possible (numbers, booleans) and fall back to strings, so
/// `-O trailing_comma=none` works without quoting.
fn parse_cli_overrides(overrides: &[String]) -> Result<Option<Value>, String> {
    if overrides.is_empty() {
        return Ok(None);
    }

    let mut map = serde_json::Map::new();
    for entry in overrides {
        let (key, raw) = entry
            .split_once('=')
            .ok_or_else(|| format!("'{}' is not KEY=VALUE", entry))?;
        if key.is_empty() {
            return Err(format!("'{}' has an empty key", entry));
        }

        let value = serde_json::from_str(raw).unwrap_or(Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }

    Ok(Some(Value::Object(map)))
}

fn build_resolver(config: FormatterConfig) -> Resolver {
    match Resolver::new(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Error compiling override patterns: {}", e);
            process::exit(1);
        }
    }
}
