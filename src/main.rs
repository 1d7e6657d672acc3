// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! file-renaming: batch file renamer
//!
//! Renames files by textual rules or with names proposed by an
//! OpenAI-compatible model.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use file_renaming::ai::{ChatClient, NameGenerator};
use file_renaming::config::templates::PromptTemplates;
use file_renaming::config::ConfigDir;
use file_renaming::rename::plan::{plan_external, plan_pattern};
use file_renaming::rename::{PlanItem, RenamePlan};
use file_renaming::walker::collect_files;
use file_renaming::{
    plan_and_apply_external_rename, plan_and_apply_generated_rename,
    plan_and_apply_pattern_rename, BatchResult, CaseMode, FileEntry, FileRenamingError,
    PatternRule, Result,
};

/// file-renaming CLI - batch file renamer
#[derive(Parser, Debug)]
#[command(name = "file-renaming")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Rename batches of files by rule or with AI-generated names", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding ai_config.json and prompt_templates.json
    /// (default: per-user config directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename files with textual rules
    Rename {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Expand directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Only rename files matching this glob (e.g. "*.txt")
        #[arg(short, long, default_value = "")]
        pattern: String,

        /// Substring to replace
        #[arg(long, default_value = "")]
        replace_from: String,

        /// Replacement (may be empty)
        #[arg(long, default_value = "")]
        replace_to: String,

        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, default_value = "")]
        suffix: String,

        /// Case folding
        #[arg(long = "case", default_value = "none", value_parser = ["none", "lower", "upper", "title"])]
        case_mode: String,

        /// First sequence number
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        number_start: i64,

        /// Sequence step (0 still advances by one)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        number_step: i64,

        /// Show the plan without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename files with names generated by the configured model
    Ai {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Expand directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Free-text instruction for the model
        #[arg(short, long, conflicts_with = "template", required_unless_present = "template")]
        prompt: Option<String>,

        /// Use a saved prompt template by name
        #[arg(short, long)]
        template: Option<String>,

        /// Show the generated names and plan without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename files to the given base names, one per file in order
    ApplyNames {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Expand directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// New base name (repeat once per file; extension is kept)
        #[arg(short, long = "name", required = true)]
        names: Vec<String>,

        /// Show the plan without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// List models offered by the configured API
    Models {
        /// Provider-specific model type filter
        #[arg(short = 't', long = "type")]
        model_type: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Prompt template management
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration (API key redacted)
    Show,

    /// Update configuration values
    Set {
        #[arg(long)]
        api_key: Option<String>,

        /// API base URL (default: SiliconFlow)
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Print the configuration directory
    Path,
}

#[derive(Subcommand, Debug)]
enum TemplateCommands {
    /// List saved templates
    List,

    /// Add a template, replacing one with the same name
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        content: String,
    },

    /// Remove a template by name
    Remove {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Only the AI, config and template commands need the config directory
    let dirs = match cli.config_dir {
        Some(dir) => Ok(ConfigDir::at(dir)),
        None => ConfigDir::user(),
    };

    match cli.command {
        Commands::Rename {
            paths,
            recursive,
            pattern,
            replace_from,
            replace_to,
            prefix,
            suffix,
            case_mode,
            number_start,
            number_step,
            dry_run,
        } => {
            let rule = PatternRule {
                glob_pattern: pattern,
                replace_from,
                replace_to,
                prefix,
                suffix,
                case_mode: case_mode.parse::<CaseMode>()?,
                number_start,
                number_step,
            };
            run_rename(&paths, recursive, &rule, dry_run, &cli.format)
        }
        Commands::Ai { paths, recursive, prompt, template, dry_run } => {
            run_ai(&dirs?, &paths, recursive, prompt, template, dry_run, &cli.format).await
        }
        Commands::ApplyNames { paths, recursive, names, dry_run } => {
            run_apply_names(&paths, recursive, &names, dry_run, &cli.format)
        }
        Commands::Models { model_type } => {
            run_models(&dirs?, model_type.as_deref(), &cli.format).await
        }
        Commands::Config { action } => run_config_command(&dirs?, action),
        Commands::Templates { action } => run_templates_command(&dirs?, action, &cli.format),
    }
}

fn gather(paths: &[PathBuf], recursive: bool) -> Vec<FileEntry> {
    let files = collect_files(paths, recursive);
    info!("Collected {} file(s)", files.len());
    files
}

/// Run a rule-based rename
fn run_rename(
    paths: &[PathBuf],
    recursive: bool,
    rule: &PatternRule,
    dry_run: bool,
    format: &str,
) -> Result<()> {
    let files = gather(paths, recursive);
    if files.is_empty() {
        warn!("No files to rename");
        return Ok(());
    }

    if dry_run {
        let plan = plan_pattern(&files, rule)?;
        return print_plan(&plan, format);
    }

    let result = plan_and_apply_pattern_rename(&files, rule)?;
    report(result, format)
}

/// Run an AI rename: generate names remotely, then plan and apply
async fn run_ai(
    dirs: &ConfigDir,
    paths: &[PathBuf],
    recursive: bool,
    prompt: Option<String>,
    template: Option<String>,
    dry_run: bool,
    format: &str,
) -> Result<()> {
    let instruction = match (prompt, template) {
        (Some(prompt), _) => prompt,
        (None, Some(name)) => {
            let templates = PromptTemplates::load(&dirs.templates_path())?;
            templates
                .get(&name)
                .map(|t| t.content.clone())
                .ok_or_else(|| {
                    FileRenamingError::Validation(format!("No template named '{}'", name))
                })?
        }
        (None, None) => {
            return Err(FileRenamingError::Validation("A prompt or template is required".to_string()))
        }
    };

    let files = gather(paths, recursive);
    let config = dirs.load_ai_config()?;
    let client = ChatClient::new(&config)?;
    info!("Requesting names from {}", client.model());

    if dry_run {
        let names = client.generate_names(&files, &instruction).await?;
        let plan = plan_external(&files, &names)?;
        return print_plan(&plan, format);
    }

    let result = plan_and_apply_generated_rename(&client, &files, &instruction).await?;
    report(result, format)
}

/// Apply names given on the command line
fn run_apply_names(
    paths: &[PathBuf],
    recursive: bool,
    names: &[String],
    dry_run: bool,
    format: &str,
) -> Result<()> {
    let files = gather(paths, recursive);

    if dry_run {
        let plan = plan_external(&files, names)?;
        return print_plan(&plan, format);
    }

    let result = plan_and_apply_external_rename(&files, names)?;
    report(result, format)
}

/// Print a plan without touching the filesystem
fn print_plan(plan: &RenamePlan, format: &str) -> Result<()> {
    match format {
        "json" => {
            let output: Vec<serde_json::Value> = plan.items().iter().map(|item| match item {
                PlanItem::Rename(entry) => serde_json::json!({
                    "source": entry.source.full_path.to_string_lossy(),
                    "target": entry.target_path.to_string_lossy(),
                }),
                PlanItem::Unresolvable { source, error } => serde_json::json!({
                    "source": source.full_path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            for item in plan.items() {
                match item {
                    PlanItem::Rename(entry) => println!("DRY RUN: {} -> {}",
                        entry.source.full_path.display(),
                        entry.target_path.display()
                    ),
                    PlanItem::Unresolvable { error, .. } => println!("DRY RUN: {}", error),
                }
            }
            println!("\n{} file(s) would be renamed", plan.entries().count());
        }
    }
    Ok(())
}

/// Print a batch result. A partial failure becomes an error so the exit
/// status reflects it.
fn report(result: BatchResult, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            for entry in &result.renamed {
                println!("{} -> {}", entry.source.full_path.display(), entry.target_path.display());
            }
            for error in &result.errors {
                eprintln!("Error: {}", error);
            }
            println!("\nRenamed {} file(s), {} failed", result.renamed.len(), result.errors.len());
        }
    }
    result.into_result().map(|_| ())
}

/// List available models
async fn run_models(dirs: &ConfigDir, model_type: Option<&str>, format: &str) -> Result<()> {
    let config = dirs.load_ai_config()?;
    let client = ChatClient::new(&config)?;
    let models = client.list_models(model_type).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&models)?),
        _ => {
            println!("Available models:");
            for m in &models {
                let marker = if m.id == client.model() { "→" } else { " " };
                println!("  {} {}", marker, m.id);
            }
        }
    }
    Ok(())
}

/// Run config commands
fn run_config_command(dirs: &ConfigDir, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = dirs.load_ai_config()?;
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        }
        ConfigCommands::Set { api_key, base_url, model } => {
            if api_key.is_none() && base_url.is_none() && model.is_none() {
                return Err(FileRenamingError::Validation(
                    "Nothing to set; pass --api-key, --base-url or --model".to_string(),
                ));
            }

            let mut config = dirs.load_ai_config()?;
            match (api_key, base_url) {
                (Some(key), url) => config.set_api_key(&key, url.as_deref())?,
                (None, Some(url)) => config.base_url = url.trim().to_string(),
                (None, None) => {}
            }
            if let Some(model) = model {
                config.set_model(&model)?;
            }

            dirs.save_ai_config(&config)?;
            println!("Saved configuration to {:?}", dirs.ai_config_path());
        }
        ConfigCommands::Path => {
            println!("{}", dirs.root().display());
        }
    }

    Ok(())
}

/// Run template commands
fn run_templates_command(dirs: &ConfigDir, action: TemplateCommands, format: &str) -> Result<()> {
    let path = dirs.templates_path();
    let mut templates = PromptTemplates::load(&path)?;

    match action {
        TemplateCommands::List => match format {
            "json" => println!("{}", serde_json::to_string_pretty(&templates)?),
            _ => {
                for t in &templates.templates {
                    println!("{}: {}", t.name, t.content);
                }
            }
        },
        TemplateCommands::Add { name, content } => {
            templates.upsert(&name, &content)?;
            templates.save(&path)?;
            println!("Saved template '{}'", name);
        }
        TemplateCommands::Remove { name } => {
            if !templates.remove(&name) {
                return Err(FileRenamingError::Validation(format!("No template named '{}'", name)));
            }
            templates.save(&path)?;
            println!("Removed template '{}'", name);
        }
    }

    Ok(())
}
