// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::{default::example_config, ConvConfig, ConventionKind};
use crate::conventions::{RuleSet, ValidationResult};
use crate::error::{ConfigError, ConvError, Result, ResultExt, ValidationFailure};
use crate::hooks::HookManager;
use crate::report::{OutputFormat, Reporter};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::Read;
use std::path::Path;

use super::args::{BranchArgs, CheckArgs, Cli, Commands, CommitsArgs, HooksAction, InitArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Check(args) => run_check(&cli, args),
        Commands::Branch(args) => run_branch(&cli, args),
        Commands::Commits(args) => run_commits(&cli, args),
        Commands::List => run_list(&cli),
        Commands::Hooks(args) => run_hooks(args.action),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Load the rule set, honouring `--config`.
fn load_rules(cli: &Cli) -> Result<RuleSet> {
    let config = match &cli.config {
        Some(path) => ConvConfig::load_from(path)?,
        None => ConvConfig::load()?,
    };
    Ok(RuleSet::from_config(&config)?)
}

/// Run the check command.
fn run_check(cli: &Cli, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let rules = load_rules(cli)?;

    let (input, kind) = match (args.input, &args.file) {
        (_, Some(path)) => (read_message(path)?, ConventionKind::Commit),
        (Some(input), None) => (input, ConventionKind::Branch),
        (None, None) => {
            return Err(ConvError::WithContext {
                context: "check".to_string(),
                message: "nothing to check: pass an input or --file".to_string(),
            })
        }
    };

    let name = args
        .convention
        .as_deref()
        .unwrap_or_else(|| rules.default_name(kind));

    let result = rules.check(&input, name)?;
    finish(cli, vec![result])
}

/// Run the branch command.
fn run_branch(cli: &Cli, args: BranchArgs) -> Result<()> {
    tracing::debug!("Running branch command with args: {:?}", args);

    let rules = load_rules(cli)?;
    let result = rules.check_current_branch(args.convention.as_deref())?;
    finish(cli, vec![result])
}

/// Run the commits command.
fn run_commits(cli: &Cli, args: CommitsArgs) -> Result<()> {
    tracing::debug!("Running commits command with args: {:?}", args);

    let rules = load_rules(cli)?;
    let results = rules.check_commits(&args.range, args.convention.as_deref())?;
    finish(cli, results)
}

/// Print results and turn failures into the exit status.
fn finish(cli: &Cli, results: Vec<ValidationResult>) -> Result<()> {
    let reporter = Reporter::new(cli.format, cli.use_color());
    let shown: Vec<ValidationResult> = if cli.quiet {
        results.iter().filter(|r| !r.passed).cloned().collect()
    } else {
        results.clone()
    };

    if !shown.is_empty() || cli.format == OutputFormat::Json {
        println!("{}", reporter.render(&shown));
    }

    let failed: Vec<&ValidationResult> = results.iter().filter(|r| !r.passed).collect();
    match failed.as_slice() {
        [] => Ok(()),
        [only] => (*only).clone().into_result().map_err(ConvError::from),
        many => Err(ValidationFailure::batch(many.len(), results.len()).into()),
    }
}

/// Read a commit message from a file, or stdin for `-`.
fn read_message(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading message from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).context(format!("reading {}", path.display()))
    }
}

/// Run the list command.
fn run_list(cli: &Cli) -> Result<()> {
    let rules = load_rules(cli)?;

    match cli.format {
        OutputFormat::Json => {
            let list: Vec<_> = rules
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "name": c.name(),
                        "kind": c.kind(),
                        "pattern": c.pattern(),
                        "description": c.description(),
                        "max_length": c.max_length(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&list).context("encoding conventions")?
            );
        }
        OutputFormat::Text => {
            let color = cli.use_color();
            for c in rules.iter() {
                let is_default = rules.default_name(c.kind()) == c.name();
                println!(
                    "{} ({}){}",
                    console::style(c.name()).bold().force_styling(color),
                    c.kind(),
                    if is_default { " [default]" } else { "" }
                );
                println!("  {}", c.description());
                println!("  {}", console::style(c.pattern()).dim().force_styling(color));
            }
        }
    }

    Ok(())
}

/// Run the hooks command.
fn run_hooks(action: HooksAction) -> Result<()> {
    tracing::debug!("Running hooks command: {:?}", action);

    let manager = HookManager::new()?;

    match action {
        HooksAction::Install { hook, force } => match hook {
            Some(name) => {
                manager.install_hook(&name, force)?;
                println!("✓ Installed {} hook", name);
            }
            None => {
                manager.install_all(force)?;
                println!("✓ Installed all hooks");
            }
        },
        HooksAction::Uninstall { hook } => match hook {
            Some(name) => {
                manager.uninstall_hook(&name)?;
                println!("✓ Uninstalled {} hook", name);
            }
            None => {
                manager.uninstall_all()?;
                println!("✓ Uninstalled all hooks");
            }
        },
        HooksAction::Status => {
            for (hook, installed) in manager.status() {
                let icon = if installed { "✓" } else { "✗" };
                println!("{} {}", icon, hook);
            }
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("convcheck.toml");

    if config_path.exists() && !args.force {
        if !Term::stdout().is_term() {
            return Err(ConfigError::AlreadyExists {
                path: config_path.to_path_buf(),
            }
            .into());
        }

        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("convcheck.toml already exists. Overwrite it?")
            .default(false)
            .interact()?;
        if !overwrite {
            return Err(ConvError::Cancelled);
        }
    }

    std::fs::write(config_path, example_config()).context("writing convcheck.toml")?;
    println!("✓ Created convcheck.toml");

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("convcheck {}", crate::version::version_string());

    if let Some(sha) = crate::version::git_sha() {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::git_commit_date() {
        println!("commit date: {}", date);
    }

    Ok(())
}
