//! Git Profile CLI
//!
//! Command-line interface for saving git identities and switching between them.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use git_profile::config::Settings;
use git_profile::identity::{GitCli, Scope};
use git_profile::storage::ProfileStore;
use git_profile::switcher::ProfileSwitcher;
use git_profile::utils::parsing::{format_profile_row, parse_scope, resolve_selector};
use git_profile::ProfileError;

type Switcher = ProfileSwitcher<GitCli>;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Git identity profile manager
#[derive(Parser, Debug)]
#[command(name = "git-profile")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile file (default: ~/.git_profile_manager.json, or $GIT_PROFILE_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Run git in this directory instead of the current one
    #[arg(short = 'C', long = "repo", global = true)]
    repo: Option<PathBuf>,

    /// git program to invoke (default: git, or $GIT_PROFILE_GIT)
    #[arg(long, global = true)]
    git: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the identity git currently uses
    #[command(visible_alias = "refresh")]
    Current,

    /// List saved profiles
    List,

    /// Show a single saved profile
    Show {
        /// Profile name or list position
        profile: String,
    },

    /// Save a new profile
    Add {
        /// Profile name (defaults to the current name with --from-current)
        profile_name: Option<String>,

        /// Identity name (user.name)
        #[arg(short, long)]
        name: Option<String>,

        /// Identity email (user.email)
        #[arg(short, long)]
        email: Option<String>,

        /// Fill missing fields from the current git identity
        #[arg(long)]
        from_current: bool,

        /// Overwrite an existing profile of the same name without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Apply a saved profile, backing up the current identity first
    Apply {
        /// Profile name or list position
        profile: String,

        /// Where to apply: local (repository) or global
        #[arg(short, long, default_value = "local", value_parser = parse_scope)]
        scope: Scope,
    },

    /// Save the current identity as a backup profile if it is not saved yet
    Backup,

    /// Delete a saved profile
    Delete {
        /// Profile name or list position
        profile: String,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::resolve(args.store, args.git, args.repo)
        .context("Failed to resolve settings")?;
    let mut switcher = ProfileSwitcher::new(
        ProfileStore::new(&settings.store_path),
        GitCli::from_settings(&settings),
    );

    match args.command {
        Command::Current => cmd_current(&switcher),
        Command::List => cmd_list(&switcher),
        Command::Show { profile } => cmd_show(&switcher, &profile),
        Command::Add {
            profile_name,
            name,
            email,
            from_current,
            force,
        } => cmd_add(&mut switcher, profile_name, name, email, from_current, force),
        Command::Apply { profile, scope } => cmd_apply(&mut switcher, &profile, scope),
        Command::Backup => cmd_backup(&mut switcher),
        Command::Delete { profile, yes } => cmd_delete(&mut switcher, &profile, yes),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_current(switcher: &Switcher) -> Result<()> {
    let identity = switcher.current_identity();

    println!("👤 Current Git Configuration");
    println!("  Name:  {}", identity.name);
    println!("  Email: {}", identity.email);
    Ok(())
}

fn cmd_list(switcher: &Switcher) -> Result<()> {
    let profiles = switcher.profiles();

    if profiles.is_empty() {
        println!("ℹ️  No saved profiles.");
        return Ok(());
    }

    println!("📋 Saved profiles ({}):", profiles.len());
    for (i, profile) in profiles.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, format_profile_row(profile));
    }
    Ok(())
}

fn cmd_show(switcher: &Switcher, selector: &str) -> Result<()> {
    let index = resolve_selector(switcher.profiles(), selector)?;
    let profile = &switcher.profiles()[index];

    println!("👤 Profile #{}: {}", index + 1, profile.profile_name);
    println!("  Name:  {}", profile.name);
    println!("  Email: {}", profile.email);
    Ok(())
}

fn cmd_add(
    switcher: &mut Switcher,
    profile_name: Option<String>,
    name: Option<String>,
    email: Option<String>,
    from_current: bool,
    force: bool,
) -> Result<()> {
    let (profile_name, name, email) = if from_current {
        let current = switcher.current_identity();
        if !current.is_configured() {
            return Err(ProfileError::NotConfigured.into());
        }
        (
            profile_name.unwrap_or_else(|| current.name.clone()),
            name.unwrap_or_else(|| current.name.clone()),
            email.unwrap_or(current.email),
        )
    } else {
        (
            profile_name.unwrap_or_default(),
            name.unwrap_or_default(),
            email.unwrap_or_default(),
        )
    };

    let exists = switcher.position(profile_name.trim()).is_some();
    let overwrite = force
        || (exists
            && confirm(&format!(
                "Profile '{}' already exists. Overwrite?",
                profile_name.trim()
            ))?);

    switcher
        .add_profile(&profile_name, &name, &email, overwrite)
        .context("Failed to add profile")?;

    println!("✅ Profile '{}' added successfully!", profile_name.trim());
    Ok(())
}

fn cmd_apply(switcher: &mut Switcher, selector: &str, scope: Scope) -> Result<()> {
    let index = resolve_selector(switcher.profiles(), selector)?;
    let profile = switcher.profiles()[index].clone();

    let outcome = switcher
        .apply_profile(&profile, scope)
        .with_context(|| format!("Failed to apply profile '{}'", profile.profile_name))?;

    println!(
        "✅ Profile '{}' applied {}!",
        outcome.profile_name,
        outcome.scope.describe()
    );
    if let Some(backup) = &outcome.backup {
        println!(
            "   Previous configuration was automatically backed up as '{}'.",
            backup
        );
    }
    println!("   Now using: {}", outcome.identity);
    Ok(())
}

fn cmd_backup(switcher: &mut Switcher) -> Result<()> {
    match switcher
        .backup_current_profile()
        .context("Failed to back up current identity")?
    {
        Some(name) => println!("✅ Current identity saved as '{}'.", name),
        None => println!("ℹ️  Nothing to back up: identity is unset or already saved."),
    }
    Ok(())
}

fn cmd_delete(switcher: &mut Switcher, selector: &str, yes: bool) -> Result<()> {
    let index = resolve_selector(switcher.profiles(), selector)?;
    let profile_name = switcher.profiles()[index].profile_name.clone();

    let confirmed = yes
        || confirm(&format!(
            "Are you sure you want to delete profile '{}'?",
            profile_name
        ))?;

    match switcher
        .delete_profile(index, confirmed)
        .context("Failed to delete profile")?
    {
        Some(removed) => println!("✅ Profile '{}' deleted.", removed.profile_name),
        None => println!("⚠️  Deletion cancelled."),
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// Ask a yes/no question on the terminal. Non-interactive input answers no.
fn confirm(question: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
