//! `wrb config` — show and change bridge settings.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;

use wrb_reaper::ScriptSet;
use wrb_waapi::HttpTransport;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current settings and resolved locations.
    Show,

    /// Print the settings file path.
    Path,

    /// Set the REAPER executable.
    SetExe {
        /// Path to the REAPER executable.
        path: PathBuf,
    },

    /// Set the render configuration token passed to the REAPER scripts.
    SetFormat {
        /// Opaque token as copied from REAPER.
        token: String,
    },

    /// Restore the default render configuration token.
    ResetFormat,
}

pub fn run(command: ConfigCommand, ctx: &mut AppContext) -> Result<ExitCode> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => println!("{}", ctx.paths.config_path().display()),
        ConfigCommand::SetExe { path } => {
            if !path.is_file() {
                println!(
                    "{} {} does not exist yet; saving anyway",
                    "!".yellow().bold(),
                    path.display()
                );
            }
            ctx.settings.executable_path = path;
            save(ctx)?;
            println!(
                "✓ REAPER executable set to {}",
                ctx.settings.executable_path.display()
            );
        }
        ConfigCommand::SetFormat { token } => {
            let token = token.trim();
            if token.is_empty() {
                bail!("render format token must not be empty");
            }
            ctx.settings.render_format = token.to_string();
            save(ctx)?;
            println!("✓ render format token saved");
        }
        ConfigCommand::ResetFormat => {
            ctx.settings.reset_render_format();
            save(ctx)?;
            println!(
                "✓ render format token reset to {}",
                ctx.settings.render_format
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn save(ctx: &AppContext) -> Result<()> {
    let path = ctx.paths.config_path();
    ctx.settings
        .save_at(&path)
        .with_context(|| format!("failed to save settings to {}", path.display()))?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

fn show(ctx: &AppContext) {
    let exe = &ctx.settings.executable_path;
    let exe_state = if ctx.settings.executable_exists() {
        "found".green()
    } else {
        "missing".red()
    };
    let scripts = ScriptSet::from_env();

    println!("{}", "SETTINGS".bold());
    println!("  config file     {}", ctx.paths.config_path().display());
    println!("  REAPER          {} ({exe_state})", exe.display());
    println!("  render format   {}", ctx.settings.render_format);
    println!("{}", "LOCATIONS".bold());
    println!("  selection       {}", ctx.paths.manifest_jsonl().display());
    println!("  renders         {}", ctx.paths.render_dir().display());
    println!("  log             {}", ctx.paths.log_path().display());
    println!("  scripts         {}", scripts.dir().display());
    println!("  WAAPI           {}", HttpTransport::from_env().url());
}
