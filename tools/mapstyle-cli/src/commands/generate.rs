//! `mapstyle generate` subcommand
//!
//! Reads the style spec document and emits `src/Mapbox/Layer.elm`.
//!
//! # Usage
//!
//! ```text
//! mapstyle generate                           # regenerate from the default spec
//! mapstyle generate --check                   # validate only (CI)
//! mapstyle generate --dry-run                 # print to stdout, don't write
//! mapstyle generate --spec path/v8.json       # custom spec path
//! mapstyle generate --spec -                  # read the spec from stdin
//! ```

use crate::error::CliResult;
use anyhow::Context;
use clap::Args;
use colored::Colorize;
use mapstyle_codegen::{generate, validate, EnumRegistry, Severity, StyleSchema, ValidationError};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Generate the Mapbox.Layer Elm module from a style spec document
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Path to the style spec JSON ('-' reads stdin)
    #[arg(long, default_value = "style-spec/v8.json")]
    pub spec: PathBuf,

    /// Output path for the generated Elm module
    #[arg(long, default_value = "src/Mapbox/Layer.elm")]
    pub out: PathBuf,

    /// Validate the spec without writing files (exit 1 if errors found)
    #[arg(long)]
    pub check: bool,

    /// Print generated output to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn execute(self) -> CliResult<()> {
        // ── Read the spec document ─────────────────────────────────────────
        let (src, origin) = if self.spec.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading spec from stdin")?;
            (buf, "<stdin>".to_string())
        } else {
            if !self.spec.exists() {
                return Err(anyhow::anyhow!(
                    "spec file not found: {}\n\
                     Hint: pass --spec with the path to the style spec v8.json,\n\
                     or '-' to read it from stdin.",
                    self.spec.display()
                )
                .into());
            }
            let buf = std::fs::read_to_string(&self.spec)
                .with_context(|| format!("reading {}", self.spec.display()))?;
            (buf, self.spec.display().to_string())
        };

        let registry = EnumRegistry::standard();
        let schema = StyleSchema::from_json(&src)
            .with_context(|| format!("parsing {origin}"))?;

        // ── Validate ───────────────────────────────────────────────────────
        let findings = validate(&schema, &registry);
        let has_errors = print_validation_results(&findings, &origin);

        if has_errors {
            return Err(
                anyhow::anyhow!("validation failed — fix the errors above and retry").into(),
            );
        }

        if self.check {
            println!("{} {} validated successfully", "✓".green(), origin);
            return Ok(());
        }

        // ── Generate ───────────────────────────────────────────────────────
        let module_src = generate(&schema, &registry)?;

        if self.dry_run {
            println!("{}  {}", "── Elm".dimmed(), self.out.display());
            print!("{module_src}");
            return Ok(());
        }

        write_if_changed(&self.out, &module_src)?;

        println!(
            "{} {} categor(ies) processed",
            "✓".green(),
            schema.categories.len()
        );

        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Print validation results and return `true` if any errors were found.
fn print_validation_results(findings: &[ValidationError], origin: &str) -> bool {
    let mut has_errors = false;
    for f in findings {
        match f.severity {
            Severity::Error => {
                eprintln!("{} [{}] {}", "✗".red(), f.location, f.message);
                has_errors = true;
            }
            Severity::Warning => {
                eprintln!("{} [{}] {}", "!".yellow(), f.location, f.message);
            }
        }
    }
    if !findings.is_empty() {
        eprintln!("  in: {origin}");
    }
    has_errors
}

/// Write `contents` to `path`, creating parent directories as needed.
/// Prints a status line indicating whether the file was created or unchanged.
fn write_if_changed(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory: {}", parent.display()))?;
    }

    let existing = std::fs::read_to_string(path).ok();
    let changed = existing.as_deref() != Some(contents);

    if changed {
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        println!("  {} {} written", "→".cyan(), path.display());
    } else {
        println!("  {} {} unchanged", "·".dimmed(), path.display());
    }

    Ok(())
}
