//! Command-line surface: mapping file in, Go source file out.

use crate::output::write_atomic;
use anyhow::{Result, bail};
use clap::Parser;
use esgen_codegen::{
    CollisionPolicy, GenerateOptions, OverridePaths, generate_from_file, load_overrides,
    load_template, select_template,
};
use std::path::PathBuf;

/// Generate Go structs from a search-index mapping document.
#[derive(Parser, Debug, Clone)]
#[command(name = "esgen", version)]
pub struct Args {
    /// Input mapping JSON file
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Output Go file
    #[arg(long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// Name of the Go package
    #[arg(long = "package")]
    pub package_name: String,

    /// Name of the generated root struct
    #[arg(long = "struct")]
    pub struct_name: String,

    /// Name of the wrapper struct embedding the root struct
    #[arg(long = "init")]
    pub wrapper_name: Option<String>,

    /// JSON file mapping declared types to Go types
    #[arg(long, value_name = "FILE")]
    pub type_mapping: Option<PathBuf>,

    /// JSON file mapping field names to Go identifiers
    #[arg(long, value_name = "FILE")]
    pub exception_field: Option<PathBuf>,

    /// JSON file mapping field names to Go types or struct names
    #[arg(long, value_name = "FILE")]
    pub exception_type: Option<PathBuf>,

    /// JSON file listing fields to skip (`{"field": true}`)
    #[arg(long, value_name = "FILE")]
    pub skip_field: Option<PathBuf>,

    /// JSON file mapping field names to comments
    #[arg(long, value_name = "FILE")]
    pub field_comment: Option<PathBuf>,

    /// Custom output template file
    #[arg(long, value_name = "FILE")]
    pub tmpl: Option<PathBuf>,

    /// Go type used for unrecognized declared types
    #[arg(long, value_name = "TYPE")]
    pub fallback_type: Option<String>,

    /// Fail when two different sub-schemas map to the same struct name
    #[arg(long, default_value_t = false)]
    pub strict_collisions: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Rejects empty required values before any file is touched.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("--in", self.input.as_os_str().is_empty()),
            ("--out", self.output.as_os_str().is_empty()),
            ("--package", self.package_name.trim().is_empty()),
            ("--struct", self.struct_name.trim().is_empty()),
        ];
        for (flag, empty) in required {
            if empty {
                bail!("{flag} must not be empty; --in, --out, --struct and --package are required");
            }
        }
        Ok(())
    }

    fn override_paths(&self) -> OverridePaths {
        OverridePaths {
            type_mapping: self.type_mapping.clone(),
            field_exceptions: self.exception_field.clone(),
            type_exceptions: self.exception_type.clone(),
            skip_fields: self.skip_field.clone(),
            field_comments: self.field_comment.clone(),
        }
    }

    fn options(&self) -> GenerateOptions {
        let policy = if self.strict_collisions {
            CollisionPolicy::Strict
        } else {
            CollisionPolicy::FirstWins
        };
        let mut options =
            GenerateOptions::new(&self.package_name, &self.struct_name).collision_policy(policy);
        if let Some(wrapper) = self.wrapper_name.as_deref().filter(|w| !w.is_empty()) {
            options = options.wrapper(wrapper);
        }
        options
    }
}

/// Runs one generation: loads every document, renders, then writes the
/// output in a single step. Nothing is written if any step fails.
pub fn run(args: &Args) -> Result<()> {
    args.validate()?;

    let mut builder = load_overrides(&args.override_paths())?;
    if let Some(fallback) = &args.fallback_type {
        builder = builder.fallback_type(fallback);
    }
    let overrides = builder.build();

    let custom = args.tmpl.as_deref().map(load_template).transpose()?;
    let options = args.options();
    let template = select_template(custom, options.wrapper_name.is_some());

    let rendered = generate_from_file(&args.input, &options, &overrides, template.as_ref())?;

    write_atomic(&args.output, &rendered)?;
    tracing::info!("wrote {} bytes to {}", rendered.len(), args.output.display());

    println!(
        "Generated Go struct for {} and saved to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}
