//! refdoc: convert TypeDoc JSON projects into a simplified document model.
//!
//! Two modes:
//!
//! - **stdin mode**: `refdoc < project.json`
//! - **file mode**: `refdoc -o docs/api build/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use refdoc::{create_renderer, ContainerDoc, Reflection, TypeScriptResolver, Visitor, VisitorOptions};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "refdoc",
    about = "Convert a TypeDoc JSON project into a simplified document model"
)]
struct Cli {
    /// Project JSON files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Documentation renderer: markdown (default), plain
    #[arg(short = 'r', long, default_value = "markdown")]
    renderer: String,

    /// Include members that are not exported
    #[arg(long)]
    include_non_exported: bool,

    /// JSON options file (e.g. typedoc.json); only includeNonExported is read
    #[arg(long)]
    options: Option<PathBuf>,

    /// Directory source file names are made relative to (default: current directory)
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let options = resolve_options(&cli)?;
    let cwd = resolve_cwd(cli.cwd.as_deref())?;
    let renderer = create_renderer(&cli.renderer)?;
    debug!(renderer = renderer.name(), ?options, "visitor configured");
    let visitor = Visitor::new(renderer.as_ref(), &TypeScriptResolver, options, cwd);

    if cli.files.is_empty() {
        return stdin_mode(&cli, &visitor);
    }

    file_mode(&cli, &visitor)
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Defaults, then the options file, then the command-line flag.
fn resolve_options(cli: &Cli) -> Result<VisitorOptions> {
    let mut options = match cli.options {
        Some(ref path) => VisitorOptions::load(path)?,
        None => VisitorOptions::default(),
    };
    if cli.include_non_exported {
        options.include_non_exported = true;
    }
    Ok(options)
}

fn resolve_cwd(arg: Option<&Path>) -> Result<PathBuf> {
    let current = env::current_dir().context("failed to resolve working directory")?;
    Ok(match arg {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => current.join(dir),
        None => current,
    })
}

/// stdin mode: read one project from stdin, write its entries to stdout.
fn stdin_mode(cli: &Cli, visitor: &Visitor) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let project = Reflection::from_json(&input)?;
    let entries = visitor.visit_project(&project);
    print!("{}", to_json(&entries, cli.compact)?);
    Ok(())
}

/// file mode: visit every input project and write one output file per project.
fn file_mode(cli: &Cli, visitor: &Visitor) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for path in expand_globs(&cli.files)? {
        let project = match read_project(&path) {
            Ok(project) => project,
            Err(e) => {
                warn!("skipping {}: {:#}", path.display(), e);
                continue;
            }
        };

        let entries = visitor.visit_project(&project);
        let out_path = output_dir.join(format!("{}.docs.json", derive_output_name(&path)));
        fs::write(&out_path, to_json(&entries, cli.compact)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(entries = entries.len(), "wrote {}", out_path.display());
    }

    Ok(())
}

fn read_project(path: &Path) -> Result<Reflection> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Reflection::from_json(&content)
}

fn to_json(entries: &[ContainerDoc], compact: bool) -> Result<String> {
    let mut out = if compact {
        serde_json::to_string(entries)
    } else {
        serde_json::to_string_pretty(entries)
    }
    .context("failed to serialize document entries")?;
    out.push('\n');
    Ok(out)
}

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for project JSON files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_project_file(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// JSON files that are not our own output.
fn is_project_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.ends_with(".json") && !name.ends_with(".docs.json")
}

/// "build/api.json" → "api"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_json() {
        assert_eq!(derive_output_name(Path::new("build/api.json")), "api");
        assert_eq!(derive_output_name(Path::new("api.json")), "api");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name(Path::new("project")), "project");
    }

    #[test]
    fn project_files_skip_own_output() {
        assert!(is_project_file(Path::new("out/api.json")));
        assert!(!is_project_file(Path::new("out/api.docs.json")));
        assert!(!is_project_file(Path::new("out/api.ts")));
    }

    #[test]
    fn relative_cwd_is_anchored() {
        let cwd = resolve_cwd(Some(Path::new("sub"))).unwrap();
        assert!(cwd.is_absolute());
        assert!(cwd.ends_with("sub"));
        assert_eq!(resolve_cwd(Some(Path::new("/abs"))).unwrap(), PathBuf::from("/abs"));
    }

    #[test]
    fn compact_json_is_one_line() {
        let out = to_json(&[], true).unwrap();
        assert_eq!(out, "[]\n");
    }
}
