/// optablegen CLI
///
/// Compiles 65xx opcode descriptors into C dispatch tables and a
/// disassembly mnemonic list.
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use optable_core::{
    generate, Artifacts, BundledDescriptors, DescriptorStore, DirectoryDescriptors,
    FormatRegistry,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output globally (for troubleshooting and development)
    #[arg(
        long,
        global = true,
        help = "Enable debug output globally (for troubleshooting and development)"
    )]
    debug: bool,
    /// Enable verbose output globally (for more detailed logs and diagnostics)
    #[arg(
        long,
        global = true,
        help = "Enable verbose output globally (for more detailed logs and diagnostics)"
    )]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dispatch tables and mnemonic list
    Generate(OutputArgs),
    /// Regenerate in memory and fail if the files on disk are stale
    Check(OutputArgs),
    /// List the addressing-mode registry
    Modes,
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Directory holding 6502.opcodes, 65c02.opcodes and 65c816.opcodes
    /// (defaults to the bundled descriptors)
    #[arg(long, value_name = "DIR")]
    descriptors: Option<PathBuf>,
    /// Directory the generated files live in
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// File name of the dispatch tables
    #[arg(long, value_name = "FILE", default_value = Artifacts::TABLES_FILE)]
    tables: PathBuf,
    /// File name of the mnemonic list
    #[arg(long, value_name = "FILE", default_value = Artifacts::MNEMONICS_FILE)]
    mnemonics: PathBuf,
}

impl OutputArgs {
    fn tables_path(&self) -> PathBuf {
        self.out_dir.join(&self.tables)
    }

    fn mnemonics_path(&self) -> PathBuf {
        self.out_dir.join(&self.mnemonics)
    }

    /// Generated content paired with its destination, tables first
    fn outputs(&self, artifacts: Artifacts) -> anyhow::Result<[(PathBuf, String); 2]> {
        let tables = self.tables_path();
        let mnemonics = self.mnemonics_path();
        if tables == mnemonics {
            bail!(
                "--tables and --mnemonics both resolve to {}",
                tables.display()
            );
        }
        Ok([(tables, artifacts.tables), (mnemonics, artifacts.mnemonics)])
    }

    fn render(&self) -> anyhow::Result<Artifacts> {
        let store: Box<dyn DescriptorStore> = match &self.descriptors {
            Some(dir) => Box::new(DirectoryDescriptors::new(dir)),
            None => Box::new(BundledDescriptors),
        };
        debug!(store = %store.describe(), "loading descriptors");
        generate(store.as_ref())
            .with_context(|| format!("Failed to generate tables from {}", store.describe()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.verbose);
    match &cli.command {
        Commands::Generate(args) => run_generate(args)?,
        Commands::Check(args) => {
            let stale = run_check(args)?;
            if !stale.is_empty() {
                for path in &stale {
                    eprintln!("stale: {}", path.display());
                }
                std::process::exit(1);
            }
        }
        Commands::Modes => print!("{}", list_modes(&FormatRegistry::standard())),
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `--debug` > `--verbose` > warnings only.
fn init_tracing(debug: bool, verbose: bool) {
    let fallback = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Renders both artifacts, stages each next to its destination, then moves
/// them into place. Nothing is persisted unless both files were staged.
fn run_generate(args: &OutputArgs) -> anyhow::Result<()> {
    let artifacts = args.render()?;
    let outputs = args.outputs(artifacts)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    let staged = outputs
        .iter()
        .map(|(path, content)| stage_output(path, content))
        .collect::<anyhow::Result<Vec<_>>>()?;
    for ((path, content), file) in outputs.iter().zip(staged) {
        file.persist(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = content.len(), "wrote output");
    }
    Ok(())
}

/// Writes `content` to a temporary file in the directory of `path`.
fn stage_output(path: &Path, content: &str) -> anyhow::Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to stage {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to stage {}", path.display()))?;
    debug!(path = %path.display(), staged = %file.path().display(), "staged output");
    Ok(file)
}

/// Returns every output path whose content is missing or out of date.
fn run_check(args: &OutputArgs) -> anyhow::Result<Vec<PathBuf>> {
    let artifacts = args.render()?;
    let mut stale = Vec::new();
    for (path, expected) in args.outputs(artifacts)? {
        let current = match std::fs::read_to_string(&path) {
            Ok(current) => Some(current),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        if current.as_deref() == Some(expected.as_str()) {
            debug!(path = %path.display(), "up to date");
        } else {
            stale.push(path);
        }
    }
    Ok(stale)
}

/// One line per registry entry: token, operand size, template.
fn list_modes(registry: &FormatRegistry) -> String {
    registry
        .entries()
        .iter()
        .map(|format| {
            let operand = format.operand.to_string();
            let line = format!("{:<6} {operand:<2} {}", format.mode.token(), format.template);
            format!("{}\n", line.trim_end())
        })
        .collect()
}
