use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use tools::{
    decode_update_output, format_decode_pretty, inspect_update, CaptureManifest, InspectReport,
};

#[derive(Parser)]
#[command(
    name = "tickrep-tools",
    version,
    about = "tickrep capture inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect capture structure and sizes.
    Inspect {
        /// Path to a capture file or a directory of captures.
        capture_path: PathBuf,
        /// Optional manifest JSON for per-object summaries.
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Limit the number of inspected captures.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a capture into structured JSON.
    Decode {
        /// Path to the capture file.
        capture_file: PathBuf,
        /// Manifest JSON describing the capture contents.
        #[arg(long)]
        manifest: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Print a manifest's registry hash.
    Hash {
        /// Manifest JSON.
        manifest: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            capture_path,
            manifest,
            glob,
            limit,
        } => {
            let manifest = manifest
                .as_ref()
                .map(|path| load_manifest(path))
                .transpose()
                .context("load manifest")?;
            if capture_path.is_dir() {
                let mut entries = collect_captures(&capture_path, glob.as_deref())?;
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for path in entries {
                    let bytes = fs::read(&path)
                        .with_context(|| format!("read capture {}", path.display()))?;
                    let report =
                        inspect_update(&bytes, manifest.as_ref(), &wire::Limits::default())?;
                    println!("== {} ==", path.display());
                    print_inspect_report(&report);
                }
            } else {
                let bytes = fs::read(&capture_path)
                    .with_context(|| format!("read capture {}", capture_path.display()))?;
                let report = inspect_update(&bytes, manifest.as_ref(), &wire::Limits::default())?;
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            capture_file,
            manifest,
            format,
        } => {
            let bytes = fs::read(&capture_file)
                .with_context(|| format!("read capture {}", capture_file.display()))?;
            let manifest = load_manifest(&manifest).context("load manifest")?;
            let output = decode_update_output(
                &bytes,
                &manifest,
                &wire::Limits::default(),
                &codec::CodecLimits::default(),
            )?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::Hash { manifest } => {
            let manifest = load_manifest(&manifest).context("load manifest")?;
            println!("0x{:016X}", manifest.registry_hash());
        }
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<CaptureManifest> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let manifest: CaptureManifest =
        serde_json::from_str(&contents).context("parse manifest json")?;
    manifest.build_table().context("validate manifest")?;
    Ok(manifest)
}

fn collect_captures(dir: &Path, filter: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = filter
        .map(Pattern::new)
        .transpose()
        .context("parse glob pattern")?;

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let name = entry.file_name();
            if !pattern.matches(&name.to_string_lossy()) {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}

fn print_inspect_report(report: &InspectReport) {
    let kind = if report.delta { "delta" } else { "absolute" };
    println!(
        "{} bytes, tick {}, {kind}, {} object(s)",
        report.total_bytes, report.tick, report.object_count
    );
    if let Some(objects) = &report.objects {
        for object in objects {
            println!(
                "  object {}: {} field(s), {} bytes",
                object.object_id, object.field_count, object.encoded_bytes
            );
        }
    }
}
