use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chanpack", version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack a preset into an RGBA PNG.
    Pack(PackArgs),
    /// Check that every source of a preset can be packed.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Input preset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path. Defaults to the preset path with a `.png` extension.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Sample the four channels in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input preset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Upscale too-small or misshapen sources in place.
    #[arg(long, default_value_t = false)]
    fix: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn preset_root(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let preset = chanpack::PackPreset::from_path(&args.in_path)?;
    let request = preset
        .resolve(preset_root(&args.in_path))
        .with_context(|| format!("resolve preset '{}'", args.in_path.display()))?;

    let opts = chanpack::PackOptions {
        parallel: args.parallel,
        threads: args.threads,
    };
    let packed = chanpack::pack_with(&request, opts)?;

    let out = args
        .out
        .unwrap_or_else(|| chanpack::PackPreset::default_output_path(&args.in_path));
    let existed = out.is_file();
    packed.write_png(&out)?;

    let verb = if existed { "updated" } else { "created" };
    eprintln!("{verb} {}", out.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let preset = chanpack::PackPreset::from_path(&args.in_path)?;
    let side = preset.texture_size.side();

    let mut unresolved = 0usize;
    for (slot, path) in preset.source_paths(preset_root(&args.in_path)) {
        let source = match chanpack::load_image(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}: {e}", slot.name(), path.display());
                unresolved += 1;
                continue;
            }
        };

        let issues = chanpack::check_source(&source, side);
        if issues.is_empty() {
            eprintln!("{}: {}: ok", slot.name(), path.display());
            continue;
        }
        for issue in &issues {
            eprintln!("{}: {}: {issue}", slot.name(), path.display());
        }

        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        let fix = args.fix && is_png;
        if args.fix && !is_png {
            eprintln!("{}: {}: only png sources are fixed in place", slot.name(), path.display());
        }

        if fix && issues.iter().any(|i| i.fixable_by_upscale()) {
            let target = source.width.max(source.height).max(side).next_power_of_two();
            let fixed = chanpack::upscale_bilinear(&source, target)?;
            image::save_buffer_with_format(
                &path,
                &fixed.rgba8,
                fixed.width,
                fixed.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", path.display()))?;
            eprintln!("{}: {}: upscaled to {target}", slot.name(), path.display());
        }

        unresolved += issues
            .iter()
            .filter(|i| !(fix && i.fixable_by_upscale()))
            .count();
    }

    if unresolved > 0 {
        anyhow::bail!("{unresolved} source issue(s) remain");
    }
    Ok(())
}
