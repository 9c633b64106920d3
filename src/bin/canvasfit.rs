use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "canvasfit", version)]
struct Cli {
    /// Canvas/mode configuration JSON (defaults to the built-in 1920x1080 table).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a two-set diagram layout and print it as JSON.
    Layout(LayoutArgs),
    /// Validate visualization JSON against a rendering mode.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Elements only in the first set.
    #[arg(long)]
    a_only: usize,

    /// Elements only in the second set.
    #[arg(long)]
    b_only: usize,

    /// Elements in both sets.
    #[arg(long)]
    shared: usize,

    /// Lay out inside this mode's safe area.
    #[arg(long, value_enum, default_value_t = ModeChoice::Full)]
    mode: ModeChoice,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input visualization JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Rendering mode to validate against.
    #[arg(long, value_enum, default_value_t = ModeChoice::Full)]
    mode: ModeChoice,

    /// Repair what the fix policy allows before reporting.
    #[arg(long)]
    fix: bool,

    /// Where to write the repaired JSON (requires --fix).
    #[arg(long, requires = "fix")]
    out: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Full,
    Split,
    #[value(name = "stepByStep", alias = "step-by-step")]
    StepByStep,
}

impl From<ModeChoice> for canvasfit::RenderMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::Full => canvasfit::RenderMode::Full,
            ModeChoice::Split => canvasfit::RenderMode::Split,
            ModeChoice::StepByStep => canvasfit::RenderMode::StepByStep,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args, &config),
        Command::Validate(args) => cmd_validate(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<canvasfit::CanvasConfig> {
    let config = match path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f)).with_context(|| "parse config JSON")?
        }
        None => canvasfit::CanvasConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_data_json(path: &Path) -> anyhow::Result<canvasfit::VisualizationData> {
    let f = File::open(path).with_context(|| format!("open visualization '{}'", path.display()))?;
    let data: canvasfit::VisualizationData = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse visualization JSON")?;
    Ok(data)
}

fn cmd_layout(args: LayoutArgs, config: &canvasfit::CanvasConfig) -> anyhow::Result<()> {
    let mode = canvasfit::RenderMode::from(args.mode);
    let counts = canvasfit::VennCounts::new(args.a_only, args.b_only, args.shared);
    let layout = canvasfit::LayoutCalculator::new(config)
        .compute_layout_in(config.safe_area_for(mode), counts)?;

    for w in &layout.warnings {
        tracing::warn!(%mode, "{w}");
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut out, &layout).with_context(|| "write layout JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs, config: &canvasfit::CanvasConfig) -> anyhow::Result<()> {
    let mode = canvasfit::RenderMode::from(args.mode);
    let data = read_data_json(&args.in_path)?;

    let report = if args.fix {
        let outcome = canvasfit::validate_and_fix(&data, mode, config);
        if let Some(out_path) = &args.out {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out_path)
                .with_context(|| format!("create '{}'", out_path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &outcome.data)
                .with_context(|| format!("write fixed JSON '{}'", out_path.display()))?;
            w.flush()?;
            eprintln!("wrote {}", out_path.display());
        }
        outcome.report
    } else {
        canvasfit::validate(&data, mode, config)
    };

    tracing::info!(
        %mode,
        kind = data.kind(),
        valid = report.valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        auto_fixed = report.auto_fixed,
        "validation finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    if !report.valid {
        anyhow::bail!("{} validation error(s) remain", report.errors.len());
    }
    Ok(())
}
