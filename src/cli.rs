use crate::{
    config::Config,
    engine::{AnalysisService, HttpAnalysisService, ImagePayload},
    export,
    label::{batch::scan_dir, script, HexColor, LabelSession},
    query::QuerySession,
    report::{self, CheckReport},
    util::{ensure_dir, now_rfc3339, sha256_hex},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

#[derive(Parser, Debug)]
#[command(name = "palette-check")]
#[command(about = "60-30-10 color rule checker and ground-truth palette labeling tool")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./palette-check.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the analysis service answers.
    Doctor {},
    /// Submit an image and print its 60-30-10 verdict.
    Check {
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print a JSON report instead of the text rendering.
        #[arg(long)]
        json: bool,
    },
    /// Label the images of a directory with primary/secondary/accent colors.
    Label {
        #[arg(long)]
        dir: PathBuf,
        /// Read commands from a file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,
        /// Export target; defaults to labeling.export_filename.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read an exported label file and print its entries.
    Import {
        #[arg(long)]
        input: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(p) => Config::load(&p)?,
        None => Config::default(),
    };
    let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg).as_deref())?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg),
        Command::Check { image, json } => check(&cfg, image.as_deref(), *json),
        Command::Label { dir, script, out } => label(&cfg, dir, script.as_deref(), out.as_deref()),
        Command::Import { input } => import(input),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    ["palette-check.toml", "palette-check.example.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args.log_level.as_deref().unwrap_or(&cfg.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout is reserved for reports and exports.
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);
    let mut layers: Vec<BoxedLayer> = vec![if cfg.logging.json {
        console.json().boxed()
    } else {
        console.boxed()
    }];

    let mut guard = None;
    if let Some(path) = file_path {
        let (layer, g) = log_file_layer(path)?;
        layers.push(layer);
        guard = Some(g);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn log_file_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create log file: {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .boxed();
    Ok((layer, guard))
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from("palette-check.log"))
}

fn doctor(cfg: &Config) -> Result<()> {
    let service = HttpAnalysisService::new(cfg)?;
    let status = service.status()?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    if !status.reachable {
        return Err(anyhow!("analysis service not reachable at {}", status.base_url));
    }
    Ok(())
}

fn check(cfg: &Config, image: Option<&Path>, json: bool) -> Result<()> {
    let payload = image
        .map(|p| ImagePayload::from_path(p).with_context(|| format!("reading image: {}", p.display())))
        .transpose()?;
    let digest = payload.as_ref().map(|p| sha256_hex(&p.bytes));

    let service = HttpAnalysisService::new(cfg)?;
    let mut session = QuerySession::new(cfg, service);
    let as_json = json || cfg.output.json;
    let swatches = cfg.output.color_swatches && std::io::stdout().is_terminal();

    let result = match session.submit(payload) {
        Ok(result) => result,
        Err(err) => {
            if !as_json {
                print!("{}", report::render(session.test_id(), session.current(), swatches));
            }
            return Err(err.into());
        }
    };

    if as_json {
        let report = CheckReport {
            test_id: session.test_id().to_string(),
            image: image.map(|p| p.display().to_string()).unwrap_or_default(),
            image_sha256: digest.unwrap_or_default(),
            checked_at: now_rfc3339(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(session.test_id(), Some(&result), swatches));
    }
    Ok(())
}

fn label(cfg: &Config, dir: &Path, script_path: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let default_color = HexColor::parse(&cfg.labeling.default_color)
        .with_context(|| "labeling.default_color")?;
    let files = scan_dir(cfg, dir).with_context(|| format!("scanning {}", dir.display()))?;
    if files.is_empty() {
        warn!("no images found in {}", dir.display());
    }

    let mut session = LabelSession::new(default_color);
    session.load(files);

    let export_path = out
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.labeling.export_filename));
    let mut stdout = std::io::stdout();

    match script_path {
        Some(p) => {
            let file = std::fs::File::open(p)
                .with_context(|| format!("opening script: {}", p.display()))?;
            script::run(&mut session, BufReader::new(file), &mut stdout, &export_path)?;
        }
        None => {
            if std::io::stdin().is_terminal() {
                println!("{} images loaded; type `help` for commands", session.batch().len());
            }
            script::run(&mut session, std::io::stdin().lock(), &mut stdout, &export_path)?;
        }
    }

    info!("session ended with {} labeled images", session.store().len());
    Ok(())
}

fn import(input: &Path) -> Result<()> {
    let entries = export::read_file(input)
        .with_context(|| format!("reading labels: {}", input.display()))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "input": input,
            "count": entries.len(),
            "entries": entries,
        }))?
    );
    Ok(())
}
