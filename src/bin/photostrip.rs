use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use photostrip::{
    BoothConfig, BoothSession, CameraSession, EditorAction, PreparedStickerStore, ReplaySource,
    ResizeOutcome, StripRequest,
};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cover-fit one camera frame into a still PNG.
    Capture(CaptureArgs),
    /// Build a decorated photostrip PNG from a JSON request.
    Strip(StripArgs),
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Camera frame image (any aspect ratio).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Mirror horizontally, like a front-facing preview.
    #[arg(long, default_value_t = false)]
    mirror: bool,

    /// Booth configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Strip request JSON (frames, editor state, stickers).
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: StripOutput,

    /// Booth configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct StripOutput {
    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory to write `photobooth-<timestamp>.png` into.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Strip(args) => cmd_strip(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<(BoothConfig, PathBuf)> {
    match path {
        Some(p) => {
            let cfg = BoothConfig::from_json_path(p)
                .with_context(|| format!("load config '{}'", p.display()))?;
            let base = p.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            Ok((cfg, base))
        }
        None => Ok((BoothConfig::default(), PathBuf::from("."))),
    }
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let (cfg, _) = load_config(args.config.as_deref())?;
    let mut settings = cfg.capture;
    settings.mirrored |= args.mirror;

    let mut source = ReplaySource::from_paths(std::slice::from_ref(&args.in_path))?;
    let still = {
        let mut camera = CameraSession::open(&mut source)?;
        camera.capture_still(&settings)?
    };

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    still
        .to_rgba_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    let (cfg, config_dir) = load_config(args.config.as_deref())?;
    let req = StripRequest::from_json_path(&args.in_path)?;

    let mut session = BoothSession::new(cfg.required_photos, cfg.stickers)?;
    session.start_camera()?;
    session.begin_capture()?;

    let mut source = ReplaySource::from_paths(&req.frames)?;
    let stills = photostrip::capture_sequence(&mut source, &cfg.capture, req.frames.len())?;
    for still in stills {
        session.record_still(still)?;
    }

    let editor = req.editor.clone();
    session.apply(EditorAction::SetBackground(editor.background));
    session.apply(EditorAction::SetFilter(editor.filter));
    session.apply(EditorAction::SetShowDate(editor.show_date));
    session.apply(EditorAction::SetShowWatermark(editor.show_watermark));
    session.apply(EditorAction::SetDate(editor.date));

    for placement in &req.stickers {
        let stickers = session.stickers_mut();
        let (id, x, y) = {
            let s = stickers.add(placement.source.clone());
            (s.id, s.x, s.y)
        };
        stickers.move_to(id, placement.x.unwrap_or(x), placement.y.unwrap_or(y));
        if placement.width.is_some() || placement.height.is_some() {
            let d = *stickers.defaults();
            let w = placement.width.unwrap_or(d.width);
            let h = placement.height.unwrap_or(d.height);
            if stickers.set_size(id, w, h) == ResizeOutcome::Rejected {
                tracing::warn!(%id, w, h, "sticker size rejected, keeping default");
            }
        }
    }

    let input = session.snapshot()?;
    let root = req
        .asset_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let store =
        PreparedStickerStore::prepare(input.stickers.iter().map(|s| s.source.as_str()), &root);
    let font = if input.editor.stamp_count() > 0 {
        cfg.stamp.load_font(&config_dir)?
    } else {
        None
    };

    let out = photostrip::compose(&input, &cfg.layout, &store, &cfg.stamp, font.as_ref())?;
    for skipped in &out.skipped {
        eprintln!("skipped sticker {}: {}", skipped.id, skipped.error);
    }
    for kind in &out.skipped_stamps {
        eprintln!("skipped {kind:?} stamp: no font available");
    }

    session.proceed_to_export()?;
    let path = match (args.output.out, args.output.out_dir) {
        (Some(path), _) => {
            photostrip::save_png(&out.frame, &path)?;
            path
        }
        (None, Some(dir)) => photostrip::save_png_in_dir(&out.frame, &dir)?,
        (None, None) => anyhow::bail!("either --out or --out-dir is required"),
    };

    eprintln!("wrote {}", path.display());
    Ok(())
}
