use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eink_render::{PanelRenderer, ResizeMethod};
use inkframe::display;
use inkframe::models::AppConfig;
use inkframe::panel::{PanelSession, PreviewPanel, SessionOutcome, INTERRUPTED_EXIT_CODE};

/// How long an interrupted command may take to wind down, e.g. to force-exit
/// the panel, before the process exits anyway.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
use inkframe::services::ImageAcquirer;

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Show images and weather-conditioned paintings on a 7-color e-paper panel")]
struct Cli {
    /// Config file (default: $CONFIG_FILE, then ./inkframe.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the preview panel writes frame.png to
    #[arg(long, global = true)]
    preview_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct RenderArgs {
    /// Brightness multiplier; values <= 1 leave the image untouched
    #[arg(short, long)]
    brightness: Option<f32>,

    /// Resize method: "fit" (crop to fill) or "pad" (letterbox on white)
    #[arg(short, long)]
    method: Option<ResizeMethod>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display an image file on the panel
    Show {
        /// Source image
        path: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Display a painting matching the current weather, generating it if needed
    Weather {
        #[command(flatten)]
        render: RenderArgs,

        /// Only fetch or generate the image and print its path
        #[arg(long)]
        no_display: bool,
    },
    /// Render an image to a PNG file without touching the panel
    Render {
        /// Source image
        path: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Keep the frame upright instead of rotating it for the panel
        #[arg(long)]
        no_rotate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=info,eink_render=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::resolve_path(cli.config);
    let config = AppConfig::load(config_path.as_deref());
    let preview_dir = cli
        .preview_dir
        .unwrap_or_else(|| config.display.preview_dir.clone());

    let cancel = CancellationToken::new();
    spawn_interrupt_listener(cancel.clone());

    let command = cli.command;
    let worker = cancel.clone();
    let mut task =
        tokio::task::spawn_blocking(move || run(command, &config, &preview_dir, worker));

    let finished = tokio::select! {
        result = &mut task => Some(result),
        _ = cancel.cancelled() => None,
    };

    let code = match finished {
        Some(result) => result??,
        // Sessions force-exit promptly; blocking HTTP calls are abandoned.
        None => match tokio::time::timeout(SHUTDOWN_GRACE, task).await {
            Ok(result) => {
                result??;
                INTERRUPTED_EXIT_CODE
            }
            Err(_) => {
                tracing::warn!("Interrupted while busy, exiting without waiting");
                std::process::exit(i32::from(INTERRUPTED_EXIT_CODE));
            }
        },
    };

    Ok(ExitCode::from(code))
}

/// Cancel the token on Ctrl-C. The blocking pipeline checks it between stages.
fn spawn_interrupt_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, shutting down panel");
            cancel.cancel();
        }
    });
}

fn build_renderer(args: &RenderArgs, config: &AppConfig) -> anyhow::Result<PanelRenderer> {
    let method = match args.method {
        Some(method) => method,
        None => config.display.method.parse()?,
    };
    let brightness = args.brightness.unwrap_or(config.display.brightness);

    Ok(PanelRenderer::new().method(method).brightness(brightness))
}

fn run(
    command: Commands,
    config: &AppConfig,
    preview_dir: &Path,
    cancel: CancellationToken,
) -> anyhow::Result<u8> {
    match command {
        Commands::Show { path, render } => {
            let renderer = build_renderer(&render, config)?;
            let session = PanelSession::new(PreviewPanel::new(preview_dir), cancel);
            let outcome = display::show_file(&path, &renderer, session)?;
            Ok(report(outcome))
        }
        Commands::Weather { render, no_display } => {
            let renderer = build_renderer(&render, config)?;
            let acquirer = ImageAcquirer::from_config(config)?;
            let acquired = acquirer.acquire(chrono::Utc::now(), &mut rand::thread_rng())?;
            if cancel.is_cancelled() {
                return Ok(INTERRUPTED_EXIT_CODE);
            }
            println!("{}", acquired.path.display());

            if no_display {
                return Ok(0);
            }

            let session = PanelSession::new(PreviewPanel::new(preview_dir), cancel);
            let outcome = display::show_file(&acquired.path, &renderer, session)?;
            Ok(report(outcome))
        }
        Commands::Render {
            path,
            output,
            render,
            no_rotate,
        } => {
            let renderer = build_renderer(&render, config)?.rotate(!no_rotate);
            let frame = display::render_to_png(&path, &output, &renderer)?;
            if cancel.is_cancelled() {
                return Ok(INTERRUPTED_EXIT_CODE);
            }
            println!(
                "Rendered {} ({}x{})",
                output.display(),
                frame.width(),
                frame.height()
            );
            Ok(0)
        }
    }
}

fn report(outcome: SessionOutcome) -> u8 {
    match &outcome {
        SessionOutcome::Completed => tracing::info!("Done"),
        SessionOutcome::Interrupted => tracing::warn!("Interrupted, panel shut down"),
        SessionOutcome::DeviceFault(e) => {
            eprintln!("Panel error: {e}");
        }
    }
    outcome.exit_code()
}
