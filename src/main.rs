// SPDX-License-Identifier: MPL-2.0
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidwatch::application::port::{AuditLogProvider, AuthProvider};
use vidwatch::config::{self, Config};
use vidwatch::detection_store::{DetectionFilter, SortDirection, SortKey};
use vidwatch::domain::audit::{unique_actions, AuditLogFilter};
use vidwatch::domain::auth::LoginCredentials;
use vidwatch::domain::detection::ObjectType;
use vidwatch::domain::video::{UploadFile, VideoMetadata, MP4_MIME};
use vidwatch::error::{Error, Result};
use vidwatch::history::HistoryManager;
use vidwatch::infrastructure::mock_auth::MOCK_PASSWORD;
use vidwatch::infrastructure::{
    HttpAuditLogProvider, MockAuthProvider, MockDetectionProvider, StaticAuditLogProvider,
    StaticProbe,
};
use vidwatch::overlay::{is_active_in_list, OverlaySynchronizer, SurfaceSize};
use vidwatch::playback::{NullSurface, PlaybackController};
use vidwatch::session::Session;
use vidwatch::time_format::{format_duration, format_file_size, format_timestamp};
use vidwatch::upload::{UploadPipeline, UploadState};
use vidwatch::{export, paths};

const HELP: &str = "\
vidwatch - review detections found in uploaded videos

USAGE:
  vidwatch [--data-dir DIR] [--config-dir DIR] <COMMAND>

COMMANDS:
  analyze <FILE.mp4> --duration SECS [--width W] [--height H] [--seed N]
          [--sort timestamp|type|confidence] [--desc] [--type TYPE]
          [--at SECS] [--export DIR]
  history [--search TERM] [--tag TAG]... [--remove ID]
  audit   [--email EMAIL] [--password PASSWORD] [--search TERM]
          [--action ACTION] [--remote]

Set RUST_LOG to change log verbosity (default: vidwatch=info).
";

fn arg_error(err: pico_args::Error) -> Error {
    Error::InvalidArgument(err.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(pico_args::Arguments::from_env()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(mut args: pico_args::Arguments) -> Result<ExitCode> {
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(ExitCode::SUCCESS);
    }

    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir").map_err(arg_error)?;
    let config_dir: Option<PathBuf> =
        args.opt_value_from_str("--config-dir").map_err(arg_error)?;
    paths::init_cli_overrides(data_dir, config_dir);

    let (config, warning) = config::load();
    if let Some(key) = warning {
        tracing::warn!(warning = %key, "using default configuration");
    }

    match args.subcommand().map_err(arg_error)?.as_deref() {
        Some("analyze") => analyze(args, &config).await,
        Some("history") => history(args),
        Some("audit") => audit(args, &config).await,
        Some(other) => Err(Error::InvalidArgument(format!("unknown command: {other}"))),
        None => {
            print!("{HELP}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn reject_leftovers(args: pico_args::Arguments) -> Result<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("unexpected arguments: {rest:?}")))
    }
}

/// Describes a local file the way the upload zone would.
fn upload_file_from_path(path: &Path) -> Result<UploadFile> {
    let path = std::fs::canonicalize(path)?;
    let size = std::fs::metadata(&path)?.len();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let is_mp4 = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mp4"));
    let mime = if is_mp4 { MP4_MIME } else { "" };
    Ok(UploadFile::new(
        name,
        mime,
        size,
        format!("file://{}", path.display()),
    ))
}

// =============================================================================
// analyze
// =============================================================================

async fn analyze(mut args: pico_args::Arguments, config: &Config) -> Result<ExitCode> {
    let duration: f64 = args.value_from_str("--duration").map_err(arg_error)?;
    let width: u32 = args
        .opt_value_from_str("--width")
        .map_err(arg_error)?
        .unwrap_or(1920);
    let height: u32 = args
        .opt_value_from_str("--height")
        .map_err(arg_error)?
        .unwrap_or(1080);
    let seed: Option<u64> = args.opt_value_from_str("--seed").map_err(arg_error)?;
    let sort: Option<String> = args.opt_value_from_str("--sort").map_err(arg_error)?;
    let descending = args.contains("--desc");
    let type_tag: Option<String> = args.opt_value_from_str("--type").map_err(arg_error)?;
    let at: Option<f64> = args.opt_value_from_str("--at").map_err(arg_error)?;
    let export_dir: Option<PathBuf> = args.opt_value_from_str("--export").map_err(arg_error)?;
    let file: PathBuf = args.free_from_str().map_err(arg_error)?;
    reject_leftovers(args)?;

    let key = match sort.as_deref() {
        None => SortKey::Timestamp,
        Some(raw) => SortKey::parse(raw)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown sort key: {raw}")))?,
    };
    let direction = if descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let filter = match type_tag.as_deref() {
        None => DetectionFilter::All,
        Some(tag) => match ObjectType::from_tag(tag) {
            ObjectType::Unknown => {
                return Err(Error::InvalidArgument(format!("unknown object type: {tag}")))
            }
            object_type => DetectionFilter::Only(object_type),
        },
    };

    let upload = upload_file_from_path(&file)?;
    let probe = StaticProbe::new(VideoMetadata::new(duration, width, height));
    let provider = match seed {
        Some(seed) => MockDetectionProvider::seeded(seed),
        None => MockDetectionProvider::new(),
    };

    let (history, warning) = HistoryManager::load();
    if let Some(key) = warning {
        tracing::warn!(warning = %key, "starting with empty history");
    }
    let playback = PlaybackController::new(Box::new(NullSurface))
        .with_audio(config.playback.volume(), config.playback.muted());
    let mut session = Session::new(
        playback,
        history,
        OverlaySynchronizer::new(config.overlay.window()),
    );
    let mut pipeline = UploadPipeline::new(config.upload.pipeline_options());

    let state = pipeline
        .process(&[upload], &probe, &provider, &mut session)
        .await
        .clone();
    if let UploadState::Error { message, .. } = state {
        eprintln!("upload failed: {message}");
        return Ok(ExitCode::FAILURE);
    }
    if let Some(key) = session.save_history(None) {
        tracing::warn!(warning = %key, "history not saved");
    }

    let Some(video) = session.current_video().cloned() else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{} [{}]", video.title, video.id);
    println!(
        "  {}  {}  {}  tags: {}",
        format_duration(video.duration),
        video.resolution,
        format_file_size(video.file_size),
        video.display_tags().join(", ")
    );

    if let Some(t) = at {
        session.playback_mut().seek(t);
    }
    let now = session.playback().current_time();

    println!();
    println!("Detections ({}):", session.detections().len());
    for detection in session.detections().query(filter, key, direction) {
        let marker = if at.is_some() && is_active_in_list(detection, now) {
            '>'
        } else {
            ' '
        };
        println!(
            "{marker} {:>9}  {:<8} {:>3}%  {}",
            format_timestamp(detection.timestamp),
            detection.object_type.display_name(),
            detection.confidence_percent(),
            detection.description
        );
    }

    if at.is_some() {
        let size = SurfaceSize::new(width as f32, height as f32);
        println!();
        println!("Overlay at {}:", format_timestamp(now));
        for overlay in session.overlay_boxes(size) {
            println!(
                "  {:<24} {} at ({:.0}, {:.0}) {:.0}x{:.0}",
                overlay.label,
                overlay.color.to_hex(),
                overlay.left,
                overlay.top,
                overlay.width,
                overlay.height
            );
        }
    }

    if let Some(dir) = export_dir {
        let path =
            export::download_detection_data(session.detections().as_slice(), &video.title, &dir)?;
        println!();
        println!("Exported to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// history
// =============================================================================

fn history(mut args: pico_args::Arguments) -> Result<ExitCode> {
    let term: String = args
        .opt_value_from_str("--search")
        .map_err(arg_error)?
        .unwrap_or_default();
    let tags: Vec<String> = args.values_from_str("--tag").map_err(arg_error)?;
    let remove: Option<String> = args.opt_value_from_str("--remove").map_err(arg_error)?;
    reject_leftovers(args)?;

    let (mut history, warning) = HistoryManager::load();
    if let Some(key) = warning {
        tracing::warn!(warning = %key, "history could not be read");
    }

    if let Some(id) = remove {
        if history.remove(&id).is_none() {
            eprintln!("no video with id {id}");
            return Ok(ExitCode::FAILURE);
        }
        if let Some(key) = history.save() {
            tracing::warn!(warning = %key, "history not saved");
        }
    }

    let matches = history.search(&term, &tags);
    if matches.is_empty() {
        println!("No videos found.");
    }
    for video in matches {
        println!(
            "{}  {:<32} {:>6}  {}  [{}]",
            video.upload_date.format("%Y-%m-%d %H:%M"),
            video.title,
            format_duration(video.duration),
            video.id,
            video.display_tags().join(", ")
        );
    }
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// audit
// =============================================================================

async fn audit(mut args: pico_args::Arguments, config: &Config) -> Result<ExitCode> {
    let email: String = args
        .opt_value_from_str("--email")
        .map_err(arg_error)?
        .unwrap_or_else(|| "admin@example.com".to_string());
    let password: String = args
        .opt_value_from_str("--password")
        .map_err(arg_error)?
        .unwrap_or_else(|| MOCK_PASSWORD.to_string());
    let term: String = args
        .opt_value_from_str("--search")
        .map_err(arg_error)?
        .unwrap_or_default();
    let action: Option<String> = args.opt_value_from_str("--action").map_err(arg_error)?;
    let remote = args.contains("--remote");
    reject_leftovers(args)?;

    let auth = MockAuthProvider::new();
    let user = auth
        .login(&LoginCredentials::new(email, password))
        .await?;
    if !user.is_admin() {
        eprintln!("audit logs are only available to administrators");
        return Ok(ExitCode::FAILURE);
    }

    let provider: Box<dyn AuditLogProvider> = if remote {
        Box::new(HttpAuditLogProvider::new(config.api.base_url()).with_token(user.token.clone()))
    } else {
        Box::new(StaticAuditLogProvider::sample())
    };
    let logs = provider.list_audit_logs().await?;

    let filter = AuditLogFilter { search: term, action };
    println!("Actions: {}", unique_actions(&logs).join(", "));
    for log in filter.apply(&logs) {
        println!(
            "{}  {:<14} {:<16} {}",
            log.timestamp.format("%Y-%m-%d %H:%M:%S"),
            log.user_name,
            log.action,
            log.details
        );
    }
    auth.logout().await;
    Ok(ExitCode::SUCCESS)
}
