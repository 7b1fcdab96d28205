use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::{ArgAction, Parser};
use lunar_toolkit::compose::{
    RecordingHost, SceneComposer, SceneSnapshot, SceneSummary, TelemetryFollower, compose_scene,
    follow_telemetry, sphere_from_config,
};
use lunar_toolkit::config::{load_scene, load_telemetry};
use lunar_toolkit::export::{curve, snapshot};
use lunar_toolkit::logging;
use serde::Serialize;
use tracing::info;

/// Compose a scene manifest against an in-memory host and export what it recorded.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scene planner (records host objects to JSON)")]
struct Cli {
    /// Scene manifest (YAML, or TOML by extension)
    #[arg(long)]
    manifest: PathBuf,

    /// Snapshot JSON output (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Write one CSV per recorded polyline into this directory
    #[arg(long)]
    curves_dir: Option<PathBuf>,

    /// Recorded Earth/Moon feed (12 comma-separated fields per line) to key after composing
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// Scene frame of the first telemetry line
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    telemetry_start: i32,

    /// Name of the Earth object the feed drives
    #[arg(long, default_value = "Earth")]
    earth: String,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a SceneSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    telemetry_frames: Option<usize>,
    host: SceneSnapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let scene = load_scene(&cli.manifest)
        .with_context(|| format!("loading manifest {}", cli.manifest.display()))?;
    scene.validate()?;
    let sphere = sphere_from_config(&scene.sphere)?;

    let mut composer = SceneComposer::new(RecordingHost::new());
    let summary = compose_scene(&scene, &mut composer)?;
    let telemetry_frames = match &cli.telemetry {
        Some(path) => {
            let feed = load_telemetry(path)
                .with_context(|| format!("loading telemetry {}", path.display()))?;
            let mut follower = TelemetryFollower::new(&cli.earth, &scene.sphere.name);
            Some(follow_telemetry(
                &mut composer,
                &mut follower,
                &feed,
                cli.telemetry_start,
            )?)
        }
        None => None,
    };
    let host = composer.into_host();

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let meta = snapshot::Metadata {
        scene: &scene.name,
        generated_utc: &generated,
        sphere_center: sphere.center().to_array(),
        sphere_radius: sphere.radius(),
    };
    let report = Report {
        summary: &summary,
        telemetry_frames,
        host: host.snapshot(),
    };
    snapshot::write_snapshot(&cli.output, &meta, &report)?;

    if let Some(dir) = &cli.curves_dir {
        let written = write_curves(dir, &host)?;
        info!(curves = written, dir = %dir.display(), "polyline CSVs written");
    }
    Ok(())
}

fn write_curves(dir: &Path, host: &RecordingHost) -> anyhow::Result<usize> {
    fs::create_dir_all(dir)?;
    let mut stems = curve::Stems::new();
    let mut written = 0;
    for object in host.objects() {
        let Some(points) = object.primitive.polyline_points() else {
            continue;
        };
        let path = dir.join(format!("{}.csv", stems.claim(&object.name)));
        let mut writer = curve::writer_for_path(&path)?;
        curve::write_points(&mut writer, points)?;
        written += 1;
    }
    Ok(written)
}
