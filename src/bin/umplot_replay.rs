use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use umplot::api::{PlotData, PlotSession, ScriptedInput};
use umplot::core::{Bounds, CoordinateTransform, WindowSize};
use umplot::render::NullRenderer;

const USAGE: &str =
    "usage: umplot-replay --plot <path> --script <path> [--width <px>] [--height <px>]";

#[derive(Debug)]
struct CliArgs {
    plot: PathBuf,
    script: PathBuf,
    window: WindowSize,
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    frames: u64,
    window: WindowSize,
    transform: CoordinateTransform,
    visible: Bounds,
}

fn main() {
    let _ = umplot::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let raw_plot = fs::read_to_string(&args.plot)
        .map_err(|err| format!("failed to read `{}`: {err}", args.plot.display()))?;
    let plot = PlotData::from_json_str(&raw_plot).map_err(|err| err.to_string())?;

    let raw_script = fs::read_to_string(&args.script)
        .map_err(|err| format!("failed to read `{}`: {err}", args.script.display()))?;
    let script = ScriptedInput::from_json_str(&raw_script).map_err(|err| err.to_string())?;

    let mut session = PlotSession::new(&plot, NullRenderer::default(), script, args.window)
        .map_err(|err| err.to_string())?;
    session.run().map_err(|err| err.to_string())?;

    let summary = ReplaySummary {
        frames: session.frames(),
        window: session.layout().window,
        transform: *session.controller().transform(),
        visible: session.controller().visible_graph_rect(),
    };
    let payload = serde_json::to_string_pretty(&summary)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    println!("{payload}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut plot = None::<PathBuf>;
    let mut script = None::<PathBuf>;
    let mut width = 640_u32;
    let mut height = 480_u32;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--plot" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --plot".to_owned())?;
                plot = Some(PathBuf::from(value));
            }
            "--script" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --script".to_owned())?;
                script = Some(PathBuf::from(value));
            }
            "--width" => width = parse_px(args.next(), "--width")?,
            "--height" => height = parse_px(args.next(), "--height")?,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        plot: plot.ok_or_else(|| USAGE.to_owned())?,
        script: script.ok_or_else(|| USAGE.to_owned())?,
        window: WindowSize::new(width, height),
    })
}

fn parse_px(value: Option<String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse()
        .map_err(|err| format!("invalid value `{value}` for {flag}: {err}"))
}
