use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

mod error;
mod eval;
mod pose;
mod replay;

use error::Error;
use eval::Judgment;

/// What the rendering side needs for one frame: the feedback text, a color
/// per keypoint, a color per skeleton segment, and the joint-anchored labels.
#[derive(Debug, Serialize)]
struct FrameReport {
    frame: usize,
    messages: Vec<&'static str>,
    colors: Vec<&'static str>,
    connections: Vec<ConnectionReport>,
    annotations: Vec<AnnotationReport>,
}

#[derive(Debug, Serialize)]
struct ConnectionReport {
    from: usize,
    to: usize,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct AnnotationReport {
    joint_index: usize,
    message: &'static str,
}

impl FrameReport {
    fn new(frame: usize, judgment: &Judgment) -> Result<Self, Error> {
        let colors = judgment
            .statuses
            .iter()
            .map(|status| status.color())
            .collect();
        let connections = pose::constants::CONNECTIONS
            .iter()
            .map(|&(a, b)| {
                Ok(ConnectionReport {
                    from: a.idx()?,
                    to: b.idx()?,
                    color: judgment.connection_color(a, b)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let annotations = judgment
            .annotations
            .iter()
            .map(|annotation| {
                Ok(AnnotationReport {
                    joint_index: annotation.joint.idx()?,
                    message: annotation.message,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            frame,
            messages: judgment.messages.clone(),
            colors,
            connections,
            annotations,
        })
    }
}

#[derive(structopt::StructOpt)]
struct Opt {
    /// Newline-delimited JSON file of keypoint frames, one frame per line:
    /// either null (no person) or an array of {"x", "y"} landmarks.
    frames: PathBuf,

    /// The exercise to judge the frames against.
    #[structopt(short, long, possible_values = &eval::Exercise::VARIANTS)]
    exercise: Option<eval::Exercise>,

    /// Majority-vote feedback over the last N judgments instead of echoing
    /// every frame.
    #[structopt(long)]
    steady: Option<usize>,

    /// Emit one JSON report per frame on stdout.
    #[structopt(long)]
    json: bool,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(opt.log_level),
    )?;

    if let Some(exercise) = opt.exercise {
        info!(message = "judging frames", exercise = exercise.name());
    } else {
        info!(message = "no exercise selected, checking presence only");
    }

    let file = File::open(&opt.frames)
        .with_context(|| format!("failed opening frames file: {:?}", opt.frames))?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("failed reading frames file")?;

    let pb = if opt.show_progress {
        Some(
            ProgressBar::new(lines.len() as u64).with_style(
                ProgressStyle::default_bar().template("{prefix:.bold.dim} {bar:40} {pos}/{len}"),
            ),
        )
    } else {
        None
    };

    let mut debouncer = opt.steady.map(eval::steady::Debouncer::new);

    let mut flagged_frames = 0;
    for (frame_num, line) in lines.iter().enumerate() {
        let points = replay::parse_line(line)
            .with_context(|| format!("failed parsing frame {}", frame_num))?;
        let mut judgment = eval::evaluate(opt.exercise, points.as_deref())
            .with_context(|| format!("failed evaluating frame {}", frame_num))?;
        if let Some(debouncer) = debouncer.as_mut() {
            judgment = debouncer.push(judgment);
        }

        let flagged = judgment.flagged_kinds()?;
        if !flagged.is_empty() {
            flagged_frames += 1;
        }

        if opt.json {
            let report = FrameReport::new(frame_num, &judgment)?;
            println!(
                "{}",
                serde_json::to_string(&report).context("failed serializing frame report")?
            );
        } else {
            let feedback = if judgment.is_clean() {
                "Great posture!".to_owned()
            } else {
                judgment.messages.join(" | ")
            };
            info!(frame = frame_num, message = %feedback);
            if !flagged.is_empty() {
                debug!(frame = frame_num, flagged = ?flagged);
            }
        }

        if let Some(pb) = pb.as_ref() {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb.as_ref() {
        pb.finish_and_clear();
    }

    info!(
        message = "finished judging frames",
        frames = lines.len(),
        flagged = flagged_frames,
    );

    Ok(())
}
