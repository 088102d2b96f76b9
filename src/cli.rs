use crate::engine::{self, SubmitEngine};
use crate::model::{now_rfc3339, SubmitConfig, SubmitEvent};
use crate::render;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "resume-match-cli",
    version,
    about = "Resume / job-description match analysis with optional TUI"
)]
pub struct Cli {
    /// Resume file to analyze (PDF or plain text)
    pub resume: std::path::PathBuf,

    /// Job description text
    #[arg(long, conflicts_with = "job_desc_file")]
    pub job_desc: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_desc_file: Option<std::path::PathBuf>,

    /// Base URL for the analysis service
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Print the raw analysis JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Automatically submit when the TUI launches
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub submit_on_launch: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_text(args).await;
        }
    }

    if args.json {
        return run_json(args).await;
    }

    run_text(args).await
}

/// Build a `SubmitConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<SubmitConfig> {
    let job_description = match (&args.job_desc, &args.job_desc_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job description {}", path.display()))?,
        (None, None) => String::new(),
    };

    Ok(SubmitConfig {
        base_url: args.base_url.clone(),
        resume: args.resume.clone(),
        job_description,
        user_agent: format!("resume-match-cli/{}", env!("CARGO_PKG_VERSION")),
    })
}

/// Run one submission and print the raw analysis JSON.
async fn run_json(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    engine::validate(&cfg.resume, &cfg.job_description)?;

    // Directly await the engine; progress events are not printed in JSON mode.
    let (evt_tx, _) = mpsc::unbounded_channel::<SubmitEvent>();
    let engine = SubmitEngine::new(cfg);
    let result = engine.run(evt_tx).await?;

    let (out_tx, out_handle) = spawn_output_writer();
    let out = serde_json::to_string_pretty(&result)?;
    let _ = out_tx.send(OutputLine::Stdout(out));
    drop(out_tx);
    let _ = out_handle.await;

    Ok(())
}

/// Run one submission and print the rendered text summary.
async fn run_text(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    engine::validate(&cfg.resume, &cfg.job_description)?;

    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<SubmitEvent>();

    let engine = SubmitEngine::new(cfg);
    let handle = tokio::spawn(async move { engine.run(evt_tx).await });

    while let Some(ev) = evt_rx.recv().await {
        match ev {
            SubmitEvent::SubmissionStarted => {
                let _ = out_tx.send(OutputLine::Stderr("== Analyzing ==".into()));
            }
            SubmitEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info));
            }
            // Settle events come from the controller, which text mode bypasses.
            SubmitEvent::Completed { .. } | SubmitEvent::Failed { .. } => {}
        }
    }

    let outcome = handle.await.context("submission task failed")?;
    let res = match outcome {
        Ok(result) => {
            let summary = render::text::build_text_summary(&render::render(&result));
            for line in summary.lines {
                let _ = out_tx.send(OutputLine::Stdout(line));
            }
            let _ = out_tx.send(OutputLine::Stderr(format!("Analyzed at {}", now_rfc3339())));
            Ok(())
        }
        Err(error) => Err(error.into()),
    };

    drop(out_tx);
    let _ = out_handle.await;
    res
}
