mod clipboard;
mod help;
mod view;

use crate::cli::Cli;
use crate::model::{SubmitConfig, SubmitEvent};
use crate::orchestrator::{self, UiCommand};
use crate::render;
use crate::session::{ResultRegion, SubmissionState};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Terminal,
};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

struct UiState {
    tab: usize,
    session: SubmissionState,
    scroll: u16,
    resume_name: String,
    job_desc_preview: String,
    base_url: String,
}

impl UiState {
    fn new(cfg: &SubmitConfig) -> Self {
        Self {
            tab: 0,
            session: SubmissionState::default(),
            scroll: 0,
            resume_name: cfg
                .resume
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("resume")
                .to_string(),
            job_desc_preview: preview(&cfg.job_description, 70),
            base_url: cfg.base_url.clone(),
        }
    }
}

/// First line of the text, truncated to `max` characters.
fn preview(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let truncated: String = first_line.chars().take(max).collect();
    if truncated.chars().count() < first_line.chars().count() || text.lines().count() > 1 {
        format!("{truncated}…")
    } else {
        truncated
    }
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = crate::cli::build_config(&args)?;

    // Unbounded channels avoid backpressure between UI and controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SubmitEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_cfg = cfg.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_cfg, event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, args.submit_on_launch, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    cfg: SubmitConfig,
    mut event_rx: UnboundedReceiver<SubmitEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::new(&cfg);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            if !matches!(ev, SubmitEvent::Info(_)) {
                state.scroll = 0;
            }
            state.session.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Char('r')) | (_, KeyCode::Enter) => {
                        // Disabled affordance: the keypress is dropped while a
                        // submission is in flight.
                        if state.session.affordance().enabled {
                            let _ = cmd_tx.send(UiCommand::Submit);
                        }
                    }
                    (_, KeyCode::Char('y')) => match summary_text(&state.session) {
                        Some(text) => match clipboard::copy_to_clipboard(&text) {
                            Ok(()) => state.session.info = "Copied result to clipboard".into(),
                            Err(e) => state.session.info = format!("Copy failed: {e:#}"),
                        },
                        None => state.session.info = "Nothing to copy yet".into(),
                    },
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        state.scroll = state.scroll.saturating_sub(1);
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        state.scroll = state.scroll.saturating_add(1);
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 2;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 1;
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Plain-text summary of the settled region, for the clipboard.
fn summary_text(session: &SubmissionState) -> Option<String> {
    let blocks = match &session.region {
        ResultRegion::Rendered(blocks) => blocks.clone(),
        ResultRegion::Failed(block) => vec![block.clone()],
        ResultRegion::Empty | ResultRegion::Loading => return None,
    };
    Some(render::text::build_text_summary(&blocks).lines.join("\n"))
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Analyze"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("resume-match-cli"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_analyze(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn draw_analyze(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6), // Submission panel
                Constraint::Min(0),    // Result region
                Constraint::Length(3), // Status row
            ]
            .as_ref(),
        )
        .split(area);

    let affordance = state.session.affordance();
    let affordance_span = if affordance.enabled {
        Span::styled(
            format!("[ {} ]", affordance.label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("[ {} ]", affordance.label),
            Style::default().fg(Color::DarkGray),
        )
    };
    let mut affordance_line = vec![Span::raw("  "), affordance_span];
    if affordance.enabled {
        affordance_line.push(Span::styled(
            "  press r",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let submission = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Resume: ", Style::default().fg(Color::Gray)),
            Span::raw(state.resume_name.clone()),
        ]),
        Line::from(vec![
            Span::styled("Job description: ", Style::default().fg(Color::Gray)),
            Span::raw(state.job_desc_preview.clone()),
        ]),
        Line::from(vec![
            Span::styled("Service: ", Style::default().fg(Color::Gray)),
            Span::raw(state.base_url.clone()),
        ]),
        Line::from(affordance_line),
    ])
    .block(Block::default().borders(Borders::ALL).title("Submission"));
    f.render_widget(submission, main[0]);

    let result = Paragraph::new(view::region_lines(&state.session.region))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(view::region_border_style(&state.session.region))
                .title("Result"),
        );
    f.render_widget(result, main[1]);

    let mut status_spans = vec![Span::styled("Status: ", Style::default().fg(Color::Gray))];
    if state.session.info.is_empty() {
        status_spans.push(Span::raw("-"));
    } else {
        status_spans.push(Span::raw(state.session.info.clone()));
    }
    if let Some(at) = state.session.analyzed_at.as_deref() {
        status_spans.push(Span::styled(
            format!("  analyzed at {at}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let status = Paragraph::new(Line::from(status_spans))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, main[2]);
}
