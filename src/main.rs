use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset as ChartDataset,
    GraphType, Paragraph, Row, Table,
};

use ipl_dashboard::colors::{ColorMap, HexColor};
use ipl_dashboard::config::AppConfig;
use ipl_dashboard::dataset::Dataset;
use ipl_dashboard::export::export_views;
use ipl_dashboard::state::{APP_INTRO, APP_TITLE, AppState, SIDEBAR_PROMPT, SIDEBAR_TITLE};
use ipl_dashboard::views::{BarView, LineView, PieView, SeriesLabel, TableView};

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: AppConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.cursor_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.cursor_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => self.state.toggle_cursor(),
            KeyCode::Char('a') | KeyCode::Char('A') => self.state.select_all(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.state.clear_selection(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn export(&mut self) {
        let msg = match self.state.views() {
            Ok(views) => match export_views(&self.config.export_dir, views) {
                Ok(report) => format!(
                    "[INFO] Exported {} teams ({} bars, {} slices, {} points) to {} and {}",
                    report.teams,
                    report.bars,
                    report.slices,
                    report.points,
                    report.workbook.display(),
                    report.charts.display()
                ),
                Err(err) => format!("[ERROR] Export failed: {err:#}"),
            },
            Err(err) => format!("[WARN] Nothing to export: {err}"),
        };
        self.state.push_log(msg);
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    let dataset = Dataset::ipl();
    let colors = ColorMap::ipl();
    colors
        .validate_coverage(&dataset)
        .context("color table does not cover the team dataset")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(AppState::new(dataset, colors), config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = app.config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(APP_INTRO, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(chunks[1]);

    render_sidebar(frame, body[0], &app.state);
    render_dashboard(frame, body[1], &app.state);

    let footer = Paragraph::new(
        "j/k/↑/↓ Move | Space Toggle | a All | n None | e Export | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(7)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            SIDEBAR_PROMPT,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} of {} selected",
            state.selection().len(),
            state.dataset().len()
        )),
        Line::from(""),
    ];
    for (idx, record) in state.dataset().records().iter().enumerate() {
        let checked = if state.selection().contains(&record.name) {
            "[x]"
        } else {
            "[ ]"
        };
        let row_style = if idx == state.cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let swatch = state
            .colors()
            .get(&record.name)
            .map(tui_color)
            .unwrap_or(Color::Reset);
        lines.push(Line::from(vec![
            Span::styled(format!("{checked} "), row_style),
            Span::styled("■ ", row_style.fg(swatch)),
            Span::styled(record.name.clone(), row_style),
        ]));
    }

    let picker = Paragraph::new(lines)
        .block(Block::default().title(SIDEBAR_TITLE).borders(Borders::ALL));
    frame.render_widget(picker, sections[0]);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, sections[1]);
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let views = match state.views() {
        Ok(views) => views,
        Err(err) => {
            let diag = Paragraph::new(format!("Rendering stopped: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("Configuration Error").borders(Borders::ALL));
            frame.render_widget(diag, area);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(views.table.rows.len().max(1) as u16 + 3),
            Constraint::Percentage(50),
            Constraint::Min(8),
        ])
        .split(area);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_table(frame, rows[0], &views.table);
    render_bar(frame, charts[0], &views.bar);
    render_pie(frame, charts[1], &views.pie);
    render_line(frame, rows[2], &views.line);
}

fn render_table(frame: &mut Frame, area: Rect, view: &TableView) {
    let block = Block::default().title(view.title).borders(Borders::ALL);
    if view.rows.is_empty() {
        frame.render_widget(empty_state("No teams selected").block(block), area);
        return;
    }

    let header = Row::new(view.columns.iter().map(|c| Cell::from(*c)))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = view.rows.iter().map(|row| {
        let [team, matches, wins, losses, titles] = row.cells();
        Row::new(vec![
            Cell::from(Line::from(vec![
                Span::styled("■ ", Style::default().fg(tui_color(row.color))),
                Span::raw(team),
            ])),
            Cell::from(matches),
            Cell::from(wins),
            Cell::from(losses),
            Cell::from(titles),
        ])
    });
    let widths = [
        Constraint::Min(30),
        Constraint::Length(15),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_bar(frame: &mut Frame, area: Rect, view: &BarView) {
    let block = Block::default().title(view.spec.title.as_str()).borders(Borders::ALL);
    if view.bars.is_empty() {
        frame.render_widget(empty_state("No teams selected").block(block), area);
        return;
    }

    let bars: Vec<Bar> = view
        .bars
        .iter()
        .map(|datum| {
            let style = Style::default().fg(tui_color(datum.color));
            Bar::default()
                .value(u64::from(datum.wins))
                .label(Line::from(team_abbr(&datum.team)))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(4)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_pie(frame: &mut Frame, area: Rect, view: &PieView) {
    let block = Block::default().title(view.spec.title.as_str()).borders(Borders::ALL);
    if view.slices.is_empty() {
        frame.render_widget(
            empty_state("No titles among selected teams").block(block),
            area,
        );
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let slices: Vec<(Color, Vec<(f64, f64)>)> = view
        .slices
        .iter()
        .map(|slice| {
            (
                tui_color(slice.color),
                arc_points(slice.start_angle, slice.end_angle),
            )
        })
        .collect();

    // Terminal cells are roughly twice as tall as wide.
    let aspect = if cols[0].height == 0 {
        1.0
    } else {
        (f64::from(cols[0].width) / (f64::from(cols[0].height) * 2.0)).max(1.0)
    };
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (color, coords) in &slices {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, cols[0]);

    let legend: Vec<Line> = view
        .slices
        .iter()
        .map(|slice| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(tui_color(slice.color))),
                Span::raw(format!(
                    "{} {} ({:.0}%)",
                    team_abbr(&slice.team),
                    slice.titles,
                    slice.fraction * 100.0
                )),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), cols[1]);
}

fn render_line(frame: &mut Frame, area: Rect, view: &LineView) {
    let title = format!(
        "{} ({} {}  {} {})",
        view.spec.title,
        series_glyph(SeriesLabel::MatchesPlayed),
        SeriesLabel::MatchesPlayed.label(),
        series_glyph(SeriesLabel::Wins),
        SeriesLabel::Wins.label()
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    if view.points.is_empty() {
        frame.render_widget(empty_state("No teams selected").block(block), area);
        return;
    }

    let mut teams: Vec<&str> = Vec::new();
    for point in &view.points {
        if !teams.contains(&point.team.as_str()) {
            teams.push(point.team.as_str());
        }
    }

    // One vertical connector per team, then one marker per (team, series).
    let mut connectors: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();
    let mut markers: Vec<(Color, SeriesLabel, Vec<(f64, f64)>)> = Vec::new();
    for (idx, team) in teams.iter().enumerate() {
        let x = idx as f64;
        let team_points: Vec<_> = view.points.iter().filter(|p| p.team == *team).collect();
        let Some(first) = team_points.first() else {
            continue;
        };
        let color = tui_color(first.color);
        connectors.push((
            color,
            team_points.iter().map(|p| (x, f64::from(p.value))).collect(),
        ));
        for point in &team_points {
            markers.push((color, point.series, vec![(x, f64::from(point.value))]));
        }
    }

    let mut datasets = Vec::with_capacity(connectors.len() + markers.len());
    for (color, data) in &connectors {
        datasets.push(
            ChartDataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(data),
        );
    }
    for (color, series, data) in &markers {
        datasets.push(
            ChartDataset::default()
                .marker(series_marker(*series))
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(data),
        );
    }

    let y_max = (f64::from(view.max_value()) * 1.1).max(1.0);
    let x_labels: Vec<Span> = teams.iter().map(|t| Span::raw(team_abbr(t))).collect();
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Team")
                .bounds([-0.5, teams.len() as f64 - 0.5])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn series_marker(series: SeriesLabel) -> Marker {
    match series {
        SeriesLabel::MatchesPlayed => Marker::Block,
        SeriesLabel::Wins => Marker::Dot,
    }
}

fn series_glyph(series: SeriesLabel) -> &'static str {
    match series {
        SeriesLabel::MatchesPlayed => "█",
        SeriesLabel::Wins => "•",
    }
}

/// Polar samples covering one slice, clockwise from twelve o'clock.
fn arc_points(start: f64, end: f64) -> Vec<(f64, f64)> {
    const RADIAL_STEPS: usize = 24;
    const ANGLE_STEP: f64 = 0.02;

    let mut coords = Vec::new();
    let mut theta = start;
    while theta < end {
        let (sin, cos) = theta.sin_cos();
        for step in 1..=RADIAL_STEPS {
            let r = step as f64 / RADIAL_STEPS as f64;
            coords.push((r * sin, r * cos));
        }
        theta += ANGLE_STEP;
    }
    coords
}

fn tui_color(color: HexColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Initials of the team name, e.g. "Mumbai Indians" -> "MI".
fn team_abbr(team: &str) -> String {
    team.split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphabetic())
        .collect::<String>()
        .to_uppercase()
}

fn empty_state(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(5);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "IPL Dashboard - Help",
        "",
        "Team selection:",
        "  j/k or ↑/↓     Move cursor",
        "  Space / Enter  Toggle team",
        "  a              Select all teams",
        "  n              Select no teams",
        "",
        "Global:",
        "  e              Export workbook + chart specs",
        "  ?              Toggle help",
        "  q              Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
