//! Dashboard frame layout
//!
//! One full frame per tick: header row, disk table, temperature gauges,
//! utilization block, governor and codec lists on the left, the
//! throttling panel on the right, key menu at the bottom.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use crate::metrics::{Snapshot, StaticInfo, CODECS};
use crate::state::App;
use crate::tui::theme::{tier_style, Styles};
use crate::tui::widgets::temp_gauge;

pub fn render(f: &mut Frame, statics: &StaticInfo, snap: &Snapshot, app: &App, host: &str) {
    let area = f.area();
    let outer = Block::default().borders(Borders::ALL);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header row
            Constraint::Min(10),   // metric body
            Constraint::Length(2), // status line + key menu
        ])
        .split(inner);

    render_header(f, chunks[0], statics, snap, host);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(70), Constraint::Length(42)])
        .split(chunks[1]);

    render_metrics(f, body[0], statics, snap, app);
    render_throttling(f, body[1], snap);
    render_footer(f, chunks[2], app, area);
}

fn render_header(f: &mut Frame, area: Rect, statics: &StaticInfo, snap: &Snapshot, host: &str) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(38),
            Constraint::Percentage(28),
            Constraint::Percentage(34),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(format!(" Connected to {host} ({})", statics.hostname)),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(format!("Uptime: {}", snap.uptime)).alignment(Alignment::Center),
        cols[1],
    );
    f.render_widget(
        Paragraph::new(format!("Kernel: {} ", statics.kernel)).alignment(Alignment::Right),
        cols[2],
    );
}

fn render_metrics(f: &mut Frame, area: Rect, statics: &StaticInfo, snap: &Snapshot, app: &App) {
    let disk_height = app.disks.len() as u16 + 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(disk_height), // disk table + header
            Constraint::Length(3),           // temperature gauges
            Constraint::Length(2),           // cpu / ram / load block
            Constraint::Length(2),           // frequency + governors
            Constraint::Min(2),              // codecs + gpu memory
        ])
        .split(area);

    render_disks(f, rows[0], app);
    render_temps(f, rows[1], snap);
    render_usage(f, rows[2], snap);
    render_governors(f, rows[3], statics, snap);
    render_codecs(f, rows[4], statics);
}

fn render_disks(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.disks.iter().map(|d| {
        Row::new(vec![
            d.filesystem.clone(),
            d.size.clone(),
            d.used.clone(),
            d.available.clone(),
            d.mounted.clone(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .header(Row::new(vec!["Filesystem", "Size", "Used", "Avail", "Mounted on"]).style(Styles::header()));
    f.render_widget(table, area);
}

fn temp_line(label: &str, temp: f32) -> Line<'static> {
    let (bar, tier) = temp_gauge(temp);
    Line::from(vec![
        Span::raw(format!(" {label:<10}")),
        Span::styled(bar, tier_style(tier)),
        Span::raw(format!("  {temp:.1} °C")),
    ])
}

fn render_temps(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let lines = vec![
        temp_line("GPU Temp:", snap.gpu_temp),
        temp_line("CPU Temp:", snap.cpu_temp),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_usage(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let lines = vec![
        Line::from(vec![
            Span::raw(format!(" CPU usage: {:>5.1} %", snap.cpu_usage)),
            Span::styled("    Processes  ", Styles::muted()),
            Span::raw(format!("Active: {:<6}", snap.load.active_procs)),
            Span::styled("Average load  ", Styles::muted()),
            Span::raw(format!(
                "1 min {:.2}   5 min {:.2}   15 min {:.2}",
                snap.load.one, snap.load.five, snap.load.fifteen
            )),
        ]),
        Line::from(vec![
            Span::raw(format!(" RAM usage: {:<18}", snap.ram)),
            Span::raw(format!("Total:  {:<6}", snap.load.total_procs)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_governors(f: &mut Frame, area: Rect, statics: &StaticInfo, snap: &Snapshot) {
    let mut gov_spans = vec![Span::styled(" CPU Governors: ", Styles::muted())];
    for gov in &statics.governors.available {
        let style = if *gov == statics.governors.active {
            Styles::ok()
        } else {
            Styles::muted()
        };
        gov_spans.push(Span::styled(gov.clone(), style));
        gov_spans.push(Span::raw("  "));
    }

    let lines = vec![
        Line::from(format!(" CPU freq:  {} MHz", snap.cpu_freq_mhz)),
        Line::from(gov_spans),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_codecs(f: &mut Frame, area: Rect, statics: &StaticInfo) {
    let mut codec_spans = vec![Span::styled(" Video codecs:  ", Styles::muted())];
    for &codec in CODECS {
        let style = if statics.codecs_enabled.contains(codec) {
            Styles::ok()
        } else {
            Styles::hot()
        };
        codec_spans.push(Span::styled(codec, style));
        codec_spans.push(Span::raw("  "));
    }

    let lines = vec![
        Line::from(codec_spans),
        Line::from(format!(" GPU memory:    {}", statics.gpu_memory)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_throttling(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Throttling status ");

    let mut lines = vec![Line::styled("Current", Styles::header())];
    if snap.throttle.current.is_empty() {
        lines.push(Line::styled("none", Styles::muted()));
    } else {
        for &flag in &snap.throttle.current {
            lines.push(Line::styled(flag, Styles::alert_current()));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Since last boot", Styles::header()));
    if snap.throttle.since_boot.is_empty() {
        lines.push(Line::styled("none", Styles::muted()));
    } else {
        for &flag in &snap.throttle.since_boot {
            lines.push(Line::styled(flag, Styles::alert_boot()));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, screen: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::raw(format!(" Refresh rate: {:.1} s", app.config.refresh_secs)),
            Span::raw(format!("    Human units: {}", app.config.human_units)),
            Span::raw(format!(
                "    Size: {}x{}",
                screen.height, screen.width
            )),
        ]),
        Line::styled(
            " Exit (q)    Update disks (d)    Human units (h)    Rate (+/-)",
            Styles::muted(),
        ),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
