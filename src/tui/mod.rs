//! Full-screen dashboard TUI
//!
//! Terminal setup/teardown and the render loop. The loop is
//! single-threaded and synchronous: each tick fetches, parses, draws,
//! polls one key and sleeps. Every remote query blocks the loop, so the
//! effective tick period is the refresh interval plus query latency —
//! an accepted property of a single-operator diagnostic tool.

pub mod dashboard;
pub mod theme;
pub mod widgets;

use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::collector::MetricsCollector;
use crate::error::Result as DashResult;
use crate::metrics::{Snapshot, StaticInfo};
use crate::parsers;
use crate::ssh::SshSession;
use crate::state::App;

/// Minimum terminal width the layout fits in
pub const MIN_COLS: u16 = 115;

/// Owns the raw-mode terminal and restores it on drop, so the operator's
/// terminal comes back usable on every exit path, including panics and
/// early error returns.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the dashboard against an established SSH session until the
/// operator quits or a failure unwinds out of the loop.
pub fn run(session: &SshSession) -> anyhow::Result<()> {
    let collector = MetricsCollector::new(session);
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // Session-static values are fetched once, after the terminal is up
    // so a fetch failure still restores it via the guard.
    let statics = fetch_static(&collector)?;
    run_loop(
        &mut guard.terminal,
        &collector,
        &statics,
        &mut app,
        session.host(),
    )?;
    Ok(())
}

fn fetch_static(collector: &MetricsCollector) -> DashResult<StaticInfo> {
    Ok(StaticInfo {
        kernel: collector.kernel()?.trim().to_string(),
        hostname: collector.hostname()?.trim().to_string(),
        governors: parsers::parse_governors(&collector.governors()?)?,
        codecs_enabled: parsers::parse_codecs(&collector.codecs()?),
        gpu_memory: collector.gpu_memory()?.trim().to_string(),
    })
}

fn fetch_snapshot(collector: &MetricsCollector) -> DashResult<Snapshot> {
    Ok(Snapshot {
        uptime: collector.uptime()?.trim().to_string(),
        gpu_temp: parsers::parse_gpu_temp(&collector.gpu_temperature()?)?,
        cpu_temp: parsers::parse_cpu_temp(&collector.cpu_temperature()?)?,
        cpu_usage: parsers::parse_cpu_usage(&collector.cpu_utilization()?)?,
        load: parsers::parse_loadavg(&collector.load_averages()?)?,
        ram: collector.ram_usage()?.trim().to_string(),
        cpu_freq_mhz: parsers::parse_cpu_freq(&collector.cpu_frequency()?)?,
        throttle: parsers::parse_throttled(&collector.throttling()?)?,
    })
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    collector: &MetricsCollector,
    statics: &StaticInfo,
    app: &mut App,
    host: &str,
) -> anyhow::Result<()> {
    loop {
        if app.should_quit() {
            break;
        }

        // Disk usage persists across ticks until invalidated by the
        // operator (or at startup); everything else is fetched fresh.
        app.update_disks(|human| collector.disk_usage(human))?;

        let snapshot = fetch_snapshot(collector)?;

        terminal.draw(|f| dashboard::render(f, statics, &snapshot, app, host))?;

        // Poll at most one key, non-blocking; no key is a valid outcome.
        if event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key)
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                {
                    app.handle_key(key.code);
                }
                Event::Resize(_, _) => {
                    terminal.clear()?;
                }
                _ => {}
            }
        }

        thread::sleep(app.interval());
    }
    Ok(())
}
