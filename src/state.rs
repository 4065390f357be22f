//! Dashboard state and key handling
//!
//! A single `App` context owns every mutable piece of loop state: the
//! refresh configuration, the control flags and the cached disk table.
//! It is threaded through the render loop by the one loop thread, so
//! there is exactly one writer and no locking.

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::error::Result;
use crate::metrics::DiskRow;
use crate::parsers;

/// Lower bound for the refresh interval in seconds
pub const MIN_REFRESH_SECS: f64 = 0.1;

/// Step applied by the rate keys
const REFRESH_STEP_SECS: f64 = 0.1;

/// Operator-tunable display configuration.
#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    /// Seconds slept at the end of each tick; always >= [`MIN_REFRESH_SECS`]
    pub refresh_secs: f64,
    /// Whether the disk table uses human-readable units
    pub human_units: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 1.0,
            human_units: true,
        }
    }
}

/// Loop-scoped dashboard state.
pub struct App {
    pub config: DashboardConfig,
    /// Re-fetch the disk table on the next tick; cleared by that fetch
    pub refresh_disks: bool,
    /// One-way termination flag, checked at loop-top
    pub quit: bool,
    /// Current disk table; replaced wholesale on refresh
    pub disks: Vec<DiskRow>,
}

impl App {
    /// Fresh state; the disk refresh flag starts set so the first tick
    /// populates the table.
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
            refresh_disks: true,
            quit: false,
            disks: Vec::new(),
        }
    }

    /// Applies one key press. Unknown keys are a no-op; resize is handled
    /// by the loop itself and never reaches this table.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('d') => self.refresh_disks = true,
            KeyCode::Char('h') => {
                self.config.human_units = !self.config.human_units;
                self.refresh_disks = true;
            }
            KeyCode::Char('+') => self.config.refresh_secs += REFRESH_STEP_SECS,
            KeyCode::Char('-') => {
                self.config.refresh_secs -= REFRESH_STEP_SECS;
                if self.config.refresh_secs < MIN_REFRESH_SECS {
                    self.config.refresh_secs = MIN_REFRESH_SECS;
                }
            }
            _ => {}
        }
    }

    /// Honors a pending disk refresh: fetches the raw table with the
    /// current unit mode, replaces the cached rows wholesale and clears
    /// the flag. Without a pending refresh this is a no-op and `fetch`
    /// is never called. A failed fetch or parse propagates with the
    /// flag left set.
    pub fn update_disks<F>(&mut self, fetch: F) -> Result<()>
    where
        F: FnOnce(bool) -> Result<String>,
    {
        if !self.refresh_disks {
            return Ok(());
        }
        let raw = fetch(self.config.human_units)?;
        self.disks = parsers::parse_disk_table(&raw)?;
        self.refresh_disks = false;
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// End-of-tick sleep duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.config.refresh_secs)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_key_sets_termination_flag() {
        let mut app = App::new();
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_disk_refresh_starts_pending() {
        let app = App::new();
        assert!(app.refresh_disks);
    }

    #[test]
    fn test_disk_key_sets_pending_refresh() {
        let mut app = App::new();
        app.refresh_disks = false;
        app.handle_key(KeyCode::Char('d'));
        assert!(app.refresh_disks);
    }

    #[test]
    fn test_units_toggle_flips_flag_and_requests_refresh() {
        let mut app = App::new();
        app.refresh_disks = false;
        let before = app.config.human_units;
        app.handle_key(KeyCode::Char('h'));
        assert_eq!(app.config.human_units, !before);
        assert!(app.refresh_disks);
    }

    #[test]
    fn test_rate_increase() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('+'));
        assert!((app.config.refresh_secs - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_rate_decrease_clamps_at_minimum() {
        let mut app = App::new();
        app.config.refresh_secs = 0.2;
        app.handle_key(KeyCode::Char('-'));
        // one more press must clamp exactly, not drift below
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.config.refresh_secs, MIN_REFRESH_SECS);
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.config.refresh_secs, MIN_REFRESH_SECS);
    }

    const SAMPLE_DF: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/root        29G  4.2G   24G  15% /
";

    #[test]
    fn test_update_disks_honors_and_clears_pending_flag() {
        let mut app = App::new();
        assert!(app.refresh_disks);
        let mut fetched_with = None;
        app.update_disks(|human| {
            fetched_with = Some(human);
            Ok(SAMPLE_DF.to_string())
        })
        .unwrap();
        assert_eq!(fetched_with, Some(app.config.human_units));
        assert_eq!(app.disks.len(), 1);
        assert_eq!(app.disks[0].mounted, "/");
        assert!(!app.refresh_disks);
    }

    #[test]
    fn test_update_disks_skips_fetch_without_pending_flag() {
        let mut app = App::new();
        app.update_disks(|_| Ok(SAMPLE_DF.to_string())).unwrap();
        let mut fetched = false;
        app.update_disks(|_| {
            fetched = true;
            Ok(String::new())
        })
        .unwrap();
        assert!(!fetched);
        assert_eq!(app.disks.len(), 1);
    }

    #[test]
    fn test_update_disks_keeps_flag_set_on_bad_table() {
        let mut app = App::new();
        let result = app.update_disks(|_| Ok("/dev/root 29G\n".to_string()));
        assert!(result.is_err());
        assert!(app.refresh_disks);
    }

    #[test]
    fn test_units_toggle_triggers_refetch_in_new_mode() {
        let mut app = App::new();
        app.update_disks(|_| Ok(SAMPLE_DF.to_string())).unwrap();
        app.handle_key(KeyCode::Char('h'));
        let mut fetched_with = None;
        app.update_disks(|human| {
            fetched_with = Some(human);
            Ok(SAMPLE_DF.to_string())
        })
        .unwrap();
        assert_eq!(fetched_with, Some(false));
        assert!(!app.refresh_disks);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut app = App::new();
        let rate = app.config.refresh_secs;
        app.handle_key(KeyCode::Char('x'));
        app.handle_key(KeyCode::Esc);
        assert!(!app.should_quit());
        assert!(app.refresh_disks); // unchanged from startup
        assert_eq!(app.config.refresh_secs, rate);
    }
}
