use clap::Parser;

use crate::ssh::SshSession;
use crate::tui;

#[derive(Parser)]
#[command(name = "pidash")]
#[command(version)]
#[command(about = "Live terminal dashboard for a Raspberry Pi over SSH")]
#[command(long_about = "Pidash connects to a Raspberry Pi over SSH and renders a \
    full-screen dashboard of its vitals: disk usage, temperatures, CPU load, \
    frequency governors, video codec support and power/thermal throttling.\n\n\
    Example:\n  \
    pidash 192.168.1.40 pi raspberry\n\n\
    Keys:\n  \
    q quit, d refresh disks, h toggle human units, +/- adjust refresh rate")]
pub struct Cli {
    /// Destination host name or IP
    pub host: String,

    /// SSH user name
    pub user: String,

    /// SSH password
    pub password: String,
}

impl Cli {
    /// Connects to the remote host and runs the dashboard until the
    /// operator quits or a failure unwinds out of the render loop.
    ///
    /// The SSH session is closed when `session` drops, on every exit path.
    pub fn run(self) -> anyhow::Result<()> {
        let session = SshSession::connect(&self.host, &self.user, &self.password)?;
        tui::run(&session)
    }
}
