//! Remote metric queries
//!
//! One method per metric kind, each issuing exactly one command over the
//! SSH session and returning the raw text unmodified. Parsing is a
//! separate stage (`crate::parsers`), caching policy belongs to the
//! render loop; this layer does neither, and it never retries.

use crate::error::Result;
use crate::ssh::SshSession;

const KERNEL_CMD: &str = "uname -rm";
const HOSTNAME_CMD: &str = "hostname";
const DISK_HUMAN_CMD: &str = "df -h";
const DISK_EXACT_CMD: &str = "df -k";
const GOVERNORS_CMD: &str = "cat /sys/devices/system/cpu/cpu0/cpufreq/scaling_available_governors \
     /sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";
const CODECS_CMD: &str =
    "for c in H264 MPG2 WVC1 MPG4 MJPG WMV9; do vcgencmd codec_enabled $c; done";
const GPU_MEM_CMD: &str = "vcgencmd get_mem gpu";
const UPTIME_CMD: &str = "uptime -p";
const GPU_TEMP_CMD: &str = "vcgencmd measure_temp";
const CPU_TEMP_CMD: &str = "cat /sys/class/thermal/thermal_zone0/temp";
const CPU_USAGE_CMD: &str = r"top -bn1 | awk '/Cpu\(s\)/ {print 100 - $8}'";
const LOADAVG_CMD: &str = "cat /proc/loadavg";
const RAM_CMD: &str = r#"free -m | awk 'NR==2 {print $3 " / " $2 " MB"}'"#;
const CPU_FREQ_CMD: &str = "cat /sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";
const THROTTLED_CMD: &str = "vcgencmd get_throttled";

/// Thin typed wrapper over the remote query surface.
pub struct MetricsCollector<'a> {
    session: &'a SshSession,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(session: &'a SshSession) -> Self {
        Self { session }
    }

    pub fn kernel(&self) -> Result<String> {
        self.session.exec("kernel-info", KERNEL_CMD)
    }

    pub fn hostname(&self) -> Result<String> {
        self.session.exec("hostname", HOSTNAME_CMD)
    }

    /// Disk usage table; `human` selects human-readable units.
    pub fn disk_usage(&self, human: bool) -> Result<String> {
        let cmd = if human { DISK_HUMAN_CMD } else { DISK_EXACT_CMD };
        self.session.exec("disk-usage", cmd)
    }

    /// Available governors on the first line, the active one on the second.
    pub fn governors(&self) -> Result<String> {
        self.session.exec("governors", GOVERNORS_CMD)
    }

    /// One `CODEC=enabled|disabled` line per known codec.
    pub fn codecs(&self) -> Result<String> {
        self.session.exec("codecs", CODECS_CMD)
    }

    pub fn gpu_memory(&self) -> Result<String> {
        self.session.exec("gpu-memory-split", GPU_MEM_CMD)
    }

    pub fn uptime(&self) -> Result<String> {
        self.session.exec("uptime", UPTIME_CMD)
    }

    /// Firmware-reported GPU temperature, `temp=48.3'C` form.
    pub fn gpu_temperature(&self) -> Result<String> {
        self.session.exec("gpu-temperature", GPU_TEMP_CMD)
    }

    /// Thermal-zone CPU temperature in millidegrees.
    pub fn cpu_temperature(&self) -> Result<String> {
        self.session.exec("cpu-temperature", CPU_TEMP_CMD)
    }

    /// Busy percentage across all cores.
    pub fn cpu_utilization(&self) -> Result<String> {
        self.session.exec("cpu-utilization", CPU_USAGE_CMD)
    }

    /// Raw `/proc/loadavg` line.
    pub fn load_averages(&self) -> Result<String> {
        self.session.exec("load-averages", LOADAVG_CMD)
    }

    /// Pre-formatted `used / total MB` string.
    pub fn ram_usage(&self) -> Result<String> {
        self.session.exec("ram-usage", RAM_CMD)
    }

    /// Current CPU frequency in kHz.
    pub fn cpu_frequency(&self) -> Result<String> {
        self.session.exec("cpu-frequency", CPU_FREQ_CMD)
    }

    /// Firmware throttling register, `throttled=0x50005` form.
    pub fn throttling(&self) -> Result<String> {
        self.session.exec("throttling-bitmask", THROTTLED_CMD)
    }
}
