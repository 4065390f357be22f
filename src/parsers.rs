//! Parsers for raw remote command output
//!
//! Pure functions turning the plain-text payloads returned by the
//! collector into structured values. Anything that does not match the
//! expected shape is a [`DashError::Parse`].

use std::collections::HashSet;

use crate::error::{DashError, Result};
use crate::metrics::{
    DiskRow, Governors, LoadInfo, ThrottleGroup, ThrottleStatus, THROTTLE_FLAGS,
};

/// Parses a `df` table into rows, skipping the header line.
///
/// Each data line must carry at least five whitespace-separated fields:
/// filesystem, size, used, available, and the mount point as the last
/// field (`df` puts the use% column between available and mount point).
pub fn parse_disk_table(raw: &str) -> Result<Vec<DiskRow>> {
    let mut rows = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Filesystem") {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            return Err(DashError::parse(
                "disk usage table",
                format!("row has {} fields, expected at least 5: '{line}'", parts.len()),
            ));
        }
        rows.push(DiskRow {
            filesystem: parts[0].to_string(),
            size: parts[1].to_string(),
            used: parts[2].to_string(),
            available: parts[3].to_string(),
            mounted: parts[parts.len() - 1].to_string(),
        });
    }
    Ok(rows)
}

/// Decodes `vcgencmd get_throttled` output (`throttled=0x50005`) into a
/// 32-character '0'/'1' sequence, least-significant bit first, so that
/// register bit `i` lands at string index `i`.
pub fn throttle_bits(raw: &str) -> Result<String> {
    let value = raw
        .trim()
        .split_once('=')
        .map(|(_, v)| v)
        .ok_or_else(|| DashError::parse("throttling register", format!("no '=' in '{raw}'")))?;
    let hex = value.trim().trim_start_matches("0x");
    let register = u32::from_str_radix(hex, 16)
        .map_err(|e| DashError::parse("throttling register", format!("bad hex '{value}': {e}")))?;

    Ok((0..32)
        .map(|i| if register >> i & 1 == 1 { '1' } else { '0' })
        .collect())
}

/// Scans a '0'/'1' bit sequence and collects the matched flag labels.
///
/// Index 0 is the first character. Every index is tested; indices outside
/// the fixed flag table are ignored even when set. Labels within each
/// group follow index order.
pub fn parse_throttle_bits(bits: &str) -> Result<ThrottleStatus> {
    let mut status = ThrottleStatus::default();
    for (index, bit) in bits.trim().chars().enumerate() {
        match bit {
            '0' => continue,
            '1' => {
                let Some(&(_, label, group)) =
                    THROTTLE_FLAGS.iter().find(|(i, _, _)| *i == index)
                else {
                    continue;
                };
                match group {
                    ThrottleGroup::Current => status.current.push(label),
                    ThrottleGroup::SinceBoot => status.since_boot.push(label),
                }
            }
            other => {
                return Err(DashError::parse(
                    "throttling bits",
                    format!("unexpected character '{other}' at index {index}"),
                ));
            }
        }
    }
    Ok(status)
}

/// Full throttling pipeline: register text to flag lists.
pub fn parse_throttled(raw: &str) -> Result<ThrottleStatus> {
    parse_throttle_bits(&throttle_bits(raw)?)
}

/// Parses the two-line governors payload: available set, then active.
pub fn parse_governors(raw: &str) -> Result<Governors> {
    let mut lines = raw.lines();
    let available: Vec<String> = lines
        .next()
        .ok_or_else(|| DashError::parse("governors", "empty output"))?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let active = lines
        .next()
        .ok_or_else(|| DashError::parse("governors", "missing active governor line"))?
        .trim()
        .to_string();
    if available.is_empty() || active.is_empty() {
        return Err(DashError::parse("governors", "blank governor list"));
    }
    Ok(Governors { available, active })
}

/// Parses `CODEC=enabled|disabled` lines into the set of enabled codecs.
/// Malformed lines are skipped; firmware output here is best-effort.
pub fn parse_codecs(raw: &str) -> HashSet<String> {
    raw.lines()
        .filter_map(|line| line.trim().split_once('='))
        .filter(|(_, state)| *state == "enabled")
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Parses `temp=48.3'C` into degrees Celsius.
pub fn parse_gpu_temp(raw: &str) -> Result<f32> {
    raw.trim()
        .strip_prefix("temp=")
        .map(|v| v.trim_end_matches("'C"))
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| DashError::parse("GPU temperature", format!("unexpected output '{raw}'")))
}

/// Parses a thermal-zone reading (millidegrees) into degrees Celsius.
pub fn parse_cpu_temp(raw: &str) -> Result<f32> {
    let millis: f32 = raw
        .trim()
        .parse()
        .map_err(|e| DashError::parse("CPU temperature", format!("'{}': {e}", raw.trim())))?;
    Ok(millis / 1000.0)
}

/// Parses the busy-percent pipeline output.
pub fn parse_cpu_usage(raw: &str) -> Result<f32> {
    raw.trim()
        .parse()
        .map_err(|e| DashError::parse("CPU utilization", format!("'{}': {e}", raw.trim())))
}

/// Parses `/proc/loadavg`: three averages plus `running/total` counts.
///
/// Both process counts are reduced by one to exclude the sampling
/// process itself.
pub fn parse_loadavg(raw: &str) -> Result<LoadInfo> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(DashError::parse(
            "load averages",
            format!("too few fields in '{}'", raw.trim()),
        ));
    }
    let (active, total) = parts[3]
        .split_once('/')
        .ok_or_else(|| DashError::parse("load averages", format!("bad process counts '{}'", parts[3])))?;

    let average = |s: &str| -> Result<f32> {
        s.parse()
            .map_err(|e| DashError::parse("load averages", format!("bad average '{s}': {e}")))
    };
    let count = |s: &str| -> Result<u32> {
        s.parse()
            .map_err(|e| DashError::parse("load averages", format!("bad process count '{s}': {e}")))
    };

    Ok(LoadInfo {
        one: average(parts[0])?,
        five: average(parts[1])?,
        fifteen: average(parts[2])?,
        active_procs: count(active)?.saturating_sub(1),
        total_procs: count(total)?.saturating_sub(1),
    })
}

/// Parses the cpufreq sysfs reading (kHz) into MHz.
pub fn parse_cpu_freq(raw: &str) -> Result<u32> {
    let khz: u32 = raw
        .trim()
        .parse()
        .map_err(|e| DashError::parse("CPU frequency", format!("'{}': {e}", raw.trim())))?;
    Ok(khz / 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DF: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/root        29G  4.2G   24G  15% /
devtmpfs        1.8G     0  1.8G   0% /dev
/dev/mmcblk0p1  255M   31M  225M  13% /boot
";

    #[test]
    fn test_disk_table_skips_header_and_blank_lines() {
        let rows = parse_disk_table(SAMPLE_DF).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].filesystem, "/dev/root");
        assert_eq!(rows[0].size, "29G");
        assert_eq!(rows[0].used, "4.2G");
        assert_eq!(rows[0].available, "24G");
        assert_eq!(rows[0].mounted, "/");
        assert_eq!(rows[2].mounted, "/boot");
    }

    #[test]
    fn test_disk_table_short_row_is_error() {
        let result = parse_disk_table("/dev/root 29G 4.2G\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_disk_table_empty_output() {
        assert!(parse_disk_table("").unwrap().is_empty());
    }

    #[test]
    fn test_throttle_bits_lsb_first() {
        // Bits 0, 2, 16 and 18: undervoltage + throttled, now and since boot
        let bits = throttle_bits("throttled=0x50005").unwrap();
        assert_eq!(bits.len(), 32);
        for (i, c) in bits.chars().enumerate() {
            let expected = matches!(i, 0 | 2 | 16 | 18);
            assert_eq!(c == '1', expected, "bit {i}");
        }
    }

    #[test]
    fn test_throttle_bits_rejects_bad_input() {
        assert!(throttle_bits("garbage").is_err());
        assert!(throttle_bits("throttled=0xZZ").is_err());
    }

    #[test]
    fn test_throttle_flags_each_single_bit() {
        for &(index, label, group) in THROTTLE_FLAGS {
            let mut bits = vec!['0'; 32];
            bits[index] = '1';
            let bits: String = bits.into_iter().collect();
            let status = parse_throttle_bits(&bits).unwrap();
            match group {
                ThrottleGroup::Current => {
                    assert_eq!(status.current, vec![label]);
                    assert!(status.since_boot.is_empty());
                }
                ThrottleGroup::SinceBoot => {
                    assert_eq!(status.since_boot, vec![label]);
                    assert!(status.current.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_throttle_all_zero() {
        let status = parse_throttle_bits(&"0".repeat(32)).unwrap();
        assert!(status.current.is_empty());
        assert!(status.since_boot.is_empty());
    }

    #[test]
    fn test_throttle_undervoltage_now_and_since_boot() {
        // Worked example: indices 0 and 16 set
        let status = parse_throttle_bits("1000000000000000100000000000000").unwrap();
        assert_eq!(status.current, vec!["Under voltage"]);
        assert_eq!(status.since_boot, vec!["Under voltage"]);
    }

    #[test]
    fn test_throttle_unknown_bits_ignored() {
        // Bits 4..16 and 20..32 are defined but meaningless
        let mut bits = vec!['1'; 32];
        for &(index, _, _) in THROTTLE_FLAGS {
            bits[index] = '0';
        }
        let bits: String = bits.into_iter().collect();
        let status = parse_throttle_bits(&bits).unwrap();
        assert!(status.current.is_empty());
        assert!(status.since_boot.is_empty());
    }

    #[test]
    fn test_throttle_flag_order_follows_index_order() {
        let status = parse_throttle_bits("1111").unwrap();
        assert_eq!(
            status.current,
            vec![
                "Under voltage",
                "Arm frequency capped",
                "Throttled",
                "Soft temperature limit"
            ]
        );
    }

    #[test]
    fn test_throttle_bits_rejects_non_binary() {
        assert!(parse_throttle_bits("10x1").is_err());
    }

    #[test]
    fn test_throttled_full_pipeline() {
        let status = parse_throttled("throttled=0x50005").unwrap();
        assert_eq!(status.current, vec!["Under voltage", "Throttled"]);
        assert_eq!(status.since_boot, vec!["Under voltage", "Throttled"]);
    }

    #[test]
    fn test_governors() {
        let govs = parse_governors("conservative ondemand performance\nondemand\n").unwrap();
        assert_eq!(govs.available, vec!["conservative", "ondemand", "performance"]);
        assert_eq!(govs.active, "ondemand");
    }

    #[test]
    fn test_governors_missing_active_line() {
        assert!(parse_governors("ondemand performance\n").is_err());
    }

    #[test]
    fn test_codecs() {
        let enabled = parse_codecs("H264=enabled\nMPG2=disabled\nWVC1=disabled\nMJPG=enabled\n");
        assert!(enabled.contains("H264"));
        assert!(enabled.contains("MJPG"));
        assert!(!enabled.contains("MPG2"));
    }

    #[test]
    fn test_gpu_temp() {
        let temp = parse_gpu_temp("temp=48.3'C\n").unwrap();
        assert!((temp - 48.3).abs() < 0.01);
        assert!(parse_gpu_temp("48.3").is_err());
    }

    #[test]
    fn test_cpu_temp_millidegrees() {
        let temp = parse_cpu_temp("52817\n").unwrap();
        assert!((temp - 52.817).abs() < 0.01);
    }

    #[test]
    fn test_cpu_usage() {
        let usage = parse_cpu_usage("12.5\n").unwrap();
        assert!((usage - 12.5).abs() < 0.01);
        assert!(parse_cpu_usage("n/a").is_err());
    }

    #[test]
    fn test_loadavg() {
        let load = parse_loadavg("0.52 0.34 0.28 3/142 4712\n").unwrap();
        assert!((load.one - 0.52).abs() < 0.01);
        assert!((load.five - 0.34).abs() < 0.01);
        assert!((load.fifteen - 0.28).abs() < 0.01);
        // the sampling process itself is excluded
        assert_eq!(load.active_procs, 2);
        assert_eq!(load.total_procs, 141);
    }

    #[test]
    fn test_loadavg_too_few_fields() {
        assert!(parse_loadavg("0.52 0.34\n").is_err());
    }

    #[test]
    fn test_loadavg_rejects_malformed_fields() {
        // garbage must never render as plausible zeros
        assert!(parse_loadavg("abc def ghi xx/yy 123\n").is_err());
        assert!(parse_loadavg("0.52 0.34 0.28 xx/yy 123\n").is_err());
        assert!(parse_loadavg("0.52 0.34 bad 3/142 123\n").is_err());
    }

    #[test]
    fn test_cpu_freq_khz_to_mhz() {
        assert_eq!(parse_cpu_freq("1500000\n").unwrap(), 1500);
        assert!(parse_cpu_freq("fast").is_err());
    }
}
