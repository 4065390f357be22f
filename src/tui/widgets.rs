//! Temperature gauge rendering

/// Bar width of the temperature gauges, in character cells
pub const MAX_BAR_COLS: usize = 20;

/// Temperature that corresponds to a full bar (°C)
pub const MAX_TEMP: f32 = 70.0;

const BAR_CHAR: char = '█';

/// Severity tier of a temperature reading. Selects the display color,
/// independent of the bar fill calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Normal,
    Warm,
    Hot,
}

/// Tier thresholds: green below 55, yellow below 65, red from 65 up.
pub fn severity(temp: f32) -> Tier {
    if temp < 55.0 {
        Tier::Normal
    } else if temp < 65.0 {
        Tier::Warm
    } else {
        Tier::Hot
    }
}

/// Fill length for a temperature bar: `floor(value * width / scale)`,
/// clamped to `[0, max_width]` so readings beyond the calibration scale
/// cannot overrun the layout.
pub fn bar_fill(value: f32, max_width: usize, max_scale: f32) -> usize {
    if max_scale <= 0.0 || value <= 0.0 {
        return 0;
    }
    let fill = (value * max_width as f32 / max_scale).floor() as usize;
    fill.min(max_width)
}

/// Renders a temperature as a fixed-width bar string plus its tier.
/// The bar is fill characters left-justified, space-padded to
/// [`MAX_BAR_COLS`].
pub fn temp_gauge(temp: f32) -> (String, Tier) {
    let fill = bar_fill(temp, MAX_BAR_COLS, MAX_TEMP);
    let mut bar: String = std::iter::repeat(BAR_CHAR).take(fill).collect();
    bar.extend(std::iter::repeat(' ').take(MAX_BAR_COLS - fill));
    (bar, severity(temp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_monotonic_in_temperature() {
        let mut last = 0;
        for tenth in 0..=900 {
            let temp = tenth as f32 / 10.0;
            let fill = bar_fill(temp, MAX_BAR_COLS, MAX_TEMP);
            assert!(fill >= last, "fill decreased at {temp}");
            last = fill;
        }
    }

    #[test]
    fn test_full_bar_at_scale() {
        assert_eq!(bar_fill(70.0, 20, 70.0), 20);
    }

    #[test]
    fn test_fill_clamped_above_scale() {
        assert_eq!(bar_fill(85.0, 20, 70.0), 20);
    }

    #[test]
    fn test_fill_proportional() {
        // 35 of 70 degrees over 20 columns is half a bar
        assert_eq!(bar_fill(35.0, 20, 70.0), 10);
        assert_eq!(bar_fill(0.0, 20, 70.0), 0);
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(severity(54.9), Tier::Normal);
        assert_eq!(severity(55.0), Tier::Warm);
        assert_eq!(severity(64.9), Tier::Warm);
        assert_eq!(severity(65.0), Tier::Hot);
    }

    #[test]
    fn test_gauge_at_scale_is_full_and_hot() {
        let (bar, tier) = temp_gauge(70.0);
        assert_eq!(bar.chars().count(), MAX_BAR_COLS);
        assert!(bar.chars().all(|c| c == '█'));
        assert_eq!(tier, Tier::Hot);
    }

    #[test]
    fn test_gauge_padded_to_width() {
        let (bar, tier) = temp_gauge(42.0);
        assert_eq!(bar.chars().count(), MAX_BAR_COLS);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 12);
        assert_eq!(tier, Tier::Normal);
    }
}
