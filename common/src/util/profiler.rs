use std::time::{Duration, Instant};

pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("{} took {:?}", self.name, self.start.elapsed());
    }
}

/// `1h 02m 03.4s` style formatting for run-time summaries.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs_f64();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = total % 60.0;
    if hours > 0 {
        format!("{}h {:02}m {:04.1}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:04.1}s", minutes, seconds)
    } else {
        format!("{:.3}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_and_long_durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(62)), "1m 02.0s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h 02m 03.0s");
    }
}
