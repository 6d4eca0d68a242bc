//! Responsive breakpoint detection

/// Returns true when `width` is strictly below `threshold`
pub fn is_narrow(width: f64, threshold: f64) -> bool {
    width < threshold
}

/// Tracks the last observed viewport width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    threshold: f64,
    /// None until the first measurement
    width: Option<f64>,
}

impl Breakpoint {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            width: None,
        }
    }

    /// Record a new width. Returns true if the narrow flag changed.
    pub fn observe(&mut self, width: f64) -> bool {
        let before = self.is_narrow();
        self.width = Some(width);
        before != self.is_narrow()
    }

    /// Narrow flag; "not narrow" before the first measurement
    pub fn is_narrow(&self) -> bool {
        self.width
            .map(|w| is_narrow(w, self.threshold))
            .unwrap_or(false)
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(768.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        for w in [0.0, 320.0, 767.0, 767.9] {
            assert!(is_narrow(w, 768.0), "{} should be narrow", w);
        }
        for w in [768.0, 768.1, 1024.0, 1920.0] {
            assert!(!is_narrow(w, 768.0), "{} should not be narrow", w);
        }
    }

    #[test]
    fn test_not_narrow_before_measurement() {
        let bp = Breakpoint::default();
        assert_eq!(bp.width(), None);
        assert!(!bp.is_narrow());
    }

    #[test]
    fn test_observe_reports_changes() {
        let mut bp = Breakpoint::new(768.0);
        assert!(!bp.observe(1200.0));
        assert!(bp.observe(500.0));
        assert!(bp.is_narrow());
        assert!(!bp.observe(600.0));
        assert!(bp.observe(768.0));
        assert!(!bp.is_narrow());
    }
}
