//! Dynamic header: scroll offset to title size and pinned state

use crate::config::HeaderConfig;

/// Visual state of the page header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderState {
    /// Title font size in px
    pub font_size: u32,
    /// Header has scrolled past its threshold and shows background/shadow
    pub pinned: bool,
}

/// Piecewise linear mapping from scroll offset to title size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderCurve {
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub scroll_range: u32,
    pub narrow_font_size: u32,
    pub narrow_scroll_range: u32,
}

impl Default for HeaderCurve {
    fn default() -> Self {
        Self::from(&HeaderConfig::default())
    }
}

impl From<&HeaderConfig> for HeaderCurve {
    fn from(config: &HeaderConfig) -> Self {
        Self {
            min_font_size: config.min_font_size,
            max_font_size: config.max_font_size,
            scroll_range: config.scroll_range.max(1),
            narrow_font_size: config.narrow_font_size,
            narrow_scroll_range: config.narrow_scroll_range.max(1),
        }
    }
}

impl HeaderCurve {
    /// Header state for a scroll offset on a narrow or wide viewport
    pub fn state(&self, offset: u32, narrow: bool) -> HeaderState {
        if narrow {
            return HeaderState {
                font_size: self.narrow_font_size,
                pinned: offset >= self.narrow_scroll_range,
            };
        }

        let min = self.min_font_size as f64;
        let max = self.max_font_size as f64;
        let size = if offset <= self.scroll_range {
            let ratio = offset as f64 / self.scroll_range as f64;
            (max - (max - min) * ratio).clamp(min, max)
        } else {
            min
        };

        HeaderState {
            font_size: size.round() as u32,
            pinned: offset >= self.scroll_range,
        }
    }
}
