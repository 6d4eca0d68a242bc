//! Scroll-reactive page header

use bevy::prelude::*;
use swanwoo_core::{HeaderCurve, HeaderState};

use crate::dom;
use crate::input::Viewport;
use crate::page::PageDom;

pub const PINNED_CLASS: &str = "sw-pinned";

pub struct HeaderPlugin;

impl Plugin for HeaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeaderSettings>()
            .add_systems(Update, update_header);
    }
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HeaderSettings(pub HeaderCurve);

/// Title font size as a CSS value
pub fn font_size_css(state: &HeaderState) -> String {
    format!("{}px", state.font_size)
}

fn update_header(
    viewport: Res<Viewport>,
    settings: Res<HeaderSettings>,
    page: Option<NonSend<PageDom>>,
    mut applied: Local<Option<HeaderState>>,
) {
    let Some(page) = page else {
        return;
    };
    if applied.is_some() && !viewport.is_changed() && !settings.is_changed() {
        return;
    }

    let state = settings.0.state(viewport.scroll_offset, viewport.narrow);
    if *applied == Some(state) {
        return;
    }

    dom::set_style(&page.title, "font-size", &font_size_css(&state));
    if applied.map(|s| s.pinned) != Some(state.pinned) {
        dom::toggle_class(&page.header, PINNED_CLASS, state.pinned);
        tracing::debug!("Header pinned: {}", state.pinned);
    }
    *applied = Some(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_css() {
        let curve = HeaderCurve::default();
        assert_eq!(font_size_css(&curve.state(0, false)), "100px");
        assert_eq!(font_size_css(&curve.state(50, false)), "70px");
        assert_eq!(font_size_css(&curve.state(500, true)), "60px");
    }
}
