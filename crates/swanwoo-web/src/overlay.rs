//! DOM side of each viewer: status text, caption and hover styling

use bevy::prelude::*;
use std::collections::HashMap;
use swanwoo_core::{LoadStatus, ViewerState};

use crate::dom::{self, create};
use crate::page::{PageDom, PanelDom};
use crate::viewer::ViewerStatus;

pub const HOVER_CLASS: &str = "sw-hover";
pub const FAILED_CLASS: &str = "sw-failed";

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, sync_panels);
    }
}

/// Everything the DOM shows for one viewer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelView {
    pub status_text: Option<&'static str>,
    pub failed: bool,
    pub hovered: bool,
    pub title: String,
    pub date: String,
    pub lines: Vec<String>,
}

impl PanelView {
    pub fn from_state(state: &ViewerState) -> Self {
        let (title, date, lines) = state.caption();
        Self {
            status_text: state.status_text(),
            failed: matches!(state.status(), LoadStatus::Failed(_)),
            hovered: state.is_hovered(),
            title: title.to_string(),
            date: date.to_string(),
            lines: lines.to_vec(),
        }
    }

    fn caption_differs(&self, other: &PanelView) -> bool {
        self.title != other.title || self.date != other.date || self.lines != other.lines
    }
}

fn sync_panels(
    page: Option<NonSend<PageDom>>,
    viewers: Query<(Entity, &ViewerStatus), Changed<ViewerStatus>>,
    mut shown: Local<HashMap<Entity, PanelView>>,
) {
    let Some(page) = page else {
        return;
    };
    for (entity, status) in viewers.iter() {
        let Some(panel) = page.panel(status.name()) else {
            continue;
        };
        let view = PanelView::from_state(status);
        let previous = shown.get(&entity);
        if previous == Some(&view) {
            continue;
        }
        render(panel, previous, &view);
        shown.insert(entity, view);
    }
}

fn render(panel: &PanelDom, previous: Option<&PanelView>, view: &PanelView) {
    if previous.map(|p| (p.status_text, p.failed)) != Some((view.status_text, view.failed)) {
        match view.status_text {
            Some(text) => {
                panel.status.set_text_content(Some(text));
                dom::set_style(&panel.status, "display", "flex");
            }
            None => dom::set_style(&panel.status, "display", "none"),
        }
        dom::toggle_class(&panel.status, FAILED_CLASS, view.failed);
        if view.failed {
            dom::set_style(&panel.canvas, "display", "none");
        }
    }

    if previous.map(|p| p.hovered) != Some(view.hovered) {
        dom::toggle_class(&panel.cell, HOVER_CLASS, view.hovered);
    }

    if previous.map_or(true, |p| p.caption_differs(view)) {
        panel.title.set_text_content(Some(&view.title));
        panel.date.set_text_content(Some(&view.date));
        panel.lines.set_text_content(None);
        if let Some(document) = dom::window_document().map(|(_, d)| d) {
            for line in &view.lines {
                match create(&document, "div", "", Some(line)) {
                    Ok(el) => {
                        if let Err(e) = dom::append(&panel.lines, &el) {
                            tracing::debug!("Failed to add spec line: {}", e);
                        }
                    }
                    Err(e) => tracing::debug!("Failed to create spec line: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swanwoo_core::{Pointer, PointerEvent, ProductSpec};

    #[test]
    fn test_view_follows_state() {
        let mut state = ViewerState::new("BigMuff");
        let loading = PanelView::from_state(&state);
        assert_eq!(loading.status_text, Some("Loading 3D Model..."));
        assert!(!loading.failed);
        assert!(loading.title.is_empty());

        state.model_loaded();
        state.spec_fetched(Ok(ProductSpec {
            title: "Big Muff Pi".to_string(),
            date: "2025".to_string(),
            spec: vec!["Fuzz".to_string(), "9V".to_string()],
        }));
        state.pointer_event(PointerEvent::Enter);
        let ready = PanelView::from_state(&state);
        assert_eq!(ready.status_text, None);
        assert!(ready.hovered);
        assert_eq!(ready.lines, vec!["Fuzz", "9V"]);
        assert!(ready.caption_differs(&loading));
    }

    #[test]
    fn test_pointer_moves_do_not_change_view() {
        let mut state = ViewerState::new("BigMuff");
        state.model_loaded();
        let before = PanelView::from_state(&state);
        state.pointer_event(PointerEvent::Move(Pointer::new(0.3, -0.2)));
        assert_eq!(PanelView::from_state(&state), before);
    }

    #[test]
    fn test_failed_view() {
        let mut state = ViewerState::new("FuzzFactory");
        state.model_failed("HTTP 404");
        let view = PanelView::from_state(&state);
        assert!(view.failed);
        assert_eq!(view.status_text, Some("Error loading 3D model"));
    }
}
