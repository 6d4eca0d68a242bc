//! Per-product viewer state
//!
//! A viewer owns its spec, its model load status and its hover state. A
//! failure inside one viewer only ever changes that viewer's state, which is
//! how a broken asset stays contained to a single grid cell.

use crate::pose::Pointer;
use crate::product::{ProductSpec, SpecError};

/// Placeholder shown while the model is loading
pub const LOADING_TEXT: &str = "Loading 3D Model...";
/// Fallback shown when the model failed to load
pub const FALLBACK_TEXT: &str = "Error loading 3D model";

/// Model load status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Pointer events delivered by a viewer's render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Move(Pointer),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    name: String,
    spec: Option<ProductSpec>,
    status: LoadStatus,
    hovered: bool,
    pointer: Pointer,
    /// Last reset generation applied to the camera
    applied_reset: Option<u64>,
}

impl ViewerState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            spec: None,
            status: LoadStatus::Loading,
            hovered: false,
            pointer: Pointer::CENTER,
            applied_reset: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> Option<&ProductSpec> {
        self.spec.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Apply a pointer event; the latest event wins
    pub fn pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter => self.hovered = true,
            PointerEvent::Leave => self.hovered = false,
            PointerEvent::Move(p) => self.pointer = p,
        }
    }

    /// Store the outcome of a spec fetch. Errors leave the spec unset.
    pub fn spec_fetched(&mut self, result: Result<ProductSpec, SpecError>) {
        match result {
            Ok(spec) => {
                tracing::info!("Spec loaded for {}: {}", self.name, spec.title);
                self.spec = Some(spec);
            }
            Err(e) => {
                tracing::warn!("Spec unavailable for {}: {}", self.name, e);
            }
        }
    }

    /// Model finished loading. Has no effect once the viewer failed.
    pub fn model_loaded(&mut self) {
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Ready;
        }
    }

    /// Model failed to load. The failure is final for this viewer.
    pub fn model_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!("Failed to load model for {}: {}", self.name, reason);
        self.status = LoadStatus::Failed(reason);
        self.hovered = false;
    }

    /// Returns true when `generation` has not been applied yet, and records
    /// it. The first observation also counts, so a freshly mounted viewer
    /// starts from the initial camera.
    pub fn take_reset(&mut self, generation: u64) -> bool {
        if self.applied_reset == Some(generation) {
            return false;
        }
        self.applied_reset = Some(generation);
        true
    }

    /// Text replacing the canvas, if any
    pub fn status_text(&self) -> Option<&'static str> {
        match self.status {
            LoadStatus::Loading => Some(LOADING_TEXT),
            LoadStatus::Ready => None,
            LoadStatus::Failed(_) => Some(FALLBACK_TEXT),
        }
    }

    /// Title, date and spec lines; empty strings while no spec is known
    pub fn caption(&self) -> (&str, &str, &[String]) {
        match &self.spec {
            Some(spec) => (&spec.title, &spec.date, &spec.spec),
            None => ("", "", &[]),
        }
    }

    /// Hover animation only runs on a loaded model
    pub fn animates(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str) -> ProductSpec {
        ProductSpec {
            title: title.to_string(),
            date: "2025".to_string(),
            spec: vec!["Fuzz".to_string()],
        }
    }

    #[test]
    fn test_initial_state() {
        let viewer = ViewerState::new("BigMuff");
        assert_eq!(viewer.name(), "BigMuff");
        assert_eq!(*viewer.status(), LoadStatus::Loading);
        assert_eq!(viewer.status_text(), Some(LOADING_TEXT));
        assert!(!viewer.is_hovered());
        assert_eq!(viewer.caption(), ("", "", &[][..]));
    }

    #[test]
    fn test_hover_last_event_wins() {
        let mut viewer = ViewerState::new("BigMuff");
        viewer.pointer_event(PointerEvent::Enter);
        viewer.pointer_event(PointerEvent::Leave);
        viewer.pointer_event(PointerEvent::Enter);
        assert!(viewer.is_hovered());
        viewer.pointer_event(PointerEvent::Move(Pointer::new(0.5, 0.5)));
        viewer.pointer_event(PointerEvent::Leave);
        assert!(!viewer.is_hovered());
        assert_eq!(viewer.pointer(), Pointer::new(0.5, 0.5));
    }

    #[test]
    fn test_spec_failure_isolated_between_viewers() {
        let mut a = ViewerState::new("BigMuff");
        let mut b = ViewerState::new("FuzzFactory");
        a.spec_fetched(Err(SpecError::Status {
            url: "/x/BigMuff/spec.json".to_string(),
            status: 404,
        }));
        b.spec_fetched(Ok(spec("Fuzz Factory")));
        assert!(a.spec().is_none());
        assert_eq!(a.caption().0, "");
        assert_eq!(b.caption().0, "Fuzz Factory");
        assert_eq!(b.caption().2, &["Fuzz".to_string()][..]);
    }

    #[test]
    fn test_model_failure_is_final() {
        let mut viewer = ViewerState::new("BigMuff");
        viewer.pointer_event(PointerEvent::Enter);
        viewer.model_failed("404");
        assert_eq!(viewer.status_text(), Some(FALLBACK_TEXT));
        assert!(!viewer.is_hovered());
        viewer.model_loaded();
        assert_eq!(*viewer.status(), LoadStatus::Failed("404".to_string()));
        assert!(!viewer.animates());
    }

    #[test]
    fn test_model_failure_isolated_between_viewers() {
        let mut broken = ViewerState::new("BigMuff");
        let mut sibling = ViewerState::new("FuzzFactory");
        sibling.pointer_event(PointerEvent::Enter);

        broken.model_failed("asset load failed");
        assert_eq!(broken.status_text(), Some(FALLBACK_TEXT));
        assert!(!broken.animates());
        assert_eq!(sibling.status_text(), Some(LOADING_TEXT));
        assert!(sibling.is_hovered());

        sibling.model_loaded();
        assert_eq!(sibling.status_text(), None);
        assert!(sibling.animates());
        assert!(!broken.animates());
        assert!(matches!(broken.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn test_model_ready() {
        let mut viewer = ViewerState::new("BigMuff");
        viewer.model_loaded();
        assert_eq!(viewer.status_text(), None);
        assert!(viewer.animates());
    }

    #[test]
    fn test_reset_generations() {
        let mut viewer = ViewerState::new("BigMuff");
        assert!(viewer.take_reset(0));
        assert!(!viewer.take_reset(0));
        assert!(viewer.take_reset(1));
        assert!(!viewer.take_reset(1));
        assert!(viewer.take_reset(2));
    }
}
