//! Browser input: window scroll and resize, and the reset control
//!
//! The DOM listeners feed shared state that per-frame systems copy into Bevy
//! resources. Scroll readings are throttled at the listener so a burst of
//! scroll events costs at most one update per throttle window.

use anyhow::{anyhow, Result};
use bevy::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use swanwoo_core::config::ViewportConfig;
use swanwoo_core::{Breakpoint, ResetToggle, ScrollSampler};

use crate::dom::{self, EventListener};
use crate::page::PageDom;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<ResetGeneration>()
            .add_systems(PreUpdate, (sync_viewport, sync_reset));
    }
}

/// Scroll offset and breakpoint flag as seen by the header
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: u32,
    pub narrow: bool,
}

/// Reset generation broadcast to every viewer
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetGeneration(pub u64);

/// State shared with the DOM listeners. Not `Send`; the listeners are
/// removed when this is dropped.
pub struct WindowInput {
    sampler: Rc<RefCell<ScrollSampler>>,
    breakpoint: Rc<RefCell<Breakpoint>>,
    reset: Rc<RefCell<ResetToggle>>,
    _listeners: Vec<EventListener>,
}

impl WindowInput {
    pub fn attach(config: &ViewportConfig, page: &PageDom) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("No browser window"))?;

        let sampler = Rc::new(RefCell::new(ScrollSampler::new(config.scroll_throttle_ms)));
        let breakpoint = Rc::new(RefCell::new(Breakpoint::new(config.narrow_breakpoint)));
        let reset = Rc::new(RefCell::new(ResetToggle::default()));

        // Measure once at mount
        sampler.borrow_mut().sample(dom::now_ms(), window.scroll_y().unwrap_or(0.0));
        if let Some(width) = inner_width(&window) {
            breakpoint.borrow_mut().observe(width);
        }

        let mut listeners = Vec::new();

        let scroll_sampler = sampler.clone();
        let scroll_window = window.clone();
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            let y = scroll_window.scroll_y().unwrap_or(0.0);
            if let Some(offset) = scroll_sampler.borrow_mut().sample(dom::now_ms(), y) {
                tracing::trace!("Scroll offset {}", offset);
            }
        })?);

        let resize_breakpoint = breakpoint.clone();
        let resize_window = window.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(width) = inner_width(&resize_window) {
                if resize_breakpoint.borrow_mut().observe(width) {
                    tracing::debug!("Viewport width {} crossed the breakpoint", width);
                }
            }
        })?);

        let click_reset = reset.clone();
        listeners.push(EventListener::new(&page.reset_button, "click", move |_| {
            let generation = click_reset.borrow_mut().trigger();
            tracing::info!("Reset view requested (generation {})", generation);
        })?);

        Ok(Self {
            sampler,
            breakpoint,
            reset,
            _listeners: listeners,
        })
    }
}

fn inner_width(window: &web_sys::Window) -> Option<f64> {
    window.inner_width().ok().and_then(|w| w.as_f64())
}

/// Copy the throttled scroll offset and breakpoint flag into [`Viewport`]
fn sync_viewport(input: Option<NonSend<WindowInput>>, mut viewport: ResMut<Viewport>) {
    let Some(input) = input else {
        return;
    };
    let offset = {
        let mut sampler = input.sampler.borrow_mut();
        // Deliver the resting position of a scroll that ended inside the window
        sampler.flush(dom::now_ms());
        sampler.offset()
    };
    let narrow = input.breakpoint.borrow().is_narrow();
    viewport.set_if_neq(Viewport {
        scroll_offset: offset,
        narrow,
    });
}

fn sync_reset(input: Option<NonSend<WindowInput>>, mut generation: ResMut<ResetGeneration>) {
    let Some(input) = input else {
        return;
    };
    let current = input.reset.borrow().generation();
    generation.set_if_neq(ResetGeneration(current));
}
