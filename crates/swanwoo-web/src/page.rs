//! Page skeleton built in the DOM before the renderer starts
//!
//! Every viewer canvas has to exist before Bevy creates its windows, so the
//! whole page is mounted up front under `#swanwoo-root`.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use swanwoo_core::config::SiteConfig;
use swanwoo_core::page::{canvas_id, panel_id, GridCell, PageLayout};
use swanwoo_core::viewer::LOADING_TEXT;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, append, create, js_error};

/// Id of the host element in `index.html`
pub const ROOT_ID: &str = "swanwoo-root";

/// Label of the fixed reset control
pub const RESET_LABEL: &str = "Reset View";
/// Every grid row is at least as tall as a viewer stage
pub const ROW_MIN_HEIGHT: u32 = 500;
pub const SOCIAL_ICON_SIZE: u32 = 40;

const STYLE: &str = r#"
body { margin: 0; background: #0a0a0a; color: #ededed; font-family: 'Bebas Neue', sans-serif; }
.sw-page { padding-top: 155px; }
.sw-header { position: fixed; top: 0; left: 0; width: 100%; height: 100px; z-index: 1000; text-align: center; font-weight: bold; transition: all 0.05s ease-out; }
.sw-header.sw-pinned { box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1); }
.sw-title { margin: 0; padding-top: 5px; background: transparent; transition: all 0.05s ease-out; }
.sw-header.sw-pinned .sw-title { background: #0a0a0a; }
.sw-underline { height: 2px; margin: 0 auto; background: #333; width: 0%; opacity: 0; transition: width 0.5s ease-out, opacity 0.5s ease-out; }
.sw-header.sw-pinned .sw-underline { width: 100%; opacity: 1; }
.sw-social { display: block; width: 40px; margin: 0 auto; }
.sw-social img { display: block; width: 40px; height: 40px; }
.sw-tagline { padding: 10px 0 20px; box-shadow: 0 10px 10px 0 #ffffff; }
.sw-tagline div { font-size: 25px; color: grey; text-align: center; }
.sw-grid { display: grid; gap: 30px; padding: 30px; background: black; border-bottom: solid 2px grey; box-sizing: border-box; width: 100vw; }
.sw-cell { position: relative; min-width: 0; }
.sw-cell-title { text-align: center; color: white; font-size: 37px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.sw-cell-date { text-align: center; color: grey; font-size: 18px; }
.sw-stage { position: relative; height: 500px; }
.sw-stage canvas { width: 100%; height: 100%; display: block; outline: none; }
.sw-status { position: absolute; inset: 0; display: flex; justify-content: center; align-items: center; pointer-events: none; }
.sw-status.sw-failed { color: red; }
.sw-bar { height: 4px; background: grey; width: 0%; opacity: 0; transition: width 0.5s ease-out, opacity 0.3s ease-out; }
.sw-cell.sw-hover .sw-bar { width: 100%; opacity: 1; }
.sw-name { font-size: 26px; color: grey; transition: color 0.5s ease-out; }
.sw-cell.sw-hover .sw-name { color: white; }
.sw-lines div { color: grey; }
.sw-closing { background: black; text-align: center; font-size: 60px; padding: 100px; }
.sw-footer { padding: 16px; font-size: 14px; text-align: center; color: grey; }
.sw-reset { position: fixed; bottom: 10px; right: 10px; z-index: 1001; background: transparent; color: grey; border: solid 1px #333; padding: 6px 12px; font: inherit; cursor: pointer; }
"#;

/// DOM handles for one product cell
pub struct PanelDom {
    pub cell: web::HtmlElement,
    pub canvas: web::HtmlElement,
    pub status: web::HtmlElement,
    pub title: web::HtmlElement,
    pub date: web::HtmlElement,
    pub lines: web::HtmlElement,
}

/// DOM handles the systems write to. Not `Send`, lives as a non-send resource.
pub struct PageDom {
    pub header: web::HtmlElement,
    pub title: web::HtmlElement,
    pub reset_button: web::HtmlElement,
    /// Keyed by product name
    pub panels: HashMap<String, PanelDom>,
}

impl PageDom {
    pub fn panel(&self, product: &str) -> Option<&PanelDom> {
        self.panels.get(product)
    }
}

/// CSS grid template for the configured shape
pub fn grid_template(layout: &PageLayout) -> (String, String) {
    (
        format!("repeat({}, 1fr)", layout.columns),
        format!("repeat({}, minmax({}px, auto))", layout.rows, ROW_MIN_HEIGHT),
    )
}

/// Build the page under the root element
pub fn mount(config: &SiteConfig, layout: &PageLayout) -> Result<PageDom> {
    let (_, document) = dom::window_document().ok_or_else(|| anyhow!("No browser document"))?;
    let root = document
        .get_element_by_id(ROOT_ID)
        .with_context(|| format!("Missing #{} element", ROOT_ID))?;
    let site = &config.site;

    document.set_title(&site.title);
    if let Some(head) = document.head() {
        let meta = document.create_element("meta").map_err(js_error)?;
        meta.set_attribute("name", "description").map_err(js_error)?;
        meta.set_attribute("content", &site.description).map_err(js_error)?;
        append(&head, &meta)?;
    }

    let style = document.create_element("style").map_err(js_error)?;
    style.set_text_content(Some(STYLE));
    append(&root, &style)?;

    let page = create(&document, "div", "sw-page", None)?;

    // Header
    let header = create(&document, "header", "sw-header", None)?;
    let title = create(&document, "h1", "sw-title", Some(&site.title))?;
    let underline = create(&document, "div", "sw-underline", None)?;
    append(&header, &title)?;
    append(&header, &underline)?;
    append(&page, &header)?;

    // Social link
    let social = create(&document, "a", "sw-social", None)?;
    social.set_attribute("href", &site.instagram).map_err(js_error)?;
    social.set_attribute("target", "_blank").map_err(js_error)?;
    social.set_attribute("rel", "noopener").map_err(js_error)?;
    let icon = create(&document, "img", "", None)?;
    icon.set_attribute("src", &site.instagram_icon).map_err(js_error)?;
    icon.set_attribute("alt", "instagram").map_err(js_error)?;
    icon.set_attribute("width", &SOCIAL_ICON_SIZE.to_string()).map_err(js_error)?;
    icon.set_attribute("height", &SOCIAL_ICON_SIZE.to_string()).map_err(js_error)?;
    append(&social, &icon)?;
    append(&page, &social)?;

    let tagline = create(&document, "section", "sw-tagline", None)?;
    for line in &site.tagline {
        let child = create(&document, "div", "", Some(line))?;
        append(&tagline, &child)?;
    }
    append(&page, &tagline)?;

    // Viewer grid
    let grid = create(&document, "section", "sw-grid", None)?;
    let (columns, rows) = grid_template(layout);
    dom::set_style(&grid, "grid-template-columns", &columns);
    dom::set_style(&grid, "grid-template-rows", &rows);

    let mut panels = HashMap::new();
    for cell in &layout.cells {
        match cell {
            GridCell::Viewer { product, .. } => {
                let panel = mount_panel(&document, &grid, product)?;
                panels.insert(product.clone(), panel);
            }
            GridCell::Reserved { .. } => {
                let child = create(&document, "div", "sw-cell sw-reserved", None)?;
                append(&grid, &child)?;
            }
        }
    }
    append(&page, &grid)?;

    let child = create(&document, "section", "sw-closing", Some(&site.closing))?;
    append(&page, &child)?;
    let child = create(&document, "footer", "sw-footer", Some(&site.footer))?;
    append(&page, &child)?;

    let reset_button = create(&document, "button", "sw-reset", Some(RESET_LABEL))?;
    reset_button.set_attribute("type", "button").map_err(js_error)?;
    append(&page, &reset_button)?;

    append(&root, &page)?;

    tracing::info!("Page mounted with {} viewers", panels.len());

    Ok(PageDom {
        header,
        title,
        reset_button,
        panels,
    })
}

fn mount_panel(document: &web::Document, grid: &web::HtmlElement, product: &str) -> Result<PanelDom> {
    let cell = create(document, "div", "sw-cell", None)?;
    cell.set_id(&panel_id(product, "cell"));

    let title = create(document, "div", "sw-cell-title", None)?;
    let date = create(document, "div", "sw-cell-date", None)?;
    append(&cell, &title)?;
    append(&cell, &date)?;

    let stage = create(document, "div", "sw-stage", None)?;
    let canvas = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("<canvas> is not a canvas element"))?;
    canvas.set_id(&canvas_id(product));
    let status = create(document, "div", "sw-status", Some(LOADING_TEXT))?;
    append(&stage, &canvas)?;
    append(&stage, &status)?;
    append(&cell, &stage)?;

    let caption = create(document, "div", "sw-caption", None)?;
    let child = create(document, "div", "sw-bar", None)?;
    append(&caption, &child)?;
    let child = create(document, "div", "sw-name", Some(product))?;
    append(&caption, &child)?;
    let lines = create(document, "div", "sw-lines", None)?;
    append(&caption, &lines)?;
    append(&cell, &caption)?;

    append(grid, &cell)?;

    Ok(PanelDom {
        cell,
        canvas: canvas.unchecked_into(),
        status,
        title,
        date,
        lines,
    })
}
