//! Swanwoo Core - Presentation logic for the Swanwoo Pedals site
//!
//! Everything in this crate is independent of the browser and of the
//! renderer, so it can be unit tested natively:
//! - Site configuration (embedded TOML with URL query overrides)
//! - Scroll throttling, breakpoint detection and the dynamic header curve
//! - Critically-damped springs and the hover pose of a product model
//! - Orbit camera state with reset support
//! - Product spec documents and the per-viewer state machine
//! - Page grid layout and the shared reset toggle

pub mod breakpoint;
pub mod config;
pub mod damping;
pub mod header;
pub mod orbit;
pub mod page;
pub mod pose;
pub mod product;
pub mod scroll;
pub mod viewer;

pub use breakpoint::Breakpoint;
pub use config::{ConfigError, SiteConfig};
pub use damping::{Spring, Spring3};
pub use header::{HeaderCurve, HeaderState};
pub use orbit::{OrbitCamera, OrbitLimits};
pub use page::{GridCell, PageLayout, ResetToggle};
pub use pose::{ModelPose, Pointer};
pub use product::{ProductAssets, ProductSpec, SpecError};
pub use scroll::{ScrollSampler, Throttle};
pub use viewer::{LoadStatus, PointerEvent, ViewerState};
