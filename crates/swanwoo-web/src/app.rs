//! Bevy application setup

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::window::ExitCondition;
use swanwoo_core::{ConfigError, HeaderCurve, PageLayout, SiteConfig};

use crate::dom;
use crate::header::{HeaderPlugin, HeaderSettings};
use crate::input::{InputPlugin, WindowInput};
use crate::models::ModelsPlugin;
use crate::network::NetworkPlugin;
use crate::overlay::OverlayPlugin;
use crate::page;
use crate::viewer::ViewerPlugin;

/// Site configuration shipped with the bundle
const SITE_TOML: &str = include_str!("../site.toml");

/// Relative brightness of the shared ambient light
const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Site configuration as a resource
#[derive(Resource, Debug, Clone, Default)]
pub struct SiteSettings(pub SiteConfig);

/// Embedded configuration with URL overrides applied. An invalid document
/// falls back to the defaults; the error is returned for logging once the
/// subscriber is installed.
pub fn load_config() -> (SiteConfig, Option<ConfigError>) {
    let (mut config, error) = match SiteConfig::from_toml_str(SITE_TOML) {
        Ok(config) => (config, None),
        Err(e) => (SiteConfig::default(), Some(e)),
    };
    if let Some(search) = dom::location_search() {
        config.apply_query(&search);
    }
    (config, error)
}

/// Mount the page and run the Bevy application
pub fn run(config: SiteConfig) -> Result<()> {
    let layout = PageLayout::from_config(&config.grid);
    let page = page::mount(&config, &layout).context("Failed to build page")?;
    let input = WindowInput::attach(&config.viewport, &page).context("Failed to attach window listeners")?;

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(AmbientLight {
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    // Every viewer opens its own window on its own canvas
                    primary_window: None,
                    exit_condition: ExitCondition::DontExit,
                    ..default()
                })
                .set(AssetPlugin {
                    // Product assets are served from the site root
                    file_path: "".to_string(),
                    // Don't look for .meta files - the static host doesn't have them
                    meta_check: bevy::asset::AssetMetaCheck::Never,
                    ..default()
                }),
        )
        .insert_resource(HeaderSettings(HeaderCurve::from(&config.header)))
        .insert_resource(SiteSettings(config))
        .insert_non_send_resource(page)
        .insert_non_send_resource(input)
        .add_plugins(InputPlugin)
        .add_plugins(HeaderPlugin)
        .add_plugins(ViewerPlugin)
        .add_plugins(ModelsPlugin)
        .add_plugins(NetworkPlugin)
        .add_plugins(OverlayPlugin)
        .run();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = SiteConfig::from_toml_str(SITE_TOML).unwrap();
        assert_eq!(config.site.title, "Swanwoo Pedals");
        assert_eq!(config.grid.products, vec!["BigMuff", "FuzzFactory"]);
        assert_eq!(PageLayout::from_config(&config.grid).viewers().count(), 2);
        assert_eq!(PageLayout::from_config(&config.grid).cells.len(), 9);
        assert_eq!(config.site.instagram_icon, "instagram.webp");
    }
}
