use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use roundnav_core::NavigationConfig;
use roundnav_core::anim::Easing;
use roundnav_core::arc::ArcColors;
use roundnav_core::color::HexColor;
use roundnav_core::ring::{IconName, TintColors};
use roundnav_core::widget::DEFAULT_RADIUS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tint_duration_ms: u64,
    pub rotation_duration_ms: u64,
    pub rotation_easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let defaults = NavigationConfig::default();
        Self {
            tint_duration_ms: defaults.tint_duration.as_millis() as u64,
            rotation_duration_ms: defaults.rotation_duration.as_millis() as u64,
            rotation_easing: defaults.rotation_easing,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    pub button_selected: HexColor,
    pub button_unselected: HexColor,
    pub indicator_start: HexColor,
    pub indicator_end: HexColor,
    pub background_start: HexColor,
    pub background_end: HexColor,
    pub shadow: HexColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let tint = TintColors::default();
        let arc = ArcColors::default();
        Self {
            button_selected: tint.selected.into(),
            button_unselected: tint.unselected.into(),
            indicator_start: arc.indicator_start.into(),
            indicator_end: arc.indicator_end.into(),
            background_start: arc.background_start.into(),
            background_end: arc.background_end.into(),
            shadow: arc.shadow.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub radius: f64,
    pub icons: Vec<IconName>,
    pub animation: AnimationConfig,
    pub colors: ColorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            icons: IconName::defaults(),
            animation: AnimationConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl Config {
    pub fn navigation(&self) -> NavigationConfig {
        let colors = &self.colors;
        NavigationConfig {
            radius: self.radius,
            icons: self.icons.clone(),
            tint_colors: TintColors {
                selected: colors.button_selected.into(),
                unselected: colors.button_unselected.into(),
            },
            arc_colors: ArcColors {
                indicator_start: colors.indicator_start.into(),
                indicator_end: colors.indicator_end.into(),
                background_start: colors.background_start.into(),
                background_end: colors.background_end.into(),
                shadow: colors.shadow.into(),
            },
            tint_duration: Duration::from_millis(self.animation.tint_duration_ms),
            rotation_duration: Duration::from_millis(self.animation.rotation_duration_ms),
            rotation_easing: self.animation.rotation_easing,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "snuffix", "roundnav").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ROUNDNAV")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Falls back to the built-in defaults when the file is missing or broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let bundled = parse_toml(DEFAULT_CONFIG).navigation();
        let defaults = NavigationConfig::default();
        assert_eq!(bundled.radius, defaults.radius);
        assert_eq!(bundled.icons, defaults.icons);
        assert_eq!(bundled.tint_duration, defaults.tint_duration);
        assert_eq!(bundled.rotation_easing, defaults.rotation_easing);
        assert_eq!(
            HexColor::from(bundled.arc_colors.indicator_start).to_string(),
            "#643cbf"
        );
        assert_eq!(
            HexColor::from(bundled.tint_colors.unselected).to_string(),
            "#d5d3e3"
        );
        let shadow = bundled.arc_colors.shadow;
        assert!((shadow.alpha - defaults.arc_colors.shadow.alpha).abs() < 0.01);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_toml(
            r##"
radius = 180.0

[animation]
rotation_easing = "linear"

[colors]
indicator_start = "#000000"
"##,
        );
        let nav = config.navigation();
        assert_eq!(nav.radius, 180.0);
        assert_eq!(nav.rotation_easing, Easing::Linear);
        assert_eq!(nav.rotation_duration, Duration::from_millis(500));
        assert_eq!(nav.icons, IconName::defaults());
        assert_eq!(HexColor::from(nav.arc_colors.indicator_start).to_string(), "#000000");
        assert_eq!(HexColor::from(nav.arc_colors.indicator_end).to_string(), "#7646cf");
    }

    #[test]
    fn test_config_json_deserialization() {
        let config: Config = serde_json::from_str(
            r##"{"icons": ["go-home"], "colors": {"shadow": "#00000040"}}"##,
        )
        .unwrap();
        assert_eq!(config.icons, vec![IconName::new("go-home")]);
        assert_eq!(config.colors.shadow.to_string(), "#00000040");
        assert_eq!(config.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"colors": {"shadow": "white"}}"#);
        assert!(result.is_err());
    }
}
