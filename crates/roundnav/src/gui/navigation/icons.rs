use super::{ICON_LOOKUP_SIZE, ICON_RASTER_SIZE};
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use parking_lot::RwLock;
use roundnav_core::ring::IconName;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Icon '{0}' not found in the current icon theme")]
    NotFound(IconName),
    #[error("Failed to load icon: {0}")]
    Load(#[from] glib::Error),
}

static PATHS: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

fn paths() -> &'static RwLock<HashMap<IconName, Option<PathBuf>>> {
    PATHS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Forgets resolved paths, e.g. after the icon theme or config changed.
pub fn refresh_cache() {
    paths().write().clear();
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }
    if let Some(cached) = paths().read().get(icon_name) {
        return cached.clone();
    }

    let found = resolve(icon_name);
    paths().write().insert(icon_name.clone(), found.clone());
    found
}

fn resolve(icon_name: &IconName) -> Option<PathBuf> {
    let path = Path::new(icon_name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(ICON_LOOKUP_SIZE)
        .with_scale(1)
        .find()
}

pub fn load_icon(icon_name: &IconName) -> Result<Pixbuf, IconError> {
    let path = find_icon_path(icon_name).ok_or_else(|| IconError::NotFound(icon_name.clone()))?;
    Ok(Pixbuf::from_file_at_scale(
        &path,
        ICON_RASTER_SIZE,
        ICON_RASTER_SIZE,
        true,
    )?)
}

/// Loaded pixbufs for the ring. Failed loads are remembered so a missing icon
/// is reported once rather than on every frame.
#[derive(Default)]
pub struct IconSet {
    pixbufs: HashMap<IconName, Option<Pixbuf>>,
}

impl IconSet {
    pub fn get(&mut self, name: &IconName) -> Option<Pixbuf> {
        self.pixbufs
            .entry(name.clone())
            .or_insert_with(|| match load_icon(name) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.pixbufs.clear();
    }
}
