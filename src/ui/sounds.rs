use std::collections::HashMap;
use std::path::PathBuf;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::debug;

use crate::game::Sound;

pub const ASSETS_ENV: &str = "MEMORY_ASSETS";

/// Asset directory laid out as `sprites/` and `sounds/`.
#[derive(Clone, Debug)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn from_env() -> Self {
        let root = std::env::var_os(ASSETS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets"));
        Assets { root }
    }

    pub fn sprite(&self, texture: &str) -> PathBuf {
        self.root.join("sprites").join(format!("{texture}.png"))
    }

    pub fn sound(&self, sound: Sound) -> PathBuf {
        self.root.join("sounds").join(format!("{}.mp3", sound.name()))
    }
}

pub(super) struct SoundBank {
    assets: Assets,
    streams: HashMap<Sound, Option<gtk::MediaFile>>,
}

impl SoundBank {
    pub fn new(assets: Assets) -> Self {
        SoundBank {
            assets,
            streams: HashMap::new(),
        }
    }

    fn stream(&mut self, sound: Sound) -> Option<&gtk::MediaFile> {
        let assets = &self.assets;
        self.streams
            .entry(sound)
            .or_insert_with(|| {
                let path = assets.sound(sound);
                if !path.exists() {
                    debug!(path = %path.display(), "sound asset missing, staying silent");
                    return None;
                }
                let media = gtk::MediaFile::for_filename(&path);
                media.set_loop(sound.looped());
                Some(media)
            })
            .as_ref()
    }

    pub fn play(&mut self, sound: Sound, volume: f64) {
        let Some(media) = self.stream(sound) else {
            return;
        };
        media.set_volume(volume);
        if media.is_playing() {
            media.seek(0);
        }
        media.play();
    }
}
