//! Image assets
//!
//! Images are decoded once into RGBA buffers and looked up by file name.
//! A file that fails to load is remembered as missing; drawing it falls back
//! to a placeholder instead of failing the frame.

use image::RgbaImage;
use std::collections::HashMap;
use std::path::PathBuf;

/// Sheet holding the player, bullet, enemy and explosion frames
pub const SPRITE_SHEET: &str = "sprites.png";

/// Tile repeated across the background
pub const TERRAIN: &str = "terrain.png";

type ReadyCallback = Box<dyn FnOnce(&Resources)>;

pub struct Resources {
    dir: PathBuf,
    /// `None` marks an image that was requested but failed to load
    images: HashMap<String, Option<RgbaImage>>,
    pending: usize,
    requested: bool,
    ready_callbacks: Vec<ReadyCallback>,
}

impl Resources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            images: HashMap::new(),
            pending: 0,
            requested: false,
            ready_callbacks: Vec::new(),
        }
    }

    /// Loads every named image from the asset directory, then fires the
    /// ready callbacks
    pub fn load(&mut self, names: &[&str]) {
        self.requested = true;
        self.pending += names.len();

        for name in names {
            let path = self.dir.join(name);
            let image = match image::open(&path) {
                Ok(image) => {
                    let image = image.to_rgba8();
                    log::info!(
                        "Loaded {} ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    );
                    Some(image)
                }
                Err(err) => {
                    log::warn!("Failed to load {}: {}", path.display(), err);
                    None
                }
            };
            self.images.insert((*name).to_string(), image);
            self.pending -= 1;
        }

        self.fire_ready();
    }

    /// Registers an already decoded image under `name`
    pub fn insert(&mut self, name: &str, image: RgbaImage) {
        self.images.insert(name.to_string(), Some(image));
    }

    /// The loaded image called `name`, if it loaded
    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.images.get(name).and_then(Option::as_ref)
    }

    /// True once a load has been requested and every image in it finished
    pub fn is_ready(&self) -> bool {
        self.requested && self.pending == 0
    }

    /// Runs `callback` once every requested image has been loaded. Runs it
    /// immediately if that has already happened.
    pub fn on_ready(&mut self, callback: impl FnOnce(&Resources) + 'static) {
        self.ready_callbacks.push(Box::new(callback));
        self.fire_ready();
    }

    fn fire_ready(&mut self) {
        if !self.is_ready() {
            return;
        }
        for callback in std::mem::take(&mut self.ready_callbacks) {
            callback(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_missing_image_is_absent() {
        let mut resources = Resources::new("no/such/dir");
        resources.load(&[SPRITE_SHEET]);
        assert!(resources.is_ready());
        assert!(resources.get(SPRITE_SHEET).is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut resources = Resources::new("img");
        resources.insert(TERRAIN, RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));
        let image = resources.get(TERRAIN).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_ready_callbacks_fire_once() {
        let fired = Rc::new(Cell::new(0));
        let mut resources = Resources::new("no/such/dir");

        let counter = Rc::clone(&fired);
        resources.on_ready(move |_| counter.set(counter.get() + 1));
        assert!(!resources.is_ready());
        assert_eq!(fired.get(), 0);

        resources.load(&[SPRITE_SHEET, TERRAIN]);
        assert_eq!(fired.get(), 1);

        resources.load(&[SPRITE_SHEET]);
        assert_eq!(fired.get(), 1);

        let counter = Rc::clone(&fired);
        resources.on_ready(move |res| {
            assert!(res.is_ready());
            counter.set(counter.get() + 1);
        });
        assert_eq!(fired.get(), 2);
    }
}
