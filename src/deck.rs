use crate::connection::Listener;
use crate::dispatch::{self, KeyUpdate};
use crate::message::Message;
use crate::render::render_key_image;
use crate::style::{key_style, Assets, KeyState};
use crate::Error;
use image::DynamicImage;
use std::sync::{Arc, Mutex};

/// Multi-key display hardware, as far as this crate needs it.
pub trait Deck: Send {
    /// Model name, e.g. `Original` or `Mini`.
    fn device_type(&self) -> String;

    fn key_count(&self) -> u8;

    /// Pixel size of one key image, `(width, height)`.
    fn key_image_size(&self) -> (u32, u32);

    /// Whether the keys have screens at all.
    fn is_visual(&self) -> bool;

    fn serial_number(&mut self) -> Result<String, Error>;

    fn firmware_version(&mut self) -> Result<String, Error>;

    fn reset(&mut self) -> Result<(), Error>;

    fn set_brightness(&mut self, percent: u8) -> Result<(), Error>;

    /// Converts a rendered key image into the bytes the device expects.
    fn to_native_format(&self, image: DynamicImage) -> Result<Vec<u8>, Error>;

    /// Stages native image data produced by `to_native_format` for `key`.
    /// Nothing reaches the keys until `flush`.
    fn set_key_image(&mut self, key: u8, data: &[u8]) -> Result<(), Error>;

    /// Sends every staged key image to the device.
    fn flush(&mut self) -> Result<(), Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckInfo {
    pub device_type: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub key_count: u8,
}

/// Drives one deck from telemetry. Clones share the same device lock.
pub struct Controller<D> {
    deck: Arc<Mutex<D>>,
    assets: Assets,
}

impl<D> Clone for Controller<D> {
    fn clone(&self) -> Self {
        Self {
            deck: Arc::clone(&self.deck),
            assets: self.assets.clone(),
        }
    }
}

impl<D: Deck> Controller<D> {
    pub fn new(deck: D, assets: Assets) -> Self {
        Self {
            deck: Arc::new(Mutex::new(deck)),
            assets,
        }
    }

    pub fn with_deck<T>(&self, f: impl FnOnce(&mut D) -> T) -> Result<T, Error> {
        let mut deck = self.deck.lock().map_err(|_| Error::Poisoned)?;
        Ok(f(&mut deck))
    }

    /// Renders and writes one key while holding the device lock.
    pub fn update_key(&self, key: u8, state: KeyState) -> Result<(), Error> {
        let style = key_style(key, state);
        self.with_deck(|deck| {
            if key >= deck.key_count() {
                log::debug!("deck has no key {}, skipping {}", key, style.name);
                return Ok(());
            }
            let image = render_key_image(&self.assets, &style, deck.key_image_size())?;
            let data = deck.to_native_format(image)?;
            log::trace!("key {} <- {} ({:?})", key, style.name, state);
            deck.set_key_image(key, &data)?;
            deck.flush()
        })?
    }

    /// Resets the device and sets its brightness, reporting who it is.
    pub fn setup(&self, brightness: u8) -> Result<DeckInfo, Error> {
        self.with_deck(|deck| {
            deck.reset()?;
            deck.set_brightness(brightness)?;
            let info = DeckInfo {
                device_type: deck.device_type(),
                serial_number: deck.serial_number()?,
                firmware_version: deck.firmware_version()?,
                key_count: deck.key_count(),
            };
            log::info!(
                "opened {} deck {} (fw {}, {} keys)",
                info.device_type,
                info.serial_number,
                info.firmware_version,
                info.key_count
            );
            Ok(info)
        })?
    }

    /// Gives every key its starting image.
    pub fn initialize(&self) -> Result<(), Error> {
        let key_count = self.with_deck(|deck| deck.key_count())?;
        for key in 0..key_count {
            self.update_key(key, dispatch::initial_state(key))?;
        }
        Ok(())
    }

    /// Applies one telemetry message, returning how many keys were updated.
    pub fn apply(&self, message: &Message) -> Result<usize, Error> {
        let updates = dispatch::plan(message);
        for KeyUpdate { key, state } in &updates {
            self.update_key(*key, *state)?;
        }
        Ok(updates.len())
    }

    /// Follows the telemetry feed until the device fails.
    pub fn run(&self, listener: &mut Listener) -> Error {
        listener.listen(|message| self.apply(&message).map(drop))
    }
}
