//! Elgato Stream Deck hardware over HID.

use crate::deck::Deck;
use crate::Error;
use elgato_streamdeck::images::convert_image;
use elgato_streamdeck::{list_devices, new_hidapi, StreamDeck};
use image::DynamicImage;

fn device<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::Device(Box::new(err))
}

/// Connects to every attached Stream Deck.
pub fn open_all() -> Result<Vec<StreamDeck>, Error> {
    let hid = new_hidapi().map_err(device)?;
    list_devices(&hid)
        .into_iter()
        .map(|(kind, serial)| {
            log::debug!("connecting to {:?} {}", kind, serial);
            StreamDeck::connect(&hid, kind, &serial).map_err(device)
        })
        .collect()
}

impl Deck for StreamDeck {
    fn device_type(&self) -> String {
        format!("{:?}", self.kind())
    }

    fn key_count(&self) -> u8 {
        self.kind().key_count()
    }

    fn key_image_size(&self) -> (u32, u32) {
        let (width, height) = self.kind().key_image_format().size;
        (width as u32, height as u32)
    }

    fn is_visual(&self) -> bool {
        self.kind().is_visual()
    }

    fn serial_number(&mut self) -> Result<String, Error> {
        StreamDeck::serial_number(self).map_err(device)
    }

    fn firmware_version(&mut self) -> Result<String, Error> {
        StreamDeck::firmware_version(self).map_err(device)
    }

    fn reset(&mut self) -> Result<(), Error> {
        StreamDeck::reset(self).map_err(device)
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), Error> {
        StreamDeck::set_brightness(self, percent).map_err(device)
    }

    fn to_native_format(&self, image: DynamicImage) -> Result<Vec<u8>, Error> {
        convert_image(self.kind(), image).map_err(device)
    }

    fn set_key_image(&mut self, key: u8, data: &[u8]) -> Result<(), Error> {
        self.write_image(key, data).map_err(device)
    }

    fn flush(&mut self) -> Result<(), Error> {
        StreamDeck::flush(self).map_err(device)
    }
}
