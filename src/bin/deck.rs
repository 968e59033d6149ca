//! Mirrors train state onto the keys of every attached Stream Deck.

use anyhow::Context;
use raildeck::style::Assets;
use raildeck::{streamdeck, Config, Controller, Deck, Listener};
use std::thread;

const BRIGHTNESS: u8 = 100;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let decks = streamdeck::open_all().context("enumerating Stream Decks")?;
    println!("Found {} Stream Deck(s).\n", decks.len());

    let mut listeners = Vec::new();
    for deck in decks {
        // Pedals and other keys without screens have nothing to show.
        if !deck.is_visual() {
            continue;
        }

        let controller = Controller::new(deck, Assets::new(config.assets_dir.clone()));
        let info = controller.setup(BRIGHTNESS)?;
        println!(
            "Opened '{}' device (serial number: '{}', fw: '{}')",
            info.device_type, info.serial_number, info.firmware_version
        );
        controller
            .initialize()
            .with_context(|| format!("drawing initial keys on {}", info.serial_number))?;

        let mut listener = Listener::new(&config);
        listeners.push(thread::spawn(move || {
            let err = controller.run(&mut listener);
            log::error!("deck {} stopped: {}", info.serial_number, err);
        }));
    }

    for listener in listeners {
        if listener.join().is_err() {
            log::error!("listener thread panicked");
        }
    }
    Ok(())
}
