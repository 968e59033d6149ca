//! Prints the telemetry feed to stdout, leaving out the high-frequency
//! gauges.

use chrono::Local;
use raildeck::{monitor, Config, Listener};
use std::convert::Infallible;

fn main() {
    env_logger::init();

    let config = Config::from_env();
    println!("RailDriver64 Listener\n");

    match Listener::new(&config).listen(|message| {
        if let Some(line) = monitor::report(&message, &Local::now()) {
            println!("{}", line);
        }
        Ok::<(), Infallible>(())
    }) {}
}
