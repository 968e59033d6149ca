//! Console view of the telemetry feed with the noisy gauges removed.

use crate::message::Message;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// High-frequency instrument fields left out of the console output.
pub const BLOCKLIST: [&str; 11] = [
    "SpeedometerKPH",
    "MainReservoirPressureBAR",
    "TrainBrakeCylinderPressureBAR",
    "BrakePipePressureBAR",
    "RPM",
    "RPMDelta",
    "VirtualThrottle",
    "TractiveEffort",
    "Oil",
    "PZBWACH",
    "TrainBrakeControl",
];

/// Same format as C `asctime`, e.g. `Sun Oct 18 09:05:03 2026`.
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Copy of `message` without blocklisted fields.
pub fn filter(message: &Message) -> Message {
    message
        .iter()
        .filter(|(field, _)| !BLOCKLIST.contains(&field.as_str()))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

/// The console line for `message`, or `None` if nothing is left after
/// filtering.
pub fn report<Tz>(message: &Message, at: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let remaining = filter(message);
    if remaining.is_empty() {
        return None;
    }
    Some(format!(
        "[{}] Messages: {}",
        at.format(ASCTIME),
        serde_json::Value::Object(remaining)
    ))
}
