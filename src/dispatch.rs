//! Maps telemetry fields onto key updates.

use crate::message::{self, Message};
use crate::style::{KeyState, SPEED_KEY};

/// How a field value turns into a key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `1` is on, `0` is off.
    Flag,
    /// Any count from `1` up is on, `0` is off.
    AtLeastOne,
    /// `1` shows the off icon, anything below shows the on icon.
    Inverted,
    /// Integer readout, always shown.
    Speed,
}

impl Rule {
    pub fn state(self, value: f64) -> Option<KeyState> {
        match self {
            Self::Flag if value == 1.0 => Some(KeyState::Flag(true)),
            Self::Flag if value == 0.0 => Some(KeyState::Flag(false)),
            Self::AtLeastOne if value >= 1.0 => Some(KeyState::Flag(true)),
            Self::AtLeastOne if value == 0.0 => Some(KeyState::Flag(false)),
            Self::Inverted if value == 1.0 => Some(KeyState::Flag(false)),
            Self::Inverted if value < 1.0 => Some(KeyState::Flag(true)),
            Self::Speed => Some(KeyState::Value(value.trunc() as i64)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub field: &'static str,
    pub key: u8,
    pub rule: Rule,
}

const fn bind(field: &'static str, key: u8, rule: Rule) -> Binding {
    Binding { field, key, rule }
}

/// Fields the display reacts to, in evaluation order.
pub const BINDINGS: [Binding; 9] = [
    bind("55", 1, Rule::Flag),
    bind("70", 2, Rule::Flag),
    bind("85", 3, Rule::Flag),
    bind("40", 6, Rule::Flag),
    bind("500", 7, Rule::Flag),
    bind("1000", 8, Rule::Flag),
    bind("sifawarn", 4, Rule::AtLeastOne),
    bind("doorlock", 9, Rule::Inverted),
    bind("SpeedometerKPH", SPEED_KEY, Rule::Speed),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUpdate {
    pub key: u8,
    pub state: KeyState,
}

/// Key updates due for `message`. Absent fields produce nothing.
pub fn plan(message: &Message) -> Vec<KeyUpdate> {
    BINDINGS
        .iter()
        .filter_map(|binding| {
            let value = message::number(message, binding.field)?;
            let state = binding.rule.state(value);
            if state.is_none() {
                log::debug!("{} = {} changes nothing", binding.field, value);
            }
            Some(KeyUpdate {
                key: binding.key,
                state: state?,
            })
        })
        .collect()
}

/// State each key shows before any telemetry arrives.
pub fn initial_state(key: u8) -> KeyState {
    if key == SPEED_KEY {
        KeyState::Value(0)
    } else {
        KeyState::Flag(false)
    }
}
