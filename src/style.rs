use std::path::PathBuf;

pub const FONT: &str = "Roboto-Regular.ttf";
pub const NULL_ICON: &str = "null.png";

/// Key index showing the speedometer readout.
pub const SPEED_KEY: u8 = 12;

/// Display state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Flag(bool),
    Value(i64),
}

impl KeyState {
    fn is_on(self) -> bool {
        match self {
            Self::Flag(on) => on,
            Self::Value(value) => value != 0,
        }
    }

    fn value(self) -> i64 {
        match self {
            Self::Flag(on) => on as i64,
            Self::Value(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStyle {
    pub name: &'static str,
    pub icon: &'static str,
    pub font: &'static str,
    pub label: String,
}

impl KeyStyle {
    fn flag(name: &'static str, on: &'static str, off: &'static str, state: KeyState) -> Self {
        Self {
            name,
            icon: if state.is_on() { on } else { off },
            font: FONT,
            label: String::new(),
        }
    }

    pub fn null() -> Self {
        Self {
            name: "null",
            icon: NULL_ICON,
            font: FONT,
            label: String::new(),
        }
    }
}

/// Chooses the icon and label for `key` in `state`.
pub fn key_style(key: u8, state: KeyState) -> KeyStyle {
    match key {
        1 => KeyStyle::flag("55", "55_on.png", "55_off.png", state),
        2 => KeyStyle::flag("70", "70_on.png", "70_off.png", state),
        3 => KeyStyle::flag("85", "85_on.png", "85_off.png", state),
        4 => KeyStyle::flag("sifa", "sifa_on.png", "sifa_off.png", state),
        6 => KeyStyle::flag("bef40", "bef40_on.png", "bef40_off.png", state),
        7 => KeyStyle::flag("500", "500_on.png", "500_off.png", state),
        8 => KeyStyle::flag("1000", "1000_on.png", "1000_off.png", state),
        9 => KeyStyle::flag("T", "t_on.png", "t_off.png", state),
        SPEED_KEY => KeyStyle {
            name: "speed",
            icon: NULL_ICON,
            font: FONT,
            label: speed_label(state.value()),
        },
        _ => KeyStyle::null(),
    }
}

/// `" 007\nkm/h"` for 7; negative values are padded as text, `"0-5"`.
pub fn speed_label(kph: i64) -> String {
    format!(" {:0>3}\nkm/h", kph.to_string())
}

/// Directory holding icon and font files.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn icon_path(&self, style: &KeyStyle) -> PathBuf {
        self.root.join(style.icon)
    }

    pub fn font_path(&self, style: &KeyStyle) -> PathBuf {
        self.root.join(style.font)
    }
}
