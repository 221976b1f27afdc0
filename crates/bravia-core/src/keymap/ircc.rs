//! Fixed IRCC codes for the physical Bravia remote.
//!
//! IRCC ("InfraRed Compatible Control over IP") is how Bravia TVs accept
//! remote-control presses over the network.  Each button is identified by a
//! short Base64 string that encodes the original infrared code.
//!
//! # What does an IRCC code look like? (for beginners)
//!
//! | Button  | IRCC code                |
//! |---------|--------------------------|
//! | Power   | `AAAAAQAAAAEAAAAVAw==`   |
//! | Up      | `AAAAAQAAAAEAAAB0Aw==`   |
//! | Confirm | `AAAAAQAAAAEAAABlAw==`   |
//!
//! The codes are opaque: nothing in this crate decodes them.  They are sent
//! to the TV verbatim inside a SOAP envelope by the transport layer.
//!
//! The keys below are the ones every Bravia model accepts.  App launchers and
//! model-specific buttons come from the TV's own command directory instead
//! (see [`crate::domain::directory`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::navigation::NavCommand;

/// A button on the standard Bravia remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RemoteKey {
    // Power and inputs
    Power,
    Input,
    SyncMenu,
    Hdmi1,
    Hdmi2,
    Hdmi3,
    Hdmi4,

    // Number pad
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    Dot,
    CC,

    // Colour keys
    Red,
    Green,
    Yellow,
    Blue,

    // Cursor pad
    Up,
    Down,
    Right,
    Left,
    Confirm,

    // Menus
    Help,
    Display,
    Options,
    Back,
    Home,

    // Audio
    VolumeUp,
    VolumeDown,
    Mute,
    Audio,

    // Channels
    ChannelUp,
    ChannelDown,

    // Playback
    Play,
    Pause,
    Stop,
    FlashPlus,
    FlashMinus,
    Prev,
    Next,
}

/// `(key, name, IRCC code)` in declaration order, so `TABLE[key as usize]`
/// is the row for `key`.
const TABLE: &[(RemoteKey, &str, &str)] = &[
    (RemoteKey::Power, "Power", "AAAAAQAAAAEAAAAVAw=="),
    (RemoteKey::Input, "Input", "AAAAAQAAAAEAAAAlAw=="),
    (RemoteKey::SyncMenu, "SyncMenu", "AAAAAgAAABoAAABYAw=="),
    (RemoteKey::Hdmi1, "Hdmi1", "AAAAAgAAABoAAABaAw=="),
    (RemoteKey::Hdmi2, "Hdmi2", "AAAAAgAAABoAAABbAw=="),
    (RemoteKey::Hdmi3, "Hdmi3", "AAAAAgAAABoAAABcAw=="),
    (RemoteKey::Hdmi4, "Hdmi4", "AAAAAgAAABoAAABdAw=="),
    (RemoteKey::Num1, "Num1", "AAAAAQAAAAEAAAAAAw=="),
    (RemoteKey::Num2, "Num2", "AAAAAQAAAAEAAAABAw=="),
    (RemoteKey::Num3, "Num3", "AAAAAQAAAAEAAAACAw=="),
    (RemoteKey::Num4, "Num4", "AAAAAQAAAAEAAAADAw=="),
    (RemoteKey::Num5, "Num5", "AAAAAQAAAAEAAAAEAw=="),
    (RemoteKey::Num6, "Num6", "AAAAAQAAAAEAAAAFAw=="),
    (RemoteKey::Num7, "Num7", "AAAAAQAAAAEAAAAGAw=="),
    (RemoteKey::Num8, "Num8", "AAAAAQAAAAEAAAAHAw=="),
    (RemoteKey::Num9, "Num9", "AAAAAQAAAAEAAAAIAw=="),
    (RemoteKey::Num0, "Num0", "AAAAAQAAAAEAAAAJAw=="),
    (RemoteKey::Dot, "Dot", "AAAAAgAAAJcAAAAdAw=="),
    (RemoteKey::CC, "CC", "AAAAAgAAAJcAAAAoAw=="),
    (RemoteKey::Red, "Red", "AAAAAgAAAJcAAAAlAw=="),
    (RemoteKey::Green, "Green", "AAAAAgAAAJcAAAAmAw=="),
    (RemoteKey::Yellow, "Yellow", "AAAAAgAAAJcAAAAnAw=="),
    (RemoteKey::Blue, "Blue", "AAAAAgAAAJcAAAAkAw=="),
    (RemoteKey::Up, "Up", "AAAAAQAAAAEAAAB0Aw=="),
    (RemoteKey::Down, "Down", "AAAAAQAAAAEAAAB1Aw=="),
    (RemoteKey::Right, "Right", "AAAAAQAAAAEAAAAzAw=="),
    (RemoteKey::Left, "Left", "AAAAAQAAAAEAAAA0Aw=="),
    (RemoteKey::Confirm, "Confirm", "AAAAAQAAAAEAAABlAw=="),
    (RemoteKey::Help, "Help", "AAAAAgAAAMQAAABNAw=="),
    (RemoteKey::Display, "Display", "AAAAAQAAAAEAAAA6Aw=="),
    (RemoteKey::Options, "Options", "AAAAAgAAAJcAAAA2Aw=="),
    (RemoteKey::Back, "Back", "AAAAAgAAAJcAAAAjAw=="),
    (RemoteKey::Home, "Home", "AAAAAQAAAAEAAABgAw=="),
    (RemoteKey::VolumeUp, "VolumeUp", "AAAAAQAAAAEAAAASAw=="),
    (RemoteKey::VolumeDown, "VolumeDown", "AAAAAQAAAAEAAAATAw=="),
    (RemoteKey::Mute, "Mute", "AAAAAQAAAAEAAAAUAw=="),
    (RemoteKey::Audio, "Audio", "AAAAAQAAAAEAAAAXAw=="),
    (RemoteKey::ChannelUp, "ChannelUp", "AAAAAQAAAAEAAAAQAw=="),
    (RemoteKey::ChannelDown, "ChannelDown", "AAAAAQAAAAEAAAARAw=="),
    (RemoteKey::Play, "Play", "AAAAAgAAAJcAAAAaAw=="),
    (RemoteKey::Pause, "Pause", "AAAAAgAAAJcAAAAZAw=="),
    (RemoteKey::Stop, "Stop", "AAAAAgAAAJcAAAAYAw=="),
    (RemoteKey::FlashPlus, "FlashPlus", "AAAAAgAAAJcAAAB4Aw=="),
    (RemoteKey::FlashMinus, "FlashMinus", "AAAAAgAAAJcAAAB5Aw=="),
    (RemoteKey::Prev, "Prev", "AAAAAgAAAJcAAAA8Aw=="),
    (RemoteKey::Next, "Next", "AAAAAgAAAJcAAAA9Aw=="),
];

impl RemoteKey {
    /// The Base64 IRCC code sent to the TV.
    pub fn code(self) -> &'static str {
        TABLE[self as usize].2
    }

    /// The button name, matching the variant name.
    pub fn name(self) -> &'static str {
        TABLE[self as usize].1
    }

    /// Iterates over every key in declaration order.
    pub fn all() -> impl Iterator<Item = RemoteKey> {
        TABLE.iter().map(|(key, _, _)| *key)
    }

    /// Looks a key up by name, ignoring ASCII case and `_`/`-` separators,
    /// so `"volume_up"`, `"VolumeUp"` and `"volume-up"` all match.
    pub fn from_name(name: &str) -> Option<RemoteKey> {
        let wanted = normalize(name);
        TABLE
            .iter()
            .find(|(_, n, _)| normalize(n) == wanted)
            .map(|(key, _, _)| *key)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for RemoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<NavCommand> for RemoteKey {
    fn from(cmd: NavCommand) -> Self {
        match cmd {
            NavCommand::Up => RemoteKey::Up,
            NavCommand::Down => RemoteKey::Down,
            NavCommand::Left => RemoteKey::Left,
            NavCommand::Right => RemoteKey::Right,
            NavCommand::Confirm => RemoteKey::Confirm,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
