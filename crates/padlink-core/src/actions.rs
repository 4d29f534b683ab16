// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joystick actions and the comma-joined action list codec.
//!
//! Tasks and histories persist their action sequences as a single
//! comma-joined column. Blank tokens are dropped on read so that
//! `"F,,B, "` decodes to `["F", "B"]`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single control input understood by the microcontroller firmware.
///
/// Each action is transmitted as a one-character command code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ControlAction {
    #[strum(serialize = "F")]
    Forward,
    #[strum(serialize = "B")]
    Backward,
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "R")]
    Right,
    #[strum(serialize = "S")]
    Stop,
    #[strum(serialize = "X")]
    ButtonX,
    #[strum(serialize = "Y")]
    ButtonY,
    #[strum(serialize = "A")]
    ButtonA,
    #[strum(serialize = "C")]
    ButtonC,
}

impl ControlAction {
    /// Command code sent over the transport.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

/// Join action labels into the persisted column format.
pub fn join_actions<S: AsRef<str>>(actions: &[S]) -> String {
    actions
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split the persisted column back into labels, dropping blank tokens.
pub fn split_actions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn split_drops_blank_tokens() {
        assert_eq!(split_actions("F,,B, ,L"), vec!["F", "B", "L"]);
        assert!(split_actions("").is_empty());
        assert!(split_actions(" , ,").is_empty());
    }

    #[test]
    fn join_skips_blank_labels() {
        assert_eq!(join_actions(&["F", " ", "R"]), "F,R");
        assert_eq!(join_actions::<&str>(&[]), "");
    }

    #[test]
    fn action_codes_parse_back() {
        assert_eq!(ControlAction::Forward.code(), "F");
        assert_eq!(ControlAction::from_str("S").unwrap(), ControlAction::Stop);
        assert!(ControlAction::from_str("Q").is_err());
    }
}
