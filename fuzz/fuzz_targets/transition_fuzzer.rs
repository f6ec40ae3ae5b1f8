//! Fuzz target for the dialogue state machine
//!
//! Drives a virtual session through arbitrary inputs using only the pure
//! transition function.
//!
//! # Invariants
//!
//! - Only LOGON ever rejects
//! - LOGON accepts exactly the password and the three help tokens
//! - Screens past LOGON and GAMES are only reachable through the password
//! - Same screen and token always give the same action

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wopr_core::{normalize, transition, Action, Screen, PASSWORD};

#[derive(Debug, Arbitrary)]
enum Input {
    Password,
    Help,
    HelpGames,
    ListGames,
    Raw(String),
}

impl Input {
    fn text(&self) -> &str {
        match self {
            Self::Password => "joshua\r\n",
            Self::Help => "help\r\n",
            Self::HelpGames => "Help Games\n",
            Self::ListGames => "LIST GAMES\r\n",
            Self::Raw(raw) => raw,
        }
    }
}

fuzz_target!(|inputs: Vec<Input>| {
    let mut screen = Screen::Logon;
    let mut authenticated = false;

    for input in &inputs {
        let token = normalize(input.text());
        let action = transition(screen, &token);
        assert_eq!(transition(screen, &token), action);

        if action == Action::Reject {
            assert_eq!(screen, Screen::Logon);
            assert!(!matches!(token.as_str(), "JOSHUA" | "HELP" | "HELP LOGON" | "HELP GAMES"));
        }

        if screen == Screen::Logon && token == PASSWORD {
            authenticated = true;
        }

        let next = action.destination();
        if next == Screen::Logon {
            authenticated = false;
        }
        assert!(
            !next.requires_authentication() || authenticated,
            "{next} reached without the password"
        );

        screen = next;
    }
});
