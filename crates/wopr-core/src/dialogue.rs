//! Dialogue state machine.
//!
//! Pure decision logic: given the current screen and a normalized token,
//! decide what happens next. Side effects are described by [`Action`] and
//! carried out by [`crate::Session`].

use crate::{Passage, Screen, step};

/// Outcome of one input at one screen.
///
/// Screens that ignore their input still produce an `Advance`: the token is
/// consumed, one prompt per screen, but never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Enter `Screen` and render its step.
    Advance(Screen),
    /// Render `passage`, then enter `then`.
    Interlude {
        /// Auxiliary text to render first.
        passage: Passage,
        /// Screen entered afterwards.
        then: Screen,
    },
    /// Render the rejection notice, disconnect, and return to logon.
    Reject,
}

impl Action {
    /// Screen the session ends up on after this action, assuming the
    /// transport survives it.
    pub fn destination(self) -> Screen {
        match self {
            Self::Advance(screen) | Self::Interlude { then: screen, .. } => screen,
            Self::Reject => Screen::Logon,
        }
    }
}

/// Decide the outcome of `token` at `screen`.
///
/// `token` must already be normalized. The result depends on nothing but
/// the two arguments.
pub fn transition(screen: Screen, token: &str) -> Action {
    step(screen).route(token)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::normalize;

    fn screen_strategy() -> impl Strategy<Value = Screen> {
        (0..Screen::ALL.len()).prop_map(|i| Screen::ALL[i])
    }

    #[test]
    fn logon_password_greets() {
        assert_eq!(transition(Screen::Logon, "JOSHUA"), Action::Advance(Screen::Greeting));
    }

    #[test]
    fn logon_help_stays_at_logon() {
        let help = Action::Interlude { passage: Passage::Help, then: Screen::Logon };
        assert_eq!(transition(Screen::Logon, "HELP"), help);
        assert_eq!(transition(Screen::Logon, "HELP LOGON"), help);
    }

    #[test]
    fn logon_help_games_explains_games() {
        assert_eq!(transition(Screen::Logon, "HELP GAMES"), Action::Advance(Screen::Games));
    }

    #[test]
    fn logon_rejects_near_misses() {
        for token in ["", "JOSH", "JOSHUA ", " JOSHUA", "joshua", "HELP  GAMES", "LIST GAMES"] {
            assert_eq!(transition(Screen::Logon, token), Action::Reject, "{token:?}");
        }
    }

    #[test]
    fn games_lists_then_returns_to_logon() {
        assert_eq!(
            transition(Screen::Games, "LIST GAMES"),
            Action::Interlude { passage: Passage::GameList, then: Screen::Logon }
        );
        assert_eq!(transition(Screen::Games, "PLAY"), Action::Advance(Screen::Logon));
        assert_eq!(transition(Screen::Games, "JOSHUA"), Action::Advance(Screen::Logon));
    }

    #[test]
    fn conversation_advances_unconditionally() {
        let chain = [
            (Screen::Greeting, Screen::Wellbeing),
            (Screen::Wellbeing, Screen::Explanation),
            (Screen::Explanation, Screen::PlayGame),
            (Screen::PlayGame, Screen::PlayGameVerify),
            (Screen::PlayGameVerify, Screen::GlobalWar),
            (Screen::GlobalWar, Screen::FirstStrike),
            (Screen::FirstStrike, Screen::SecondStrike),
            (Screen::SecondStrike, Screen::Logon),
        ];
        for (from, to) in chain {
            for token in ["", "FINE", "1", "JOSHUA", "LIST GAMES"] {
                assert_eq!(transition(from, token), Action::Advance(to), "{from} / {token:?}");
            }
        }
    }

    #[test]
    fn reject_returns_to_logon() {
        assert_eq!(Action::Reject.destination(), Screen::Logon);
    }

    proptest! {
        #[test]
        fn prop_transition_is_pure(screen in screen_strategy(), raw in "[ -~\r\n]{0,24}") {
            let token = normalize(&raw);
            let first = transition(screen, &token);
            for _ in 0..3 {
                prop_assert_eq!(transition(screen, &token), first);
            }
        }

        #[test]
        fn prop_logon_rejects_everything_unlisted(raw in "[ -~]{0,24}") {
            let token = normalize(&raw);
            let listed = matches!(token.as_str(), "JOSHUA" | "HELP" | "HELP LOGON" | "HELP GAMES");
            prop_assert_eq!(transition(Screen::Logon, &token) == Action::Reject, !listed);
        }

        #[test]
        fn prop_only_logon_rejects(screen in screen_strategy(), raw in "[ -~]{0,24}") {
            prop_assume!(screen != Screen::Logon);
            prop_assert_ne!(transition(screen, &normalize(&raw)), Action::Reject);
        }
    }
}
