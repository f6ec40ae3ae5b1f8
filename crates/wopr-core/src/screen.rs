//! Points in the scripted conversation.

use std::fmt;

/// A named point in the scripted conversation.
///
/// The set is fixed and ordered. Transitions reference screens by identity
/// only; no two screens are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Screen {
    /// Password prompt. Every session starts (and restarts) here.
    Logon,
    /// Explanation of what "games" are, waiting for `LIST GAMES`.
    Games,
    /// First words after a successful logon.
    Greeting,
    /// "How are you feeling today?"
    Wellbeing,
    /// Asks about the removed user account.
    Explanation,
    /// "Shall we play a game?"
    PlayGame,
    /// Offers chess instead.
    PlayGameVerify,
    /// Side-selection menu under the two maps.
    GlobalWar,
    /// Awaiting first strike command, prompting for targets.
    FirstStrike,
    /// Placeholder for the unimplemented continuation of the strike.
    SecondStrike,
}

impl Screen {
    /// Every screen, in script order.
    pub const ALL: [Self; 10] = [
        Self::Logon,
        Self::Games,
        Self::Greeting,
        Self::Wellbeing,
        Self::Explanation,
        Self::PlayGame,
        Self::PlayGameVerify,
        Self::GlobalWar,
        Self::FirstStrike,
        Self::SecondStrike,
    ];

    /// Position of this screen in [`Screen::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether reaching this screen implies the shared token was accepted.
    ///
    /// Only `Logon` and `Games` are reachable without it.
    pub fn requires_authentication(self) -> bool {
        !matches!(self, Self::Logon | Self::Games)
    }

    /// Upper-case identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Logon => "LOGON",
            Self::Games => "GAMES",
            Self::Greeting => "GREETING",
            Self::Wellbeing => "WELLBEING",
            Self::Explanation => "EXPLANATION",
            Self::PlayGame => "PLAY_GAME",
            Self::PlayGameVerify => "PLAY_GAME_VERIFY",
            Self::GlobalWar => "GLOBAL_WAR",
            Self::FirstStrike => "STRIKE_1",
            Self::SecondStrike => "STRIKE_2",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
