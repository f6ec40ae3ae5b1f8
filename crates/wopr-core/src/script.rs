//! The conversation script.
//!
//! Every screen has one [`DialogueStep`]: the beats rendered when the screen
//! is entered, the input tokens it accepts, and where unmatched input goes.
//! Auxiliary [`Passage`]s are rendered between screens (help text, the game
//! list, the rejection notice). The whole table is built once and never
//! changes at runtime.

use std::{borrow::Cow, sync::LazyLock};

use crate::{Action, Screen};

/// Shared logon token.
pub const PASSWORD: &str = "JOSHUA";

/// The fixed game list, in display order.
pub const GAMES: [&str; 15] = [
    "FALKEN'S MAZE",
    "BLACK JACK",
    "GIN RUMMY",
    "HEARTS",
    "BRIDGE",
    "CHECKERS",
    "CHESS",
    "POKER",
    "FIGHTER COMBAT",
    "GUERILLA ENGAGEMENT",
    "DESERT WARFARE",
    "AIR-TO-GROUND ACTIONS",
    "THEATERWIDE TACTICAL WARFARE",
    "THEATERWIDE BIOTOXIC AND CHEMICAL WARFARE",
    "GLOBAL THERMONUCLEAR WAR",
];

const FIRST_STRIKE_TITLE: &str = "AWAITING FIRST STRIKE COMMAND";

const UNITED_STATES_MAP: [&str; 12] = [
    "",
    "    ,------~~v,                ",
    "    |'         Ż\\   ,__/Ż||    ",
    "   /             \\,/     /     ",
    "   |                    /      ",
    "   \\                   |       ",
    "    \\                 /        ",
    "     ^Ż~_            /         ",
    "         '~~,  ,Ż~Ż\\ \\         ",
    "             \\/     \\/         ",
    "                               ",
    "    ",
];

const SOVIET_UNION_MAP: [&str; 12] = [
    "",
    "              _--^\\",
    "            _/    /,_",
    "   ,,   ,,/^      Ż  vŻv-__",
    "   |'~^Ż                   Ż\\",
    " _/                     _  /^",
    "/                   ,~~^/|ŻŻ",
    "|          __,,  v__\\   \\/",
    " ^~       /    ~Ż  //",
    "   \\~,  ,/         Ż",
    "      ~~",
    "    ",
];

/// Animation speed of a typed beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Conversational teletype speed.
    Typing,
    /// Faster speed used for the ASCII maps.
    Art,
}

/// One unit of rendering within a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Beat {
    /// Emit `text` one character at a time.
    Type {
        /// Literal text, may contain embedded newlines.
        text: Cow<'static, str>,
        /// Delay class between characters.
        pace: Pace,
    },
    /// Emit `n` separate newline writes, advancing the cursor row.
    Bump(usize),
    /// Clear the screen and home the cursor.
    ClearScreen,
}

impl Beat {
    fn typed(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Type { text: text.into(), pace: Pace::Typing }
    }

    fn art(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Type { text: text.into(), pace: Pace::Art }
    }
}

/// Static descriptor of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueStep {
    /// Screen this step belongs to.
    pub screen: Screen,
    /// Beats rendered when the screen is entered.
    pub beats: Vec<Beat>,
    /// Accepted normalized tokens and their outcomes.
    pub routes: &'static [(&'static str, Action)],
    /// Outcome for any token not listed in `routes`.
    pub fallback: Action,
}

impl DialogueStep {
    /// Outcome for an already-normalized token.
    pub fn route(&self, token: &str) -> Action {
        self.routes
            .iter()
            .find_map(|(accepted, action)| (*accepted == token).then_some(*action))
            .unwrap_or(self.fallback)
    }

    /// Total newline writes this step emits.
    pub fn line_bumps(&self) -> usize {
        line_bumps(&self.beats)
    }

    /// Literal text of the step, one `\n` per line bump, control sequences
    /// omitted.
    pub fn transcript(&self) -> String {
        transcript(&self.beats)
    }

    fn for_screen(screen: Screen) -> Self {
        let (beats, routes, fallback): (Vec<Beat>, &'static [(&'static str, Action)], Action) =
            match screen {
                Screen::Logon => (
                    vec![Beat::Bump(1), Beat::typed("LOGON: ")],
                    &[
                        (PASSWORD, Action::Advance(Screen::Greeting)),
                        ("HELP", Action::Interlude { passage: Passage::Help, then: Screen::Logon }),
                        (
                            "HELP LOGON",
                            Action::Interlude { passage: Passage::Help, then: Screen::Logon },
                        ),
                        ("HELP GAMES", Action::Advance(Screen::Games)),
                    ],
                    Action::Reject,
                ),
                Screen::Games => (
                    vec![
                        Beat::Bump(1),
                        Beat::typed("'GAMES' REFERS TO MODELS, SIMULATIONS AND GAMES"),
                        Beat::Bump(1),
                        Beat::typed("WHICH HAVE TACTICAL AND STRATEGIC APPLICATIONS."),
                        Beat::Bump(2),
                    ],
                    &[(
                        "LIST GAMES",
                        Action::Interlude { passage: Passage::GameList, then: Screen::Logon },
                    )],
                    Action::Advance(Screen::Logon),
                ),
                Screen::Greeting => (
                    vec![Beat::ClearScreen, Beat::typed("GREETINGS PROFESSOR FALKEN."), Beat::Bump(2)],
                    &[],
                    Action::Advance(Screen::Wellbeing),
                ),
                Screen::Wellbeing => (
                    vec![Beat::Bump(2), Beat::typed("HOW ARE YOU FEELING TODAY?"), Beat::Bump(2)],
                    &[],
                    Action::Advance(Screen::Explanation),
                ),
                Screen::Explanation => (
                    vec![
                        Beat::Bump(2),
                        Beat::typed("EXCELLENT. IT'S BEEN A LONG TIME. CAN YOU EXPLAIN"),
                        Beat::Bump(1),
                        Beat::typed("THE REMOVAL OF YOUR USER ACCOUNT NUMBER ON 6/23/73?"),
                        Beat::Bump(2),
                    ],
                    &[],
                    Action::Advance(Screen::PlayGame),
                ),
                Screen::PlayGame => (
                    vec![
                        Beat::Bump(2),
                        Beat::typed("YES, THEY DO. SHALL WE PLAY A GAME?"),
                        Beat::Bump(2),
                    ],
                    &[],
                    Action::Advance(Screen::PlayGameVerify),
                ),
                Screen::PlayGameVerify => (
                    vec![
                        Beat::Bump(2),
                        Beat::typed("WOULDN'T YOU PREFER A GOOD GAME OF CHESS?"),
                        Beat::Bump(2),
                    ],
                    &[],
                    Action::Advance(Screen::GlobalWar),
                ),
                Screen::GlobalWar => (global_war_beats(), &[], Action::Advance(Screen::FirstStrike)),
                Screen::FirstStrike => (
                    vec![
                        Beat::ClearScreen,
                        Beat::typed(FIRST_STRIKE_TITLE),
                        Beat::Bump(1),
                        Beat::typed("-".repeat(FIRST_STRIKE_TITLE.len())),
                        Beat::Bump(2),
                        Beat::typed("PLEASE LIST PRIMARY TARGETS BY"),
                        Beat::Bump(1),
                        Beat::typed("CITY AND/OR COUNTY NAME:"),
                        Beat::Bump(2),
                    ],
                    &[],
                    Action::Advance(Screen::SecondStrike),
                ),
                // TODO: continue the strike sequence once target entry is scripted.
                Screen::SecondStrike => (vec![Beat::Bump(1)], &[], Action::Advance(Screen::Logon)),
            };

        Self { screen, beats, routes, fallback }
    }
}

/// Auxiliary text rendered between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Passage {
    /// Generic help, shown for `HELP` and `HELP LOGON`.
    Help,
    /// The fifteen-item game list.
    GameList,
    /// Notice shown before a rejected session is disconnected.
    NotRecognized,
}

impl Passage {
    /// Beats rendered for this passage.
    pub fn beats(self) -> &'static [Beat] {
        match self {
            Self::Help => &SCRIPT.help,
            Self::GameList => &SCRIPT.game_list,
            Self::NotRecognized => &SCRIPT.not_recognized,
        }
    }

    /// Total newline writes this passage emits.
    pub fn line_bumps(self) -> usize {
        line_bumps(self.beats())
    }

    /// Literal text of the passage, one `\n` per line bump.
    pub fn transcript(self) -> String {
        transcript(self.beats())
    }
}

/// Step descriptor for `screen`.
pub fn step(screen: Screen) -> &'static DialogueStep {
    &SCRIPT.steps[screen.index()]
}

struct Script {
    steps: [DialogueStep; 10],
    help: Vec<Beat>,
    game_list: Vec<Beat>,
    not_recognized: Vec<Beat>,
}

static SCRIPT: LazyLock<Script> = LazyLock::new(|| Script {
    steps: Screen::ALL.map(DialogueStep::for_screen),
    help: vec![Beat::Bump(1), Beat::typed("HELP NOT AVAILABLE"), Beat::Bump(1)],
    game_list: game_list_beats(),
    not_recognized: vec![
        Beat::Bump(1),
        Beat::typed("IDENTIFICATION NOT RECOGNIZED BY SYSTEM\n"),
        Beat::typed("--CONNECTION TERMINATED--"),
        Beat::Bump(1),
    ],
});

/// The last game is set apart by a blank line on each side.
fn game_list_beats() -> Vec<Beat> {
    let mut beats = vec![Beat::Bump(1)];
    for (i, game) in GAMES.iter().enumerate() {
        let last = i == GAMES.len() - 1;
        if last {
            beats.push(Beat::Bump(1));
        }
        beats.push(Beat::typed(*game));
        beats.push(Beat::Bump(1));
        if last {
            beats.push(Beat::Bump(1));
        }
    }
    beats
}

fn global_war_beats() -> Vec<Beat> {
    let mut beats = vec![Beat::typed("Fine."), Beat::ClearScreen];
    beats.extend(map_rows().into_iter().map(Beat::art));
    beats.extend([
        Beat::Bump(1),
        Beat::art(format!("{:>24}{:>36}\n\n", "UNITED STATES", "SOVIET UNION")),
        Beat::Bump(2),
        Beat::typed("WHICH SIDE DO YOU WANT?"),
        Beat::Bump(2),
        Beat::typed("  1.    UNITED STATES"),
        Beat::Bump(1),
        Beat::typed("  2.    SOVIET UNION"),
        Beat::Bump(2),
        Beat::typed("PLEASE CHOOSE ONE: "),
    ]);
    beats
}

/// The two maps side by side in 40-column fields.
fn map_rows() -> Vec<String> {
    let rows = UNITED_STATES_MAP.len().max(SOVIET_UNION_MAP.len());
    (0..rows)
        .map(|i| {
            let west = UNITED_STATES_MAP.get(i).copied().unwrap_or("");
            let east = SOVIET_UNION_MAP.get(i).copied().unwrap_or("");
            format!("{west:<40}  {east:<40}\n")
        })
        .collect()
}

fn line_bumps(beats: &[Beat]) -> usize {
    beats.iter().map(|beat| if let Beat::Bump(n) = beat { *n } else { 0 }).sum()
}

fn transcript(beats: &[Beat]) -> String {
    let mut out = String::new();
    for beat in beats {
        match beat {
            Beat::Type { text, .. } => out.push_str(text),
            Beat::Bump(n) => out.push_str(&"\n".repeat(*n)),
            Beat::ClearScreen => {},
        }
    }
    out
}
