use anyhow::{anyhow, bail, Context, Result};
use fr_bout::{BoutController, Card, Clock, EventLog, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One referee input.
///
/// Textual form (case-insensitive, whitespace separated):
///
/// ```text
/// start | halt | toggle
/// touch left|right|double
/// reverse left|right
/// card left|right none|yellow|red|black
/// tick [n]
/// period next
/// reset
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RefereeAction {
    Start,
    Halt,
    Toggle,
    Touch { side: Side },
    TouchDouble,
    Reverse { side: Side },
    Card { side: Side, card: Card },
    /// Advance the clock by `n` intervals (no-op while stopped).
    Tick { n: u32 },
    NextPeriod,
    Reset,
}

impl RefereeAction {
    /// Apply to `bout`. Returns the retired log when a reset clears it.
    pub fn apply<C: Clock>(self, bout: &mut BoutController<C>) -> Option<EventLog> {
        match self {
            RefereeAction::Start => bout.start(),
            RefereeAction::Halt => bout.halt(),
            RefereeAction::Toggle => bout.toggle_timer(),
            RefereeAction::Touch { side } => bout.touch(side),
            RefereeAction::TouchDouble => bout.touch_double(),
            RefereeAction::Reverse { side } => bout.reverse_touch(side),
            RefereeAction::Card { side, card } => {
                bout.card(side, card);
            }
            RefereeAction::Tick { n } => {
                for _ in 0..n {
                    if bout.advance_clock().is_none() {
                        break;
                    }
                }
            }
            RefereeAction::NextPeriod => {
                bout.next_period();
            }
            RefereeAction::Reset => return bout.reset_to_default(),
        }
        None
    }
}

fn parse_side(s: &str) -> Result<Side> {
    match s {
        "left" | "l" => Ok(Side::Left),
        "right" | "r" => Ok(Side::Right),
        other => Err(anyhow!("expected left|right (got '{other}')")),
    }
}

fn parse_card(s: &str) -> Result<Card> {
    match s {
        "none" => Ok(Card::None),
        "yellow" => Ok(Card::Yellow),
        "red" => Ok(Card::Red),
        "black" => Ok(Card::Black),
        other => Err(anyhow!("expected none|yellow|red|black (got '{other}')")),
    }
}

impl FromStr for RefereeAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();

        let action = match words.as_slice() {
            ["start"] => RefereeAction::Start,
            ["halt"] | ["stop"] => RefereeAction::Halt,
            ["toggle"] => RefereeAction::Toggle,
            ["touch", "double"] => RefereeAction::TouchDouble,
            ["touch", side] => RefereeAction::Touch {
                side: parse_side(side)?,
            },
            ["reverse", side] => RefereeAction::Reverse {
                side: parse_side(side)?,
            },
            ["card", side, card] => RefereeAction::Card {
                side: parse_side(side)?,
                card: parse_card(card)?,
            },
            ["tick"] => RefereeAction::Tick { n: 1 },
            ["tick", n] => RefereeAction::Tick {
                n: n.parse().with_context(|| format!("tick count '{n}'"))?,
            },
            ["period", "next"] => RefereeAction::NextPeriod,
            ["reset"] => RefereeAction::Reset,
            [] => bail!("empty action"),
            _ => bail!("unknown action '{}'", s.trim()),
        };
        Ok(action)
    }
}

impl fmt::Display for RefereeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefereeAction::Start => write!(f, "start"),
            RefereeAction::Halt => write!(f, "halt"),
            RefereeAction::Toggle => write!(f, "toggle"),
            RefereeAction::Touch { side } => write!(f, "touch {}", side.as_str().to_lowercase()),
            RefereeAction::TouchDouble => write!(f, "touch double"),
            RefereeAction::Reverse { side } => {
                write!(f, "reverse {}", side.as_str().to_lowercase())
            }
            RefereeAction::Card { side, card } => write!(
                f,
                "card {} {}",
                side.as_str().to_lowercase(),
                card.as_str().to_lowercase()
            ),
            RefereeAction::Tick { n } => write!(f, "tick {n}"),
            RefereeAction::NextPeriod => write!(f, "period next"),
            RefereeAction::Reset => write!(f, "reset"),
        }
    }
}
