use serde::{Deserialize, Serialize};

/// The voice the analysis is framed in. Stored as a string on the
/// conversation, selected per analysis submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    StraightShooter,
    HypeFriend,
    Therapist,
    Savage,
}

impl Persona {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "straight_shooter" => Some(Persona::StraightShooter),
            "hype_friend" => Some(Persona::HypeFriend),
            "therapist" => Some(Persona::Therapist),
            "savage" => Some(Persona::Savage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::StraightShooter => "straight_shooter",
            Persona::HypeFriend => "hype_friend",
            Persona::Therapist => "therapist",
            Persona::Savage => "savage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::StraightShooter => "The Straight Shooter",
            Persona::HypeFriend => "The Hype Friend",
            Persona::Therapist => "The Therapist",
            Persona::Savage => "The Savage",
        }
    }

    /// Tone instructions injected into the system prompt.
    pub fn voice(&self) -> &'static str {
        match self {
            Persona::StraightShooter => {
                "You are blunt and practical. No sugar-coating, no pep talk. \
                 Say what the messages actually show and what to do about it."
            }
            Persona::HypeFriend => {
                "You are the user's most supportive friend. Stay honest about \
                 red flags, but lead with what is going well and keep the \
                 energy up."
            }
            Persona::Therapist => {
                "You are calm, warm and non-judgemental. Focus on patterns, \
                 attachment cues and how the user might be feeling. Avoid slang."
            }
            Persona::Savage => {
                "You are ruthless and funny. Roast cringe behaviour on both \
                 sides without mercy, but keep the underlying advice sound."
            }
        }
    }

    pub fn all() -> [Persona; 4] {
        [
            Persona::StraightShooter,
            Persona::HypeFriend,
            Persona::Therapist,
            Persona::Savage,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_personas() {
        assert_eq!(Persona::parse("savage"), Some(Persona::Savage));
        assert_eq!(Persona::parse(" Therapist "), Some(Persona::Therapist));
        assert_eq!(
            Persona::parse("STRAIGHT_SHOOTER"),
            Some(Persona::StraightShooter)
        );
        assert_eq!(Persona::parse("life_coach"), None);
        assert_eq!(Persona::parse(""), None);
    }

    #[test]
    fn round_trips_through_as_str() {
        for persona in Persona::all() {
            assert_eq!(Persona::parse(persona.as_str()), Some(persona));
        }
    }
}
