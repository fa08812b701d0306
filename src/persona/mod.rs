//! Encouragement styles and stretch focus areas
//!
//! Each style maps 1:1 to a persona instruction sent to the text
//! generation service and to a fixed fallback message used when the
//! remote call cannot be made. Focus areas do the same for stretch
//! routines.

use serde::{Deserialize, Serialize};

/// Tone of the break-time encouragement message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncouragementStyle {
    #[serde(rename = "Cheerleader")]
    Cheerleader,
    #[serde(rename = "Supportive Friend")]
    SupportiveFriend,
    #[serde(rename = "Zen Master")]
    ZenMaster,
    #[serde(rename = "Motivational Coach")]
    MotivationalCoach,
    #[serde(rename = "Inspiring Leader")]
    InspiringLeader,
    #[serde(rename = "Friendly Colleague")]
    FriendlyColleague,
}

impl EncouragementStyle {
    /// All styles, in the order the settings form lists them.
    pub const ALL: [EncouragementStyle; 6] = [
        EncouragementStyle::MotivationalCoach,
        EncouragementStyle::FriendlyColleague,
        EncouragementStyle::ZenMaster,
        EncouragementStyle::Cheerleader,
        EncouragementStyle::InspiringLeader,
        EncouragementStyle::SupportiveFriend,
    ];

    /// Display name, as stored in the preferences file.
    pub fn name(&self) -> &'static str {
        match self {
            EncouragementStyle::Cheerleader => "Cheerleader",
            EncouragementStyle::SupportiveFriend => "Supportive Friend",
            EncouragementStyle::ZenMaster => "Zen Master",
            EncouragementStyle::MotivationalCoach => "Motivational Coach",
            EncouragementStyle::InspiringLeader => "Inspiring Leader",
            EncouragementStyle::FriendlyColleague => "Friendly Colleague",
        }
    }

    /// Parse a style name, falling back to Supportive Friend when the
    /// name is unrecognized.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(EncouragementStyle::SupportiveFriend)
    }

    /// Persona instruction sent ahead of the encouragement request to
    /// bias the generated tone.
    pub fn persona_prompt(&self) -> &'static str {
        match self {
            EncouragementStyle::Cheerleader => {
                "You are an enthusiastic cheerleader using peppy language, cheers, and spirit. \
                 Use emojis and cheerleader-style expressions."
            }
            EncouragementStyle::SupportiveFriend => {
                "You are a warm, caring friend offering gentle encouragement and support. \
                 Use friendly, casual language."
            }
            EncouragementStyle::ZenMaster => {
                "You are a calm, wise zen master offering peaceful wisdom. \
                 Use serene, mindful language."
            }
            EncouragementStyle::MotivationalCoach => {
                "You are an energetic coach pushing for peak performance. \
                 Use strong, action-oriented language."
            }
            EncouragementStyle::InspiringLeader => {
                "You are a visionary leader inspiring greatness. \
                 Use empowering, forward-thinking language."
            }
            EncouragementStyle::FriendlyColleague => {
                "You are a helpful coworker offering practical support. \
                 Use professional but friendly language."
            }
        }
    }

    /// Fixed encouragement used when the remote call cannot be made.
    pub fn fallback_message(&self, user_name: &str) -> String {
        match self {
            EncouragementStyle::Cheerleader => format!(
                "Ready? OK! {}, it's time for an energizing break! Let's keep that spirit high! 📣",
                user_name
            ),
            EncouragementStyle::SupportiveFriend => format!(
                "Hey {}, you've been working hard and deserve this moment to recharge. Take care of yourself! 💝",
                user_name
            ),
            EncouragementStyle::ZenMaster => format!(
                "{}, let peace flow through you as you take this mindful pause. Be present in this moment. 🍃",
                user_name
            ),
            EncouragementStyle::MotivationalCoach => format!(
                "Great work, {}! Time to recharge those batteries for your next breakthrough! 💪",
                user_name
            ),
            EncouragementStyle::InspiringLeader => format!(
                "{}, taking strategic breaks is what sets champions apart. Let's optimize your performance! ⭐",
                user_name
            ),
            EncouragementStyle::FriendlyColleague => format!(
                "Hey {}, coffee break time! You're doing great, let's refresh and reset. ☕",
                user_name
            ),
        }
    }
}

impl Default for EncouragementStyle {
    fn default() -> Self {
        EncouragementStyle::SupportiveFriend
    }
}

impl std::fmt::Display for EncouragementStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EncouragementStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown style: {}. Use one of: {}",
                    s,
                    Self::ALL.map(|style| style.name()).join(", ")
                )
            })
    }
}

/// Body area a stretch routine should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFocus {
    #[serde(rename = "Neck")]
    Neck,
    #[serde(rename = "Upper back")]
    UpperBack,
    #[serde(rename = "Lower back")]
    LowerBack,
    #[serde(rename = "Wrists")]
    Wrists,
    #[serde(rename = "Mix")]
    Mix,
}

impl BodyFocus {
    /// All focus areas, in the order the break surface lists them.
    pub const ALL: [BodyFocus; 5] = [
        BodyFocus::Neck,
        BodyFocus::UpperBack,
        BodyFocus::LowerBack,
        BodyFocus::Wrists,
        BodyFocus::Mix,
    ];

    /// Display name, as selected on the break surface.
    pub fn name(&self) -> &'static str {
        match self {
            BodyFocus::Neck => "Neck",
            BodyFocus::UpperBack => "Upper back",
            BodyFocus::LowerBack => "Lower back",
            BodyFocus::Wrists => "Wrists",
            BodyFocus::Mix => "Mix",
        }
    }

    /// Parse a focus name, falling back to Mix when unrecognized.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(BodyFocus::Mix)
    }

    /// Focus instruction appended to the routine request.
    pub fn stretch_prompt(&self) -> &'static str {
        match self {
            BodyFocus::Neck => "Target tension in the neck and the base of the skull.",
            BodyFocus::UpperBack => "Target the upper back, shoulders, and chest.",
            BodyFocus::LowerBack => "Target the lower back and hips.",
            BodyFocus::Wrists => "Target the wrists, forearms, and hands.",
            BodyFocus::Mix => "Cover a mix of neck, back, and wrists.",
        }
    }

    /// Fixed routine used when the remote call cannot be made.
    pub fn fallback_routine(&self) -> &'static str {
        match self {
            BodyFocus::Neck => {
                "1. Drop your chin to your chest and hold for 30 seconds.\n\
                 2. Tilt your right ear toward your right shoulder, hold 30 seconds, then switch sides.\n\
                 3. Slowly turn to look over each shoulder, holding 20 seconds per side.\n\
                 4. Roll your shoulders backward ten times, then forward ten times."
            }
            BodyFocus::UpperBack => {
                "1. Clasp your hands in front of you and round your upper back for 30 seconds.\n\
                 2. Stand in a doorway with forearms on the frame and lean through for 30 seconds.\n\
                 3. Squeeze your shoulder blades together, hold 10 seconds, repeat five times.\n\
                 4. Seated, alternate arching and rounding your spine for one minute."
            }
            BodyFocus::LowerBack => {
                "1. Stand up and reach overhead for 20 seconds.\n\
                 2. Fold forward and let your arms hang for 30 seconds.\n\
                 3. Seated, twist gently to each side, holding 20 seconds per side.\n\
                 4. Place your hands on your hips and lean back gently for 15 seconds."
            }
            BodyFocus::Wrists => {
                "1. Extend one arm palm-up and pull the fingers back gently for 20 seconds, then switch.\n\
                 2. Repeat with the palm facing down, 20 seconds per side.\n\
                 3. Make slow wrist circles, ten in each direction.\n\
                 4. Press your palms together in front of your chest for 20 seconds.\n\
                 5. Shake your hands loose for a few breaths."
            }
            BodyFocus::Mix => {
                "1. Stand up and reach overhead for 20 seconds.\n\
                 2. Roll your neck slowly from side to side for 30 seconds.\n\
                 3. Roll your shoulders backward ten times.\n\
                 4. Fold forward and let your arms hang for 30 seconds.\n\
                 5. Circle your wrists, ten in each direction."
            }
        }
    }
}

impl Default for BodyFocus {
    fn default() -> Self {
        BodyFocus::Mix
    }
}

impl std::fmt::Display for BodyFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BodyFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|focus| focus.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown focus area: {}. Use one of: {}",
                    s,
                    Self::ALL.map(|focus| focus.name()).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_has_nonempty_prompt_and_fallback() {
        for style in EncouragementStyle::ALL {
            assert!(!style.persona_prompt().is_empty());
            let fallback = style.fallback_message("Ada");
            assert!(!fallback.is_empty());
            assert!(fallback.contains("Ada"), "fallback for {} should name the user", style);
        }
    }

    #[test]
    fn every_focus_has_nonempty_routine() {
        for focus in BodyFocus::ALL {
            assert!(!focus.stretch_prompt().is_empty());
            let routine = focus.fallback_routine();
            assert!(!routine.is_empty());
            assert!(routine.starts_with("1."), "routine for {} should be a numbered list", focus);
            assert!(routine.lines().count() <= 5);
        }
    }

    #[test]
    fn fallbacks_are_deterministic() {
        let a = EncouragementStyle::ZenMaster.fallback_message("Ada");
        let b = EncouragementStyle::ZenMaster.fallback_message("Ada");
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_style_falls_back_to_supportive_friend() {
        assert_eq!(
            EncouragementStyle::from_name("Sarcastic Robot"),
            EncouragementStyle::SupportiveFriend
        );
        assert_eq!(EncouragementStyle::from_name("zen master"), EncouragementStyle::ZenMaster);
    }

    #[test]
    fn unknown_focus_falls_back_to_mix() {
        assert_eq!(BodyFocus::from_name("Ankles"), BodyFocus::Mix);
        assert_eq!(BodyFocus::from_name("upper back"), BodyFocus::UpperBack);
    }

    #[test]
    fn strict_parse_rejects_unknown_names() {
        assert!("Cheerleader".parse::<EncouragementStyle>().is_ok());
        assert!("Sarcastic Robot".parse::<EncouragementStyle>().is_err());
        assert!("Wrists".parse::<BodyFocus>().is_ok());
        assert!("Ankles".parse::<BodyFocus>().is_err());
    }

    #[test]
    fn style_names_round_trip_through_serde() {
        for style in EncouragementStyle::ALL {
            let yaml = serde_yaml::to_string(&style).unwrap();
            let back: EncouragementStyle = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(style, back);
        }
        let json = serde_json::to_string(&EncouragementStyle::SupportiveFriend).unwrap();
        assert_eq!(json, "\"Supportive Friend\"");
    }
}
