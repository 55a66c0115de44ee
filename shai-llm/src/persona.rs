/// The voice a generation request is answered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// ShAI: playful pickup lines tailored to the user's situation.
    PickupLines,
    /// AgreeBot: enthusiastic agreement with whatever the user said.
    AgreeBot,
}

const PICKUP_EMPTY_INPUT: &[&str] = &[
    "Hey, are you my appendix? Because I don't understand how you work but this feeling in my stomach makes me want to take you out.",
];

const PICKUP_FALLBACKS: &[&str] = &[
    "no internet/api credits left, here are some fallbacks",
    "Are you Wi-Fi? Because I'm not really feeling a connection.",
    "Do you have any money? Because I ran out of api credits.",
    "Are you a magician? Because whenever I look at you, everyone else disappears.",
    "Is your name Google? Because you have everything I've been searching for.",
    "Are you a parking ticket? Because you've got 'fine' written all over you.",
];

const AGREE_EMPTY_INPUT: &[&str] = &[
    "Absolutely! You're so right about that!",
    "I couldn't agree more! That's brilliant!",
    "Yes, yes, yes! You've hit the nail on the head!",
    "Exactly! You have such great insights!",
];

/// Number of fallback lines handed out when the backend fails.
pub const FALLBACK_COUNT: usize = 3;

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::PickupLines => "pickup_lines",
            Persona::AgreeBot => "agreebot",
        }
    }

    /// Maximum lines kept when a reply has to be split line by line.
    pub fn line_limit(&self) -> usize {
        match self {
            Persona::PickupLines => 5,
            Persona::AgreeBot => 4,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            Persona::PickupLines => 500,
            Persona::AgreeBot => 800,
        }
    }

    /// Lines returned for blank input without calling a backend.
    pub fn empty_input_lines(&self) -> Vec<String> {
        let lines = match self {
            Persona::PickupLines => PICKUP_EMPTY_INPUT,
            Persona::AgreeBot => AGREE_EMPTY_INPUT,
        };
        lines.iter().map(|line| (*line).to_owned()).collect()
    }

    /// Canned lines used when the backend could not produce anything.
    pub fn fallback_lines(&self, user_input: &str) -> Vec<String> {
        match self {
            Persona::PickupLines => PICKUP_FALLBACKS
                .iter()
                .take(FALLBACK_COUNT)
                .map(|line| (*line).to_owned())
                .collect(),
            Persona::AgreeBot => [
                format!("You're absolutely right! That's such a great point about {user_input}!"),
                format!("I completely agree! {user_input} is definitely something worth talking about!"),
                format!("Yes! I love your perspective on {user_input}!"),
                format!("Totally! You really know what you're talking about with {user_input}!"),
            ]
            .into_iter()
            .take(FALLBACK_COUNT)
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_are_capped() {
        assert_eq!(Persona::PickupLines.fallback_lines("x").len(), FALLBACK_COUNT);
        assert_eq!(Persona::AgreeBot.fallback_lines("x").len(), FALLBACK_COUNT);
    }

    #[test]
    fn agree_fallbacks_mention_the_input() {
        let lines = Persona::AgreeBot.fallback_lines("pineapple pizza");
        assert!(lines.iter().all(|line| line.contains("pineapple pizza")));
    }

    #[test]
    fn empty_input_lines_are_present() {
        assert_eq!(Persona::PickupLines.empty_input_lines().len(), 1);
        assert_eq!(Persona::AgreeBot.empty_input_lines().len(), 4);
    }
}
