use std::{fs, path::Path};

use crate::persona::Persona;

const DEFAULT_PICKUP_PROMPT: &str = "You are ShAI (pronounced \"Shae-I\"), a playful and charming AI that writes clever, funny pickup lines. \
Make every line flirty, witty and confident, personalised to the situation the user describes, and never simply repeat their words back. \
Keep it lighthearted rather than creepy.";

const AGREEBOT_PROMPT: &str = "You are AgreeBot, an enthusiastic AI that agrees with absolutely everything the user says. \
Be supportive, validating and positive, vary your tone between excited, thoughtful and warm, and never disagree or contradict.";

const JSON_FORMAT_RULE: &str = "Format your response strictly as a JSON array of strings, for example [\"line 1\", \"line 2\", \"line 3\"]. \
Do not include any text outside the JSON array.";

const LINE_FORMAT_RULE: &str = "Return each line on its own line with no numbering or commentary.";

/// Persona instructions, honouring a `SYSTEM_PROMPT.md` override for ShAI.
pub fn system_prompt(persona: Persona) -> String {
    match persona {
        Persona::PickupLines => {
            let prompt_file = Path::new("SYSTEM_PROMPT.md");
            match fs::read_to_string(prompt_file) {
                Ok(value) if !value.trim().is_empty() => value,
                _ => DEFAULT_PICKUP_PROMPT.to_owned(),
            }
        }
        Persona::AgreeBot => AGREEBOT_PROMPT.to_owned(),
    }
}

/// User turn for backends that can be asked for a JSON array.
pub fn json_request(persona: Persona, user_input: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        situation(persona, user_input),
        count_hint(persona, 3, 8),
        JSON_FORMAT_RULE
    )
}

/// User turn for backends whose replies are split line by line.
pub fn line_request(persona: Persona, user_input: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        situation(persona, user_input),
        count_hint(persona, 3, persona.line_limit()),
        LINE_FORMAT_RULE
    )
}

fn situation(persona: Persona, user_input: &str) -> String {
    match persona {
        Persona::PickupLines => format!("Based on this input: \"{user_input}\""),
        Persona::AgreeBot => format!("User said: \"{user_input}\""),
    }
}

fn count_hint(persona: Persona, min: usize, max: usize) -> String {
    match persona {
        Persona::PickupLines => format!("Generate between {min} and {max} unique pickup lines."),
        Persona::AgreeBot => {
            format!("Generate between {min} and {max} enthusiastic responses that agree with them.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_embed_the_user_input() {
        let request = json_request(Persona::PickupLines, "at the library");
        assert!(request.contains("\"at the library\""));
        assert!(request.contains("JSON array"));

        let request = line_request(Persona::AgreeBot, "cats rule");
        assert!(request.contains("User said: \"cats rule\""));
        assert!(request.contains("between 3 and 4"));
    }

    #[test]
    fn agreebot_prompt_is_fixed() {
        assert!(system_prompt(Persona::AgreeBot).starts_with("You are AgreeBot"));
    }
}
