use crate::persona::Persona;

/// System prompt: persona voice plus the response contract.
pub fn system_prompt(persona: Persona) -> String {
    format!(
        "You analyze text-message conversations between two people and judge \
         how the exchange is going from the submitter's side. {}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\n\
           \"cringe_score\": <0-100, how awkward the submitter comes across>,\n\
           \"interest_level\": <0-100, how interested the other person seems>,\n\
           \"flags\": [{{\"kind\": \"red\"|\"green\", \"label\": \"<short phrase>\"}}],\n\
           \"suggested_replies\": [\"<reply the submitter could send next>\"],\n\
           \"summary\": \"<2-3 sentences in your voice>\"\n\
         }}",
        persona.voice()
    )
}

/// User prompt for a text excerpt.
pub fn text_prompt(excerpt: &str) -> String {
    format!(
        "Here is the conversation excerpt. Lines prefixed \"Me:\" are the \
         submitter, lines prefixed \"Them:\" are the other person.\n\n{}",
        excerpt
    )
}

/// User prompt accompanying a screenshot.
pub fn image_prompt() -> &'static str {
    "This screenshot shows a message thread. The submitter's messages are the \
     ones aligned right (outgoing). Read the thread, then analyze it."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_persona_voice_and_contract() {
        let prompt = system_prompt(Persona::Savage);
        assert!(prompt.contains("ruthless"));
        assert!(prompt.contains("cringe_score"));
        assert!(prompt.contains("suggested_replies"));
    }

    #[test]
    fn text_prompt_embeds_excerpt() {
        let prompt = text_prompt("Me: hey\nThem: hi!");
        assert!(prompt.contains("Me: hey"));
    }
}
