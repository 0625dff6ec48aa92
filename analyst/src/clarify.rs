use crate::types::{AnalysisInput, InputKind};

const MIN_EXCERPT_CHARS: usize = 80;
const MAX_QUESTIONS: usize = 3;

/// Derives follow-up questions for the user when the submitted excerpt is
/// too thin to score confidently. Deterministic on purpose: the questions
/// come from what is missing in the input, not from the model.
pub fn derive_clarifying_questions(input: &AnalysisInput<'_>) -> Vec<String> {
    let mut questions = Vec::new();

    if input.kind == InputKind::Image {
        // Screenshots carry no relationship context at all.
        questions.push(
            "How long have you two been talking, and how did you meet?".to_string(),
        );
        questions.push(
            "Is there anything said before this screenshot that changes the tone?".to_string(),
        );
        return questions;
    }

    let excerpt = input.content.trim();

    if excerpt.chars().count() < MIN_EXCERPT_CHARS {
        questions.push(
            "Can you paste a longer stretch of the conversation? A few more \
             exchanges makes the read much more reliable."
                .to_string(),
        );
    }

    let has_me = excerpt
        .lines()
        .any(|l| l.trim_start().to_lowercase().starts_with("me:"));
    let has_them = excerpt
        .lines()
        .any(|l| l.trim_start().to_lowercase().starts_with("them:"));

    if !has_me || !has_them {
        questions.push(
            "Which messages are yours? Prefix your own lines with \"Me:\" and \
             the other person's with \"Them:\"."
                .to_string(),
        );
    } else {
        let them_chars: usize = excerpt
            .lines()
            .filter(|l| l.trim_start().to_lowercase().starts_with("them:"))
            .map(|l| l.len())
            .sum();
        if them_chars < excerpt.len() / 10 {
            questions.push(
                "The other person barely appears here. Has it always been this \
                 one-sided, or did they used to write more?"
                    .to_string(),
            );
        }
    }

    let lowered = excerpt.to_lowercase();
    let has_context = ["met", "date", "dating", "relationship", "talking for", "together"]
        .iter()
        .any(|kw| lowered.contains(kw));
    if !has_context {
        questions.push(
            "How long have you two been talking, and what is the relationship \
             so far?"
                .to_string(),
        );
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_input(content: &str) -> AnalysisInput<'_> {
        AnalysisInput {
            kind: InputKind::Text,
            content,
        }
    }

    #[test]
    fn short_excerpt_asks_for_more() {
        let questions = derive_clarifying_questions(&text_input("Me: hey\nThem: hi"));
        assert!(questions.iter().any(|q| q.contains("longer stretch")));
    }

    #[test]
    fn unlabelled_excerpt_asks_for_speaker_markers() {
        let excerpt = "hey how was your weekend? it was fine I guess, pretty \
                       busy with work stuff. oh nice, did you end up going hiking?";
        let questions = derive_clarifying_questions(&text_input(excerpt));
        assert!(questions.iter().any(|q| q.contains("Me:")));
    }

    #[test]
    fn balanced_excerpt_with_context_needs_nothing() {
        let excerpt = "Me: so glad we met at Tayo's party, been thinking about it\n\
                       Them: same here honestly, that night was so much fun\n\
                       Me: we should do something this weekend, maybe that new cafe?\n\
                       Them: yes!! Saturday works for me, I'll check the menu tonight";
        let questions = derive_clarifying_questions(&text_input(excerpt));
        assert!(questions.is_empty(), "got: {:?}", questions);
    }

    #[test]
    fn one_sided_excerpt_is_flagged() {
        let excerpt = "Me: hey, how was your day? mine was crazy, we met with the investors and it ran three hours over\n\
                       Me: anyway I was thinking about that restaurant you mentioned when we were dating back then\n\
                       Me: also did you see the game last night? unbelievable finish\n\
                       Them: ya";
        let questions = derive_clarifying_questions(&text_input(excerpt));
        assert!(questions.iter().any(|q| q.contains("one-sided")));
    }

    #[test]
    fn image_input_gets_context_questions_only() {
        let input = AnalysisInput {
            kind: InputKind::Image,
            content: "aGVsbG8=",
        };
        let questions = derive_clarifying_questions(&input);
        assert_eq!(questions.len(), 2);
        assert!(questions[0].contains("How long"));
    }

    #[test]
    fn never_more_than_three_questions() {
        let questions = derive_clarifying_questions(&text_input("k"));
        assert!(questions.len() <= MAX_QUESTIONS);
    }
}
