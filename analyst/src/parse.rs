use common::error::{AppError, Res};
use serde::Deserialize;

use crate::types::{Flag, PersonaVerdict};

#[derive(Deserialize)]
struct RawVerdict {
    cringe_score: Option<i64>,
    interest_level: Option<i64>,
    #[serde(default)]
    flags: Vec<Flag>,
    #[serde(default)]
    suggested_replies: Vec<String>,
    summary: Option<String>,
}

/// Parses the model's reply into a verdict. Models occasionally wrap the
/// JSON in prose or code fences, so the object is located first.
pub fn parse_verdict(reply: &str) -> Res<PersonaVerdict> {
    let json = extract_json_object(reply).ok_or_else(|| {
        AppError::Internal(format!(
            "AI reply carried no JSON object: {}",
            reply.chars().take(200).collect::<String>()
        ))
    })?;

    let raw: RawVerdict = serde_json::from_str(json)
        .map_err(|e| AppError::Internal(format!("Failed to parse AI verdict: {}", e)))?;

    Ok(PersonaVerdict {
        cringe_score: clamp_score(raw.cringe_score),
        interest_level: clamp_score(raw.interest_level),
        flags: raw.flags,
        suggested_replies: raw.suggested_replies,
        summary: raw.summary.unwrap_or_default(),
    })
}

fn clamp_score(raw: Option<i64>) -> u8 {
    raw.unwrap_or(50).clamp(0, 100) as u8
}

/// Returns the first balanced top-level JSON object in `text`, skipping
/// braces inside string literals.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlagKind;

    #[test]
    fn parses_a_clean_verdict() {
        let verdict = parse_verdict(
            r#"{
                "cringe_score": 72,
                "interest_level": 31,
                "flags": [{"kind": "red", "label": "one-word replies"}],
                "suggested_replies": ["Give them space for a day or two."],
                "summary": "They are drifting."
            }"#,
        )
        .unwrap();

        assert_eq!(verdict.cringe_score, 72);
        assert_eq!(verdict.interest_level, 31);
        assert_eq!(verdict.flags.len(), 1);
        assert_eq!(verdict.flags[0].kind, FlagKind::Red);
        assert_eq!(verdict.suggested_replies.len(), 1);
    }

    #[test]
    fn tolerates_code_fences_and_prose() {
        let verdict = parse_verdict(
            "Sure! Here's my read:\n```json\n{\"cringe_score\": 10, \"interest_level\": 90, \"summary\": \"Going great.\"}\n```",
        )
        .unwrap();
        assert_eq!(verdict.cringe_score, 10);
        assert_eq!(verdict.interest_level, 90);
        assert!(verdict.flags.is_empty());
    }

    #[test]
    fn clamps_out_of_range_scores() {
        let verdict = parse_verdict(
            r#"{"cringe_score": 250, "interest_level": -5, "summary": "x"}"#,
        )
        .unwrap();
        assert_eq!(verdict.cringe_score, 100);
        assert_eq!(verdict.interest_level, 0);
    }

    #[test]
    fn defaults_missing_scores_to_midpoint() {
        let verdict = parse_verdict(r#"{"summary": "hmm"}"#).unwrap();
        assert_eq!(verdict.cringe_score, 50);
        assert_eq!(verdict.interest_level, 50);
    }

    #[test]
    fn rejects_reply_without_json() {
        assert!(parse_verdict("I can't analyze this.").is_err());
    }

    #[test]
    fn skips_braces_inside_strings() {
        let verdict =
            parse_verdict(r#"{"cringe_score": 5, "interest_level": 5, "summary": "use {caution}"}"#)
                .unwrap();
        assert_eq!(verdict.summary, "use {caution}");
    }
}
