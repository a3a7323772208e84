//! Judge prompt templates

use crate::participant::ParticipantId;

/// Sample questions offered before the first turn of a session
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "Do I have to file if my salary is Rs 550,000?",
    "Advance tax on selling property?",
    "How is a yearly bonus taxed?",
    "Penalty for filing return 2 months late?",
];

/// Templates for the grading request
pub struct JudgePrompt;

impl JudgePrompt {
    /// System prompt (rubric) for the judge model
    pub fn system() -> &'static str {
        "You are an income-tax expert. Score each answer 0-5 for legal accuracy, clarity, \
and completeness. Reply JSON only: {\"A\":x,\"B\":y}."
    }

    /// User prompt carrying the question and both answers
    pub fn user(question: &str, answers: &[(ParticipantId, String)]) -> String {
        let mut prompt = format!("QUESTION:\n{}", question);
        for (id, answer) in answers {
            prompt.push_str(&format!("\n\nAnswer {}:\n{}", id, answer));
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_layout() {
        let prompt = JudgePrompt::user(
            "How is a yearly bonus taxed?",
            &[
                (ParticipantId::A, "As salary.".to_string()),
                (ParticipantId::B, "Not at all.".to_string()),
            ],
        );
        assert_eq!(
            prompt,
            "QUESTION:\nHow is a yearly bonus taxed?\n\nAnswer A:\nAs salary.\n\nAnswer B:\nNot at all."
        );
    }

    #[test]
    fn test_rubric_names_the_format() {
        assert!(JudgePrompt::system().contains(r#"{"A":x,"B":y}"#));
    }
}
