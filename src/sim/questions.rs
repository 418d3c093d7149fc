//! Physics question bank
//!
//! Questions attach to `Question` and `AnswerOption` obstacles. The shape is
//! serde-derived so a bank can also be loaded from JSON; the built-in set
//! ships with the crate.

use serde::{Deserialize, Serialize};

/// A multiple-choice question: prompt, ordered options, correct index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl Question {
    pub fn new(prompt: &str, options: [&str; 3], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
        }
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct
    }
}

/// The built-in bank (3 options each)
pub fn builtin_bank() -> Vec<Question> {
    vec![
        Question::new(
            "What is the acceleration due to gravity on Earth?",
            ["9.8 m/s²", "10 m/s²", "8.9 m/s²"],
            0,
        ),
        Question::new(
            "Which equation represents Newton's Second Law?",
            ["F = ma", "E = mc²", "v = u + at"],
            0,
        ),
        Question::new("What is the unit of force?", ["Joule", "Newton", "Watt"], 1),
        Question::new(
            "In projectile motion, which component of velocity remains constant?",
            ["Vertical", "Horizontal", "Both"],
            1,
        ),
        Question::new(
            "What is the formula for kinetic energy?",
            ["KE = ½mv²", "KE = mgh", "KE = mv"],
            0,
        ),
        Question::new("What is the SI unit of power?", ["Joule", "Watt", "Newton"], 1),
        Question::new(
            "Which law states that energy cannot be created or destroyed?",
            ["Newton's First Law", "Conservation of Energy", "Ohm's Law"],
            1,
        ),
        Question::new(
            "What is the speed of light in vacuum?",
            ["3 × 10⁸ m/s", "3 × 10⁶ m/s", "3 × 10¹⁰ m/s"],
            0,
        ),
    ]
}
