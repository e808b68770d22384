pub mod catalog;
pub mod contact;
pub mod scoring;
pub mod session;

use std::collections::BTreeMap;

pub use catalog::{question, QUESTIONS};

pub const QUESTION_COUNT: usize = 5;
pub const OPTIONS_PER_QUESTION: usize = 3;
/// Every question is worth at most 2 points.
pub const MAX_SCORE: u32 = QUESTION_COUNT as u32 * 2;

/// Question id -> selected option value.
pub type AnswerMap = BTreeMap<u32, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub options: [AnswerOption; OPTIONS_PER_QUESTION],
}

impl Question {
    pub const fn new(
        id: u32,
        text: &'static str,
        options: [AnswerOption; OPTIONS_PER_QUESTION],
    ) -> Self {
        Self { id, text, options }
    }

    pub fn option(&self, value: u8) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn option_by_label(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

impl AnswerOption {
    pub const fn new(value: u8, label: &'static str) -> Self {
        Self { value, label }
    }
}
