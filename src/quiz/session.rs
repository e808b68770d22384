//! Navigation state machine of a single quiz session.
//!
//! `Welcome -> Questions -> Contact -> Result`, with `back` stepping through
//! the same chain in reverse (the first question has no back target).

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::quiz::contact::{ContactData, ContactDraft};
use crate::quiz::scoring::Report;
use crate::quiz::{question, AnswerMap, Question, QUESTIONS, QUESTION_COUNT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Welcome,
    Questions,
    Contact,
    Result,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    screen: Screen,
    current_question: usize,
    answers: AnswerMap,
    contact: Option<ContactData>,
}

impl Session {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn current_index(&self) -> usize {
        self.current_question
    }

    pub fn current_question(&self) -> &'static Question {
        &QUESTIONS[self.current_question]
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answer_for(&self, question_id: u32) -> Option<u8> {
        self.answers.get(&question_id).copied()
    }

    pub fn contact(&self) -> Option<&ContactData> {
        self.contact.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.screen == Screen::Questions && self.current_question > 0
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question == QUESTION_COUNT - 1
    }

    pub fn report(&self) -> Report {
        Report::new(&self.answers)
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect_screen(Screen::Welcome, "start")?;
        self.screen = Screen::Questions;
        self.current_question = 0;
        self.answers.clear();
        Ok(())
    }

    pub fn answer(&mut self, question_id: u32, value: u8) -> Result<(), SessionError> {
        self.expect_screen(Screen::Questions, "answer")?;
        if question(question_id).and_then(|q| q.option(value)).is_none() {
            return Err(SessionError::UnknownOption { question_id, value });
        }
        self.answers.insert(question_id, value);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), SessionError> {
        self.expect_screen(Screen::Questions, "next")?;
        let question_id = self.current_question().id;
        if !self.answers.contains_key(&question_id) {
            return Err(SessionError::Unanswered { question_id });
        }

        if self.is_last_question() {
            self.screen = Screen::Contact;
        } else {
            self.current_question += 1;
        }
        Ok(())
    }

    /// No-op on the welcome screen and on the first question.
    pub fn back(&mut self) {
        match self.screen {
            Screen::Welcome => {}
            Screen::Questions => {
                self.current_question = self.current_question.saturating_sub(1);
            }
            Screen::Contact => {
                self.screen = Screen::Questions;
                self.current_question = QUESTION_COUNT - 1;
            }
            Screen::Result => self.screen = Screen::Contact,
        }
    }

    pub fn submit_contact(&mut self, draft: &ContactDraft) -> Result<(), SessionError> {
        self.expect_screen(Screen::Contact, "submit_contact")?;
        let contact = draft.complete().map_err(SessionError::Validation)?;
        self.contact = Some(contact);
        self.screen = Screen::Result;
        Ok(())
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }

    fn expect_screen(&self, screen: Screen, operation: &'static str) -> Result<(), SessionError> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(SessionError::WrongScreen {
                operation,
                screen: self.screen,
            })
        }
    }
}
