//! Root controller: owns a chat's quiz session and contact form, applies user
//! intents and reports what has to happen at the chat boundary.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{LeadError, SessionError};
use crate::lead::{LeadRecord, LeadSink};
use crate::quiz::contact::{ContactForm, EmployeeCount, Field};
use crate::quiz::session::{Screen, Session};

pub const EXPERT_PHONE: &str = "+5511999999999";
pub const EXPERT_PHONE_DISPLAY: &str = "(11) 9999-9999";
pub const EXPERT_EMAIL: &str = "contato@tecmed.com.br";
pub const EXPERT_NAME: &str = "Especialista em Segurança Digital";

pub const SELECT_OPTION_HINT: &str = "Selecione uma das opções antes de continuar.";
pub const FIRST_QUESTION_HINT: &str = "Esta é a primeira pergunta.";
pub const USE_BUTTONS_HINT: &str = "Por favor, use os botões abaixo.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Choose(u8),
    Next,
    Back,
    EditField(Field),
    FillField(String),
    SelectEmployees(EmployeeCount),
    CancelEdit,
    Submit,
    CallExpert,
    Restart,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notification {
    pub fn saved() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Dados salvos com sucesso!",
            description: "Seu resultado foi calculado e salvo em nosso sistema.",
        }
    }

    pub fn save_failed() -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Erro ao salvar dados",
            description: "Tente novamente em alguns instantes.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTarget {
    pub phone_number: &'static str,
    pub name: &'static str,
}

/// Work for the chat layer, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show the current screen again.
    Render,
    /// Ask for the value of a single form field.
    Prompt(Field),
    Notify(Notification),
    PlaceCall(CallTarget),
    Hint(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub session: Session,
    pub form: ContactForm,
}

impl State {
    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    /// Applies `intent`; a successful contact submission is handed to `leads`.
    pub fn handle(&mut self, intent: Intent, leads: &dyn LeadSink) -> Vec<Effect> {
        let result = match intent {
            Intent::Start => self.session.start().map(|()| vec![Effect::Render]),
            Intent::Choose(value) => {
                let question_id = self.session.current_question().id;
                self.session
                    .answer(question_id, value)
                    .map(|()| vec![Effect::Render])
            }
            Intent::Next => self.session.next().map(|()| vec![Effect::Render]),
            Intent::Back => Ok(self.back()),
            Intent::EditField(field) => Ok(self.edit(field)),
            Intent::FillField(value) => Ok(self.fill(value)),
            Intent::SelectEmployees(count) => {
                self.form.select_employee_count(count);
                Ok(vec![Effect::Render])
            }
            Intent::CancelEdit => {
                self.form.cancel_edit();
                Ok(vec![Effect::Render])
            }
            Intent::Submit => self.submit(leads),
            Intent::CallExpert => Ok(self.call_expert()),
            Intent::Restart => {
                self.session.restart();
                self.form = ContactForm::default();
                Ok(vec![Effect::Render])
            }
            Intent::Unrecognized => Ok(vec![Effect::Hint(USE_BUTTONS_HINT)]),
        };

        result.unwrap_or_else(|err| self.reject(err))
    }

    fn back(&mut self) -> Vec<Effect> {
        match self.screen() {
            Screen::Welcome => vec![Effect::Render],
            Screen::Questions if !self.session.can_go_back() => {
                vec![Effect::Hint(FIRST_QUESTION_HINT)]
            }
            _ => {
                self.form.cancel_edit();
                self.session.back();
                vec![Effect::Render]
            }
        }
    }

    fn edit(&mut self, field: Field) -> Vec<Effect> {
        if self.screen() != Screen::Contact {
            return vec![Effect::Render];
        }
        self.form.begin_edit(field);
        vec![Effect::Prompt(field)]
    }

    fn fill(&mut self, value: String) -> Vec<Effect> {
        if self.screen() != Screen::Contact {
            return vec![Effect::Hint(USE_BUTTONS_HINT)];
        }
        let Some(field) = self.form.editing else {
            return vec![Effect::Hint(USE_BUTTONS_HINT)];
        };
        if self.form.fill(value) {
            vec![Effect::Render]
        } else {
            vec![Effect::Prompt(field)]
        }
    }

    fn submit(&mut self, leads: &dyn LeadSink) -> Result<Vec<Effect>, SessionError> {
        let before = self.session.clone();
        self.session.submit_contact(&self.form.draft)?;

        if let Err(err) = self.capture_lead(leads) {
            log::error!("Failed to capture lead: {}", err);
            self.session = before;
            return Ok(vec![Effect::Notify(Notification::save_failed())]);
        }

        self.form.errors = Default::default();
        self.form.editing = None;
        Ok(vec![Effect::Notify(Notification::saved()), Effect::Render])
    }

    fn capture_lead(&self, leads: &dyn LeadSink) -> Result<(), LeadError> {
        let Some(contact) = self.session.contact() else {
            return Ok(());
        };
        leads.capture(&LeadRecord::new(contact, self.session.answers(), Utc::now()))
    }

    fn call_expert(&self) -> Vec<Effect> {
        if self.screen() != Screen::Result {
            return vec![Effect::Render];
        }
        vec![Effect::PlaceCall(CallTarget {
            phone_number: EXPERT_PHONE,
            name: EXPERT_NAME,
        })]
    }

    fn reject(&mut self, err: SessionError) -> Vec<Effect> {
        log::debug!("Rejected intent: {}", err);
        match err {
            SessionError::Validation(errors) => {
                self.form.errors = errors;
                self.form.editing = None;
                vec![Effect::Render]
            }
            SessionError::Unanswered { .. } => vec![Effect::Hint(SELECT_OPTION_HINT)],
            SessionError::UnknownOption { .. } => vec![Effect::Hint(USE_BUTTONS_HINT)],
            SessionError::WrongScreen { .. } => vec![Effect::Render],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::contact::{FieldError, FieldErrors};
    use crate::quiz::scoring::Tier;
    use crate::lead::LogLeads;
    use crate::quiz::AnswerMap;

    struct FailingLeads;

    impl LeadSink for FailingLeads {
        fn capture(&self, _record: &LeadRecord<'_>) -> Result<(), LeadError> {
            let err = serde_json::from_str::<u32>("not a number").unwrap_err();
            Err(LeadError::Encode(err))
        }
    }

    fn fill(state: &mut State, field: Field, value: &str) {
        assert_eq!(
            state.handle(Intent::EditField(field), &LogLeads),
            vec![Effect::Prompt(field)]
        );
        assert_eq!(
            state.handle(Intent::FillField(value.to_string()), &LogLeads),
            vec![Effect::Render]
        );
    }

    fn through_questions(values: &[u8]) -> State {
        let mut state = State::default();
        state.handle(Intent::Start, &LogLeads);
        for value in values {
            assert_eq!(
                state.handle(Intent::Choose(*value), &LogLeads),
                vec![Effect::Render]
            );
            assert_eq!(state.handle(Intent::Next, &LogLeads), vec![Effect::Render]);
        }
        state
    }

    fn fill_valid_contact(state: &mut State) {
        fill(state, Field::Name, "Ana Souza");
        fill(state, Field::Email, "ana@empresa.com.br");
        fill(state, Field::Phone, "(11) 98888-7777");
        fill(state, Field::Company, "Empresa X");
        state.handle(Intent::SelectEmployees(EmployeeCount::SixToTen), &LogLeads);
    }

    #[test]
    fn end_to_end_good_result() {
        let mut state = through_questions(&[2, 1, 2, 0, 1]);
        assert_eq!(state.screen(), Screen::Contact);

        fill_valid_contact(&mut state);
        let effects = state.handle(Intent::Submit, &LogLeads);

        assert_eq!(effects, vec![Effect::Notify(Notification::saved()), Effect::Render]);
        assert_eq!(state.screen(), Screen::Result);
        let report = state.session.report();
        assert_eq!(report.score, 6);
        assert_eq!(report.percentage, 60);
        assert_eq!(report.tier, Tier::Good);
    }

    #[test]
    fn next_without_answer_hints() {
        let mut state = through_questions(&[]);
        assert_eq!(
            state.handle(Intent::Next, &LogLeads),
            vec![Effect::Hint(SELECT_OPTION_HINT)]
        );
        assert_eq!(state.session.current_index(), 0);
    }

    #[test]
    fn back_on_first_question_is_suppressed() {
        let mut state = through_questions(&[]);
        assert_eq!(
            state.handle(Intent::Back, &LogLeads),
            vec![Effect::Hint(FIRST_QUESTION_HINT)]
        );
        assert_eq!(state.screen(), Screen::Questions);
    }

    #[test]
    fn invalid_submit_shows_inline_errors() {
        let mut state = through_questions(&[0, 0, 0, 0, 0]);
        assert_eq!(state.handle(Intent::Submit, &LogLeads), vec![Effect::Render]);
        assert_eq!(state.screen(), Screen::Contact);
        assert_eq!(state.form.errors.len(), 5);
        assert_eq!(state.form.errors.get(Field::Email), Some(FieldError::InvalidFormat));

        fill(&mut state, Field::Email, "ana@empresa.com.br");
        assert_eq!(state.form.errors.get(Field::Email), None);
        assert_eq!(state.form.errors.len(), 4);
    }

    #[test]
    fn employee_count_cannot_be_typed() {
        let mut state = through_questions(&[1, 1, 1, 1, 1]);
        state.handle(Intent::EditField(Field::EmployeeCount), &LogLeads);
        assert_eq!(
            state.handle(Intent::FillField("muitos".to_string()), &LogLeads),
            vec![Effect::Prompt(Field::EmployeeCount)]
        );
        assert_eq!(state.form.draft.employee_count, None);
    }

    #[test]
    fn result_back_keeps_draft_for_resubmission() {
        let mut state = through_questions(&[2, 2, 2, 2, 2]);
        fill_valid_contact(&mut state);
        state.handle(Intent::Submit, &LogLeads);

        assert_eq!(state.handle(Intent::Back, &LogLeads), vec![Effect::Render]);
        assert_eq!(state.screen(), Screen::Contact);
        assert_eq!(state.form.draft.name, "Ana Souza");

        fill(&mut state, Field::Company, "Empresa Y");
        state.handle(Intent::Submit, &LogLeads);
        assert_eq!(state.screen(), Screen::Result);
        assert_eq!(
            state.session.contact().map(|c| c.company.as_str()),
            Some("Empresa Y")
        );
    }

    #[test]
    fn call_expert_only_on_result() {
        let mut state = through_questions(&[2, 2, 2, 2, 2]);
        assert_eq!(
            state.handle(Intent::CallExpert, &LogLeads),
            vec![Effect::Render]
        );

        fill_valid_contact(&mut state);
        state.handle(Intent::Submit, &LogLeads);
        assert_eq!(
            state.handle(Intent::CallExpert, &LogLeads),
            vec![Effect::PlaceCall(CallTarget {
                phone_number: EXPERT_PHONE,
                name: EXPERT_NAME,
            })]
        );
        assert_eq!(state.screen(), Screen::Result);
    }

    #[test]
    fn restart_clears_session_and_form() {
        let mut state = through_questions(&[0, 1, 2, 1, 0]);
        fill_valid_contact(&mut state);
        state.handle(Intent::Submit, &LogLeads);

        assert_eq!(state.handle(Intent::Restart, &LogLeads), vec![Effect::Render]);
        assert_eq!(state, State::default());
        assert_eq!(state.session.answers(), &AnswerMap::new());
        assert_eq!(state.form.errors, FieldErrors::default());
    }

    #[test]
    fn start_twice_rerenders() {
        let mut state = through_questions(&[1]);
        assert_eq!(state.handle(Intent::Start, &LogLeads), vec![Effect::Render]);
        assert_eq!(state.session.current_index(), 1);
        assert_eq!(state.session.answer_for(1), Some(1));
    }

    #[test]
    fn failed_lead_capture_keeps_contact_screen() {
        let mut state = through_questions(&[2, 1, 2, 0, 1]);
        fill_valid_contact(&mut state);

        let effects = state.handle(Intent::Submit, &FailingLeads);

        assert_eq!(effects, vec![Effect::Notify(Notification::save_failed())]);
        assert_eq!(state.screen(), Screen::Contact);
        assert!(state.session.contact().is_none());
        assert_eq!(state.form.draft.name, "Ana Souza");

        state.handle(Intent::Submit, &LogLeads);
        assert_eq!(state.screen(), Screen::Result);
    }
}
