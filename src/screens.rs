//! Chat rendering of the four quiz screens, and the reverse mapping from a
//! pressed keyboard button back to an [`Intent`].
//!
//! Everything here is a pure function of [`State`]; sending is left to the
//! bot handlers.

use teloxide::utils::html;

use crate::controller::{
    Intent, Notification, NotificationKind, State, EXPERT_EMAIL, EXPERT_PHONE_DISPLAY,
};
use crate::quiz::contact::{ContactForm, EmployeeCount, Field};
use crate::quiz::scoring::Report;
use crate::quiz::session::{Screen, Session};
use crate::quiz::QUESTION_COUNT;

pub const START_BUTTON: &str = "Iniciar Avaliação";
pub const NEXT_BUTTON: &str = "Próxima ➡️";
pub const FINISH_BUTTON: &str = "Finalizar ➡️";
pub const BACK_BUTTON: &str = "⬅️ Voltar";
pub const SUBMIT_BUTTON: &str = "Ver Resultado ➡️";
pub const CANCEL_BUTTON: &str = "Cancelar";
pub const CALL_BUTTON: &str = "📞 FALAR COM ESPECIALISTA AGORA";
pub const RESTART_BUTTON: &str = "Nova Avaliação";
pub const TEXT_ONLY_HINT: &str = "Por favor, responda com texto ou use os botões.";

const SELECTED_MARK: &str = "✅ ";
const EDIT_MARK: &str = "✏️ ";

/// A message body (HTML) together with its reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub text: String,
    pub keyboard: Vec<Vec<String>>,
}

pub fn render(state: &State) -> View {
    match state.screen() {
        Screen::Welcome => welcome(),
        Screen::Questions => question(&state.session),
        Screen::Contact => contact(&state.form),
        Screen::Result => result(&state.session.report()),
    }
}

fn welcome() -> View {
    let text = format!(
        "{}\n\nDescubra o nível de controle e segurança da navegação em sua empresa.\n\n\
         <i>Avaliação rápida em {} perguntas</i>",
        html::bold("Avaliação de Segurança de Navegação"),
        QUESTION_COUNT
    );
    View {
        text,
        keyboard: vec![vec![START_BUTTON.to_string()]],
    }
}

fn question(session: &Session) -> View {
    let question = session.current_question();
    let number = session.current_index() + 1;
    let progress = (number * 100 + QUESTION_COUNT / 2) / QUESTION_COUNT;
    let selected = session.answer_for(question.id);

    let options = question
        .options
        .iter()
        .map(|o| {
            let mark = if Some(o.value) == selected { "🔘" } else { "⚪️" };
            format!("{} {}", mark, html::escape(o.label))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "<i>Pergunta {} de {} · {}%</i>\n\n{}\n\n{}",
        number,
        QUESTION_COUNT,
        progress,
        html::bold(question.text),
        options
    );

    let mut keyboard = question
        .options
        .iter()
        .map(|o| {
            let label = if Some(o.value) == selected {
                format!("{}{}", SELECTED_MARK, o.label)
            } else {
                o.label.to_string()
            };
            vec![label]
        })
        .collect::<Vec<_>>();

    let mut navigation = Vec::new();
    if session.can_go_back() {
        navigation.push(BACK_BUTTON.to_string());
    }
    // Next stays hidden until the question is answered.
    if selected.is_some() {
        let next = if session.is_last_question() {
            FINISH_BUTTON
        } else {
            NEXT_BUTTON
        };
        navigation.push(next.to_string());
    }
    if !navigation.is_empty() {
        keyboard.push(navigation);
    }

    View { text, keyboard }
}

fn contact(form: &ContactForm) -> View {
    let mut text = format!(
        "{}\nPara receber seu resultado, precisamos de algumas informações:\n",
        html::bold("Quase terminando!")
    );
    for field in Field::ALL {
        let value = match form.draft.value(field) {
            Some(value) => html::escape(value),
            None => format!("<i>{}</i>", field.placeholder()),
        };
        text.push_str(&format!("\n{} *: {}", html::bold(field.label()), value));
        if let Some(error) = form.errors.get(field) {
            text.push_str(&format!("\n    ❗️ {}", error.message(field)));
        }
    }

    let mut keyboard = Field::ALL
        .chunks(2)
        .map(|pair| pair.iter().map(|f| field_button(*f)).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    keyboard.push(vec![BACK_BUTTON.to_string(), SUBMIT_BUTTON.to_string()]);

    View { text, keyboard }
}

fn result(report: &Report) -> View {
    let recommendations = report
        .tier
        .recommendations()
        .iter()
        .map(|r| format!("• {}", html::escape(r)))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "{}\n\n{} <b>{}%</b> · {}\nVocê obteve {} de {} pontos\n\n{}\n{}\n\n{}\n\
         Fale com nossos especialistas em segurança digital e proteja sua empresa agora mesmo!\n\
         📞 {}\n✉️ {}",
        html::bold("Resultado da Avaliação"),
        report.tier.icon(),
        report.percentage,
        html::bold(report.tier.label()),
        report.score,
        report.max_score,
        html::bold("RECOMENDAÇÕES:"),
        recommendations,
        html::bold("Precisa de ajuda especializada?"),
        EXPERT_PHONE_DISPLAY,
        EXPERT_EMAIL,
    );

    View {
        text,
        keyboard: vec![
            vec![CALL_BUTTON.to_string()],
            vec![BACK_BUTTON.to_string(), RESTART_BUTTON.to_string()],
        ],
    }
}

/// Input request for a single contact field.
pub fn prompt(field: Field) -> View {
    let text = format!("{} *\n<i>{}</i>", html::bold(field.label()), field.placeholder());
    let mut keyboard: Vec<Vec<String>> = match field {
        Field::EmployeeCount => EmployeeCount::ALL
            .iter()
            .map(|c| vec![c.label().to_string()])
            .collect(),
        _ => Vec::new(),
    };
    keyboard.push(vec![CANCEL_BUTTON.to_string()]);
    View { text, keyboard }
}

pub fn notification(notification: &Notification) -> String {
    let icon = match notification.kind {
        NotificationKind::Success => "✅",
        NotificationKind::Error => "❌",
    };
    format!(
        "{} {}\n{}",
        icon,
        html::bold(notification.title),
        html::escape(notification.description)
    )
}

fn field_button(field: Field) -> String {
    format!("{}{}", EDIT_MARK, field.label())
}

/// Interprets a message according to the screen currently shown.
pub fn read_intent(state: &State, text: &str) -> Intent {
    let text = text.trim();
    match state.screen() {
        Screen::Welcome => match text {
            START_BUTTON => Intent::Start,
            _ => Intent::Unrecognized,
        },
        Screen::Questions => match text {
            BACK_BUTTON => Intent::Back,
            NEXT_BUTTON | FINISH_BUTTON => Intent::Next,
            _ => {
                let label = text.strip_prefix(SELECTED_MARK).unwrap_or(text);
                state
                    .session
                    .current_question()
                    .option_by_label(label)
                    .map_or(Intent::Unrecognized, |o| Intent::Choose(o.value))
            }
        },
        Screen::Contact => read_contact_intent(&state.form, text),
        Screen::Result => match text {
            CALL_BUTTON => Intent::CallExpert,
            BACK_BUTTON => Intent::Back,
            RESTART_BUTTON => Intent::Restart,
            _ => Intent::Unrecognized,
        },
    }
}

fn read_contact_intent(form: &ContactForm, text: &str) -> Intent {
    if text == CANCEL_BUTTON && form.editing.is_some() {
        return Intent::CancelEdit;
    }
    match form.editing {
        // Free text while a text field is open, even if it looks like a button.
        Some(field) if field != Field::EmployeeCount => Intent::FillField(text.to_string()),
        Some(_) => {
            EmployeeCount::from_label(text).map_or(Intent::Unrecognized, Intent::SelectEmployees)
        }
        None => match text {
            BACK_BUTTON => Intent::Back,
            SUBMIT_BUTTON => Intent::Submit,
            _ => EmployeeCount::from_label(text)
                .map(Intent::SelectEmployees)
                .or_else(|| {
                    Field::ALL
                        .into_iter()
                        .find(|f| field_button(*f) == text)
                        .map(Intent::EditField)
                })
                .unwrap_or(Intent::Unrecognized),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LogLeads;

    fn on_questions() -> State {
        let mut state = State::default();
        state.handle(Intent::Start, &LogLeads);
        state
    }

    fn flat(view: &View) -> Vec<&str> {
        view.keyboard.iter().flatten().map(String::as_str).collect()
    }

    #[test]
    fn welcome_offers_start() {
        let state = State::default();
        let view = render(&state);
        assert!(view.text.contains("Avaliação de Segurança de Navegação"));
        assert_eq!(flat(&view), vec![START_BUTTON]);
        assert_eq!(read_intent(&state, START_BUTTON), Intent::Start);
        assert_eq!(read_intent(&state, "olá"), Intent::Unrecognized);
    }

    #[test]
    fn first_question_has_no_back_and_no_next_until_answered() {
        let mut state = on_questions();
        let view = render(&state);
        assert!(view.text.contains("Pergunta 1 de 5 · 20%"));
        assert!(!flat(&view).contains(&BACK_BUTTON));
        assert!(!flat(&view).contains(&NEXT_BUTTON));

        state.handle(Intent::Choose(1), &LogLeads);
        let view = render(&state);
        assert!(flat(&view).contains(&NEXT_BUTTON));
        assert!(flat(&view).contains(&"✅ Controle básico apenas para alguns sites"));
    }

    #[test]
    fn later_questions_offer_back_and_last_offers_finish() {
        let mut state = on_questions();
        for _ in 0..4 {
            state.handle(Intent::Choose(2), &LogLeads);
            state.handle(Intent::Next, &LogLeads);
        }
        state.handle(Intent::Choose(0), &LogLeads);
        let view = render(&state);
        assert!(view.text.contains("Pergunta 5 de 5 · 100%"));
        assert!(flat(&view).contains(&BACK_BUTTON));
        assert!(flat(&view).contains(&FINISH_BUTTON));
    }

    #[test]
    fn option_buttons_map_to_values() {
        let state = on_questions();
        assert_eq!(read_intent(&state, "Sim, temos controle completo"), Intent::Choose(2));
        assert_eq!(read_intent(&state, "✅ Não, não há controle algum"), Intent::Choose(0));
        assert_eq!(read_intent(&state, "Firewall básico"), Intent::Unrecognized);
        assert_eq!(read_intent(&state, FINISH_BUTTON), Intent::Next);
    }

    #[test]
    fn contact_form_shows_inline_errors() {
        let mut state = on_questions();
        for _ in 0..5 {
            state.handle(Intent::Choose(1), &LogLeads);
            state.handle(Intent::Next, &LogLeads);
        }
        state.handle(Intent::Submit, &LogLeads);
        let view = render(&state);
        assert!(view.text.contains("Nome é obrigatório"));
        assert!(view.text.contains("E-mail inválido"));
        assert!(view.text.contains("Selecione o número de funcionários"));
        assert!(flat(&view).contains(&SUBMIT_BUTTON));
    }

    #[test]
    fn contact_intents_follow_the_field_being_edited() {
        let mut state = State::default();
        assert_eq!(
            read_contact_intent(&state.form, "✏️ Telefone"),
            Intent::EditField(Field::Phone)
        );
        assert_eq!(read_contact_intent(&state.form, "qualquer"), Intent::Unrecognized);
        assert_eq!(read_contact_intent(&state.form, SUBMIT_BUTTON), Intent::Submit);

        state.form.begin_edit(Field::Phone);
        assert_eq!(
            read_contact_intent(&state.form, "11 5555-0000"),
            Intent::FillField("11 5555-0000".to_string())
        );
        assert_eq!(read_contact_intent(&state.form, CANCEL_BUTTON), Intent::CancelEdit);

        state.form.begin_edit(Field::EmployeeCount);
        assert_eq!(
            read_contact_intent(&state.form, "6 a 10 funcionários"),
            Intent::SelectEmployees(EmployeeCount::SixToTen)
        );
        assert_eq!(read_contact_intent(&state.form, "sete"), Intent::Unrecognized);
        assert_eq!(flat(&prompt(Field::EmployeeCount)).len(), 4);
    }

    #[test]
    fn result_lists_tier_and_recommendations() {
        let report = Report::new(&[(1, 0), (2, 0), (3, 1), (4, 0), (5, 0)].into_iter().collect());
        let view = result(&report);
        assert!(view.text.contains("<b>10%</b>"));
        assert!(view.text.contains("Crítico"));
        assert_eq!(view.text.matches("• ").count(), 4);
        assert!(view.text.contains(EXPERT_PHONE_DISPLAY));
        assert_eq!(flat(&view), vec![CALL_BUTTON, BACK_BUTTON, RESTART_BUTTON]);
    }

    #[test]
    fn notification_text() {
        let text = notification(&Notification::save_failed());
        assert!(text.starts_with("❌"));
        assert!(text.contains("Erro ao salvar dados"));
    }

    #[test]
    fn headcount_label_typed_into_text_field_is_kept_as_text() {
        let mut form = ContactForm::default();
        form.begin_edit(Field::Name);
        assert_eq!(
            read_contact_intent(&form, "1 a 5 funcionários"),
            Intent::FillField("1 a 5 funcionários".to_string())
        );

        form.cancel_edit();
        assert_eq!(
            read_contact_intent(&form, "1 a 5 funcionários"),
            Intent::SelectEmployees(EmployeeCount::UpToFive)
        );
    }
}
