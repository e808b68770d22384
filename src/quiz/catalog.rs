use crate::quiz::{AnswerOption, Question, QUESTION_COUNT};

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question::new(
        1,
        "Sua empresa possui controle sobre quais sites os funcionários podem acessar?",
        [
            AnswerOption::new(0, "Não, não há controle algum"),
            AnswerOption::new(1, "Controle básico apenas para alguns sites"),
            AnswerOption::new(2, "Sim, temos controle completo"),
        ],
    ),
    Question::new(
        2,
        "Existe monitoramento do tempo gasto em navegação durante o horário de trabalho?",
        [
            AnswerOption::new(0, "Não monitoramos"),
            AnswerOption::new(1, "Monitoramento básico"),
            AnswerOption::new(2, "Monitoramento completo e detalhado"),
        ],
    ),
    Question::new(
        3,
        "Como sua empresa lida com downloads de arquivos da internet?",
        [
            AnswerOption::new(0, "Sem restrições"),
            AnswerOption::new(1, "Algumas restrições básicas"),
            AnswerOption::new(2, "Controle rigoroso de downloads"),
        ],
    ),
    Question::new(
        4,
        "Há políticas definidas para uso de redes sociais no trabalho?",
        [
            AnswerOption::new(0, "Não há políticas definidas"),
            AnswerOption::new(1, "Políticas básicas informais"),
            AnswerOption::new(2, "Políticas claras e bem definidas"),
        ],
    ),
    Question::new(
        5,
        "Sua empresa possui firewall para proteção da rede?",
        [
            AnswerOption::new(0, "Não possuímos firewall"),
            AnswerOption::new(1, "Firewall básico"),
            AnswerOption::new(2, "Firewall avançado com monitoramento"),
        ],
    ),
];

pub fn question(id: u32) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}
