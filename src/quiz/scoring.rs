use serde::Serialize;

use crate::quiz::{AnswerMap, MAX_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Excellent,
    Good,
    Regular,
    Critical,
}

impl Tier {
    /// Highest tier whose threshold the percentage reaches.
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 80 => Self::Excellent,
            p if p >= 60 => Self::Good,
            p if p >= 40 => Self::Regular,
            _ => Self::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Bom",
            Self::Regular => "Regular",
            Self::Critical => "Crítico",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Excellent => "✅",
            Self::Good => "🛡",
            Self::Regular | Self::Critical => "⚠️",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Excellent => &[
                "Parabéns! Sua empresa possui excelente controle de navegação.",
                "Continue monitorando regularmente para manter a segurança.",
                "Considere implementar políticas ainda mais avançadas.",
            ],
            Self::Good => &[
                "Sua empresa possui bom nível de controle, mas há espaço para melhorias.",
                "Recomendamos a instalação de um firewall mais robusto para melhor monitoramento.",
                "Implemente políticas mais claras para navegação corporativa.",
            ],
            Self::Regular => &[
                "Sua empresa precisa de melhorias significativas no controle de navegação.",
                "É essencial instalar um firewall profissional para monitoramento adequado.",
                "Desenvolva políticas claras de uso da internet no ambiente corporativo.",
            ],
            Self::Critical => &[
                "ATENÇÃO: Sua empresa está em situação crítica de segurança.",
                "É URGENTE a instalação de um firewall para monitoramento da navegação.",
                "Implemente imediatamente políticas rigorosas de uso da internet.",
                "Considere treinamento para funcionários sobre segurança digital.",
            ],
        }
    }
}

pub fn total_score(answers: &AnswerMap) -> u32 {
    answers.values().map(|v| u32::from(*v)).sum()
}

/// `score / max_score` as a whole percentage, halves rounded up.
pub fn percentage(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (score * 200 + max_score) / (max_score * 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub tier: Tier,
}

impl Report {
    pub fn new(answers: &AnswerMap) -> Self {
        let score = total_score(answers);
        let percentage = percentage(score, MAX_SCORE);
        Self {
            score,
            max_score: MAX_SCORE,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }
}
