use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::LeadError;
use crate::quiz::contact::ContactData;
use crate::quiz::scoring::Report;
use crate::quiz::AnswerMap;

/// What gets logged once a lead has filled in the contact form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord<'a> {
    #[serde(flatten)]
    pub contact: &'a ContactData,
    pub answers: &'a AnswerMap,
    pub total_score: u32,
    pub percentage: u32,
    pub timestamp: DateTime<Utc>,
}

impl<'a> LeadRecord<'a> {
    pub fn new(contact: &'a ContactData, answers: &'a AnswerMap, timestamp: DateTime<Utc>) -> Self {
        let report = Report::new(answers);
        Self {
            contact,
            answers,
            total_score: report.score,
            percentage: report.percentage,
            timestamp,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Destination of captured leads.
pub trait LeadSink: Send + Sync {
    fn capture(&self, record: &LeadRecord<'_>) -> Result<(), LeadError>;
}

/// Writes each lead to the log as JSON; nothing is sent anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLeads;

impl LeadSink for LogLeads {
    fn capture(&self, record: &LeadRecord<'_>) -> Result<(), LeadError> {
        log::info!("Lead captured: {}", record.to_json()?);
        Ok(())
    }
}
