//! JSON shapes exchanged with the assignment service, and their mapping
//! into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quiz_core::SubmissionPayload;
use quiz_core::model::{
    AssignmentId, AssignmentResults, AssignmentSummary, CategoryGroup, CategoryId, MasteryStats,
    MediaRef, OutcomeStatus, Question, QuestionId, ResponseFeedback, ScoredResponse,
};

use crate::repository::GatewayError;

fn decode<E: core::fmt::Display>(e: E) -> GatewayError {
    GatewayError::Decode(e.to_string())
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

// ─── CATALOGUE ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionDetails {
    pub assignments: Vec<AssignmentDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentDto {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stats: Option<StatsDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsDto {
    #[serde(default)]
    pub mastery_percentage: f64,
    #[serde(default)]
    pub mastered_questions: u32,
    #[serde(default)]
    pub total_questions: u32,
}

pub(crate) fn map_assignment(dto: AssignmentDto) -> AssignmentSummary {
    AssignmentSummary {
        id: AssignmentId::new(dto.id),
        name: dto.name,
        created_at: dto.created_at,
        is_completed: dto.is_completed,
        completed_at: dto.completed_at,
        stats: dto.stats.map(|s| MasteryStats {
            mastery_percentage: s.mastery_percentage,
            mastered_questions: s.mastered_questions,
            total_questions: s.total_questions,
        }),
    }
}

// ─── QUESTIONS ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsBody {
    pub questions: Vec<CategoryDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryDto {
    pub category_id: u64,
    pub category_name: String,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDto {
    pub id: u64,
    pub question: String,
    pub options: OptionsDto,
    #[serde(default)]
    pub question_media_path: Option<String>,
    #[serde(default)]
    pub long_content_file_path: Option<String>,
}

/// Options arrive either as a JSON array or as a JSON-encoded array string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OptionsDto {
    List(Vec<String>),
    Encoded(String),
}

impl OptionsDto {
    fn into_list(self, question: u64) -> Result<Vec<String>, GatewayError> {
        match self {
            OptionsDto::List(list) => Ok(list),
            OptionsDto::Encoded(raw) => serde_json::from_str(&raw).map_err(|e| {
                GatewayError::Decode(format!("options of question {question}: {e}"))
            }),
        }
    }
}

pub(crate) fn map_question(dto: QuestionDto) -> Result<Question, GatewayError> {
    let options = dto.options.into_list(dto.id)?;
    let question = Question::new(QuestionId::new(dto.id), dto.question, options).map_err(decode)?;
    Ok(question
        .with_media(dto.question_media_path.and_then(MediaRef::new))
        .with_reference_document(dto.long_content_file_path))
}

pub(crate) fn map_category(dto: CategoryDto) -> Result<CategoryGroup, GatewayError> {
    let questions = dto
        .questions
        .into_iter()
        .map(map_question)
        .collect::<Result<Vec<_>, _>>()?;
    CategoryGroup::new(CategoryId::new(dto.category_id), dto.category_name, questions)
        .map_err(decode)
}

// ─── SUBMISSION ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct SubmitBody<'a> {
    pub responses: Vec<SubmitResponse<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitResponse<'a> {
    pub question_id: u64,
    pub answer: &'a str,
    pub is_sure: bool,
}

impl<'a> SubmitBody<'a> {
    pub(crate) fn from_payload(payload: &'a SubmissionPayload) -> Self {
        Self {
            responses: payload
                .iter()
                .map(|entry| SubmitResponse {
                    question_id: entry.question_id.value(),
                    answer: entry.answer_text.as_str(),
                    is_sure: entry.is_sure,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResult {
    pub results: Vec<ScoredDto>,
}

// ─── RESULTS ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsBody {
    pub assignment: AttemptDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttemptDto {
    #[serde(default)]
    pub responses: Vec<ScoredDto>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoredDto {
    pub question_id: u64,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    pub status: OutcomeStatus,
    #[serde(default)]
    pub feedback: Option<FeedbackDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackDto {
    #[serde(default)]
    pub short_content: Option<String>,
    #[serde(default)]
    pub long_content: Option<LongContentDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LongContentDto {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn map_scored(dto: ScoredDto) -> ScoredResponse {
    let feedback = dto.feedback.unwrap_or_default();
    let long = feedback.long_content.unwrap_or_default();
    ScoredResponse {
        question_id: QuestionId::new(dto.question_id),
        question_text: non_blank(dto.question),
        user_answer: dto.user_answer,
        correct_answer: dto.correct_answer,
        status: dto.status,
        feedback: ResponseFeedback {
            short: non_blank(feedback.short_content),
            long_text: non_blank(long.text),
            long_file_path: non_blank(long.file_path),
        },
    }
}

pub(crate) fn map_attempt(dto: AttemptDto) -> AssignmentResults {
    AssignmentResults {
        responses: dto.responses.into_iter().map(map_scored).collect(),
        completed_at: dto.completed_at,
    }
}
