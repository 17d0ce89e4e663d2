//! Profile builder: folds a user's quiz answers into one normalized `AxisVector`.
//!
//! Answers arrive loosely typed (JSON object keyed `q1` … `q30`). `Answers::from_json`
//! is the only place that coercion happens; the scoring core sees the closed
//! `Choice` type and nothing else.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::axis::{AxisVector, AXIS_COUNT, AXIS_MAX};
use crate::questions::{axis_maxima, Choice, QuestionId, QUESTIONS, QUESTION_COUNT};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerError {
    #[error("Answers must be a JSON object keyed by question id")]
    NotAnObject,

    #[error("Unknown question id: '{0}'")]
    UnknownQuestion(String),

    #[error(
        "Invalid choice for {question}: {value} (expected \"A\", \"B\", \"C\", 0, 1, 2 or null)"
    )]
    InvalidChoice { question: String, value: String },
}

/// One optional choice per question. Unanswered questions contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers([Option<Choice>; QUESTION_COUNT]);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds answers positionally; entries beyond the question count are ignored.
    pub fn from_choices<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = Option<Choice>>,
    {
        let mut answers = Self::default();
        for (slot, choice) in answers.0.iter_mut().zip(choices) {
            *slot = choice;
        }
        answers
    }

    /// Parses the wire shape: `{ "q1": "A", "q2": 2, "q3": null, ... }`.
    ///
    /// Choice strings are case-insensitive; integers are zero-based. Missing keys
    /// and `null` mean unanswered. Anything else is rejected.
    pub fn from_json(value: &Value) -> Result<Self, AnswerError> {
        let object = value.as_object().ok_or(AnswerError::NotAnObject)?;
        let mut answers = Self::default();

        for (key, raw) in object {
            let id: QuestionId = key
                .parse()
                .map_err(|_| AnswerError::UnknownQuestion(key.clone()))?;
            answers.set(id, parse_choice(key, raw)?);
        }

        Ok(answers)
    }

    pub fn with(mut self, id: QuestionId, choice: Choice) -> Self {
        self.set(id, Some(choice));
        self
    }

    pub fn set(&mut self, id: QuestionId, choice: Option<Choice>) {
        self.0[id.position()] = choice;
    }

    pub fn get(&self, id: QuestionId) -> Option<Choice> {
        self.0[id.position()]
    }

    pub fn answered(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Choice)> + '_ {
        self.0.iter().enumerate().filter_map(|(i, choice)| {
            let id = QuestionId::new(i + 1)?;
            choice.map(|c| (id, c))
        })
    }
}

fn parse_choice(question: &str, raw: &Value) -> Result<Option<Choice>, AnswerError> {
    let invalid = || AnswerError::InvalidChoice {
        question: question.to_string(),
        value: raw.to_string(),
    };

    match raw {
        Value::Null => Ok(None),
        Value::String(s) => s.parse::<Choice>().map(Some).map_err(|_| invalid()),
        Value::Number(n) => n
            .as_u64()
            .and_then(Choice::from_index)
            .map(Some)
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Accumulates answer deltas per axis and scales each sum by the highest sum
/// that axis can reach under the question table.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    maxima: [u32; AXIS_COUNT],
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            maxima: axis_maxima(),
        }
    }

    pub fn build(&self, answers: &Answers) -> AxisVector {
        let mut sums = [0u32; AXIS_COUNT];
        for (id, choice) in answers.iter() {
            for &(axis, amount) in QUESTIONS[id.position()].deltas(choice) {
                sums[axis.index()] += u32::from(amount);
            }
        }

        let mut values = [0.0; AXIS_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            if self.maxima[i] > 0 {
                *value = f64::from(sums[i]) / f64::from(self.maxima[i]) * AXIS_MAX;
            }
        }

        debug!(answered = answers.answered(), "built profile vector");
        AxisVector::clamped(values)
    }
}
