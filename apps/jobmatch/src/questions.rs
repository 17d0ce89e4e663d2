//! Question mapping: the static table from each quiz answer to its axis deltas.
//!
//! Invariant: within one question, no two choices carry identical deltas, so
//! changing any single answer always moves at least one profile axis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AXIS_COUNT};
use crate::axis::Axis::{
    Action, Analysis, Creativity, HumanContact, Leadership, RiskTolerance, Stability, Structure,
};

pub const QUESTION_COUNT: usize = 30;
pub const MAX_DELTA: u8 = 3;

/// One of the three discrete answers a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::A, Choice::B, Choice::C];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u64) -> Option<Choice> {
        match index {
            0 => Some(Choice::A),
            1 => Some(Choice::B),
            2 => Some(Choice::C),
            _ => None,
        }
    }
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Choice::A),
            "B" | "b" => Ok(Choice::B),
            "C" | "c" => Ok(Choice::C),
            _ => Err(()),
        }
    }
}

/// 1-based question identifier, rendered as `q1` … `q30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(u8);

impl QuestionId {
    pub fn new(number: usize) -> Option<Self> {
        (1..=QUESTION_COUNT)
            .contains(&number)
            .then(|| Self(number as u8))
    }

    pub fn number(self) -> usize {
        self.0 as usize
    }

    /// Zero-based position in [`QUESTIONS`].
    pub fn position(self) -> usize {
        self.number() - 1
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('q')
            .or_else(|| s.strip_prefix('Q'))
            .ok_or(())?;
        let number: usize = digits.parse().map_err(|_| ())?;
        QuestionId::new(number).ok_or(())
    }
}

/// An axis bump contributed by one answer.
pub type AxisDelta = (Axis, u8);

#[derive(Debug)]
pub struct Question {
    pub topic: &'static str,
    pub choices: [&'static [AxisDelta]; 3],
}

impl Question {
    pub fn deltas(&self, choice: Choice) -> &'static [AxisDelta] {
        self.choices[choice.index()]
    }
}

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        topic: "work_environment",
        choices: [&[(Structure, 2)], &[(Creativity, 2)], &[(Action, 2)]],
    },
    Question {
        topic: "team_role",
        choices: [&[(Leadership, 3)], &[(HumanContact, 2)], &[(Analysis, 2)]],
    },
    Question {
        topic: "deadline_pressure",
        choices: [
            &[(Structure, 2), (Stability, 1)],
            &[(RiskTolerance, 2)],
            &[(Action, 1), (RiskTolerance, 1)],
        ],
    },
    Question {
        topic: "problem_solving",
        choices: [&[(Analysis, 3)], &[(Creativity, 3)], &[(HumanContact, 2)]],
    },
    Question {
        topic: "career_security",
        choices: [
            &[(Stability, 3)],
            &[(RiskTolerance, 3)],
            &[(Stability, 1), (Creativity, 1)],
        ],
    },
    Question {
        topic: "daily_rhythm",
        choices: [
            &[(Structure, 3)],
            &[(Action, 2), (RiskTolerance, 1)],
            &[(Creativity, 1), (Stability, 1)],
        ],
    },
    Question {
        topic: "conflict",
        choices: [
            &[(Leadership, 2)],
            &[(HumanContact, 2), (Stability, 1)],
            &[(Analysis, 1), (Structure, 1)],
        ],
    },
    Question {
        topic: "learning_style",
        choices: [
            &[(Analysis, 2)],
            &[(Action, 2)],
            &[(HumanContact, 1), (Creativity, 1)],
        ],
    },
    Question {
        topic: "physical_activity",
        choices: [
            &[(Action, 3)],
            &[(Analysis, 1), (Structure, 1)],
            &[(Action, 1), (HumanContact, 1)],
        ],
    },
    Question {
        topic: "public_speaking",
        choices: [
            &[(Leadership, 2), (HumanContact, 1)],
            &[(Analysis, 1)],
            &[(Creativity, 2)],
        ],
    },
    Question {
        topic: "rules",
        choices: [
            &[(Structure, 3)],
            &[(Creativity, 2), (RiskTolerance, 1)],
            &[(Stability, 2)],
        ],
    },
    Question {
        topic: "helping_others",
        choices: [
            &[(HumanContact, 3)],
            &[(Analysis, 2)],
            &[(Leadership, 1), (Action, 1)],
        ],
    },
    Question {
        topic: "uncertainty",
        choices: [
            &[(RiskTolerance, 3)],
            &[(Stability, 2), (Structure, 1)],
            &[(Analysis, 2), (RiskTolerance, 1)],
        ],
    },
    Question {
        topic: "project_start",
        choices: [
            &[(Structure, 2), (Analysis, 1)],
            &[(Action, 2)],
            &[(Creativity, 2), (HumanContact, 1)],
        ],
    },
    Question {
        topic: "decision_making",
        choices: [
            &[(Analysis, 3)],
            &[(Leadership, 2), (RiskTolerance, 1)],
            &[(HumanContact, 2)],
        ],
    },
    Question {
        topic: "workplace",
        choices: [
            &[(Stability, 2)],
            &[(Action, 3)],
            &[(Creativity, 1), (HumanContact, 1)],
        ],
    },
    Question {
        topic: "responsibility",
        choices: [
            &[(Leadership, 3)],
            &[(Structure, 1), (Stability, 1)],
            &[(Analysis, 1), (Creativity, 1)],
        ],
    },
    Question {
        topic: "free_time",
        choices: [&[(Creativity, 3)], &[(Action, 2)], &[(HumanContact, 2)]],
    },
    Question {
        topic: "details",
        choices: [
            &[(Structure, 2), (Analysis, 2)],
            &[(Creativity, 2)],
            &[(Action, 1)],
        ],
    },
    Question {
        topic: "income",
        choices: [
            &[(Stability, 3)],
            &[(RiskTolerance, 2), (Leadership, 1)],
            &[(HumanContact, 1), (Stability, 1)],
        ],
    },
    Question {
        topic: "feedback",
        choices: [&[(Analysis, 2)], &[(HumanContact, 2)], &[(Leadership, 2)]],
    },
    Question {
        topic: "routine",
        choices: [
            &[(Structure, 2), (Stability, 2)],
            &[(RiskTolerance, 2), (Action, 1)],
            &[(Creativity, 2)],
        ],
    },
    Question {
        topic: "crisis",
        choices: [
            &[(Leadership, 2), (Action, 1)],
            &[(Structure, 2)],
            &[(HumanContact, 2), (Stability, 1)],
        ],
    },
    Question {
        topic: "tools",
        choices: [
            &[(Analysis, 2), (Structure, 1)],
            &[(Action, 2)],
            &[(Creativity, 2)],
        ],
    },
    Question {
        topic: "recognition",
        choices: [
            &[(Leadership, 2)],
            &[(Creativity, 1), (RiskTolerance, 1)],
            &[(Stability, 1)],
        ],
    },
    Question {
        topic: "collaboration",
        choices: [
            &[(HumanContact, 3)],
            &[(Analysis, 1), (Stability, 1)],
            &[(Leadership, 1), (Creativity, 1)],
        ],
    },
    Question {
        topic: "change",
        choices: [
            &[(RiskTolerance, 2), (Creativity, 1)],
            &[(Stability, 2)],
            &[(Action, 2)],
        ],
    },
    Question {
        topic: "travel",
        choices: [
            &[(Action, 2), (RiskTolerance, 1)],
            &[(Stability, 2), (Structure, 1)],
            &[(HumanContact, 1)],
        ],
    },
    Question {
        topic: "mission",
        choices: [
            &[(HumanContact, 2), (Leadership, 1)],
            &[(Analysis, 2), (Structure, 1)],
            &[(Creativity, 3)],
        ],
    },
    Question {
        topic: "ambition",
        choices: [
            &[(Leadership, 3)],
            &[(Stability, 2)],
            &[(RiskTolerance, 2), (Action, 1)],
        ],
    },
];

/// Highest sum each axis can reach: for every question, the largest amount any
/// of its choices grants on that axis.
pub fn axis_maxima() -> [u32; AXIS_COUNT] {
    let mut maxima = [0u32; AXIS_COUNT];
    for question in QUESTIONS.iter() {
        for axis in Axis::ALL {
            let best = question
                .choices
                .iter()
                .flat_map(|deltas| deltas.iter())
                .filter(|(a, _)| *a == axis)
                .map(|(_, amount)| u32::from(*amount))
                .max()
                .unwrap_or(0);
            maxima[axis.index()] += best;
        }
    }
    maxima
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(deltas: &[AxisDelta]) -> [u8; AXIS_COUNT] {
        let mut out = [0u8; AXIS_COUNT];
        for (axis, amount) in deltas {
            out[axis.index()] += amount;
        }
        out
    }

    #[test]
    fn test_choices_within_a_question_are_distinct() {
        for (i, question) in QUESTIONS.iter().enumerate() {
            let a = dense(question.deltas(Choice::A));
            let b = dense(question.deltas(Choice::B));
            let c = dense(question.deltas(Choice::C));
            assert!(
                a != b && b != c && a != c,
                "question {} ({}) has axis-identical choices",
                i + 1,
                question.topic
            );
        }
    }

    #[test]
    fn test_deltas_are_small() {
        for question in QUESTIONS.iter() {
            for deltas in question.choices {
                assert!(
                    (1..=2).contains(&deltas.len()),
                    "{} choice touches {} axes",
                    question.topic,
                    deltas.len()
                );
                for (_, amount) in deltas {
                    assert!((1..=MAX_DELTA).contains(amount));
                }
            }
        }
    }

    #[test]
    fn test_every_axis_is_reachable() {
        for (axis, max) in Axis::ALL.iter().zip(axis_maxima()) {
            assert!(max > 0, "axis {axis} can never score");
            assert!(max <= (QUESTION_COUNT as u32) * u32::from(MAX_DELTA));
        }
    }

    #[test]
    fn test_question_id_parse_and_display() {
        let id: QuestionId = "q7".parse().unwrap();
        assert_eq!(id.number(), 7);
        assert_eq!(id.position(), 6);
        assert_eq!(id.to_string(), "q7");
        assert_eq!("Q30".parse::<QuestionId>().map(QuestionId::number), Ok(30));
        assert!("q0".parse::<QuestionId>().is_err());
        assert!("q31".parse::<QuestionId>().is_err());
        assert!("7".parse::<QuestionId>().is_err());
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(" b ".parse::<Choice>(), Ok(Choice::B));
        assert_eq!(Choice::from_index(2), Some(Choice::C));
        assert!("D".parse::<Choice>().is_err());
        assert_eq!(Choice::from_index(3), None);
    }
}
