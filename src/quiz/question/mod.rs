use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;


/// Rows with fewer fields than this are dropped.
pub const MIN_FIELD_COUNT: usize = 13;
pub const CHOICE_COUNT: usize = 5;

const EXCLUSION_MARKERS: [&str; 2] = ["除外", "不適切"];

const CATEGORY_COLUMN: usize = 2;
const TEXT_COLUMN: usize = 4;
const FIRST_CHOICE_COLUMN: usize = 5;
const EXCLUSION_COLUMN: usize = 10;
const ANSWER_COLUMN: usize = 11;
const EXPLANATION_COLUMN: usize = 12;

lazy_static! {
    static ref ANSWER_SEPARATOR_REGEX: Regex = Regex::new("[,，]").unwrap();
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Category {
    A,
    B,
}

impl Category {
    fn from_field(field: &str) -> Self {
        match field.trim().to_uppercase().as_ref() {
            "B" => Category::B,
            _ => Category::A,
        }
    }
}

/// Why a data row did not become a question.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    TooShort(usize),
    Excluded,
    MissingText,
    InvalidAnswer(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooShort(count) => write!(
                f,
                "only {} fields, expected at least {}",
                count, MIN_FIELD_COUNT
            ),
            Rejection::Excluded => write!(f, "marked as excluded"),
            Rejection::MissingText => write!(f, "no question text"),
            Rejection::InvalidAnswer(segment) => write!(f, "invalid answer `{}`", segment),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub text: String,
    #[serde(rename = "c")]
    pub choices: [String; CHOICE_COUNT],
    /// 1-based positions in `choices`.
    #[serde(rename = "a")]
    pub answers: Vec<i64>,
    #[serde(rename = "e")]
    pub explanation: String,
    #[serde(rename = "cat")]
    pub category: Category,
}

impl Question {
    pub fn from_record(record: &StringRecord) -> Result<Question, Rejection> {
        if record.len() < MIN_FIELD_COUNT {
            return Err(Rejection::TooShort(record.len()));
        }
        let field = |index: usize| record.get(index).unwrap_or_default();

        let exclusion = field(EXCLUSION_COLUMN);
        if EXCLUSION_MARKERS
            .iter()
            .any(|marker| exclusion.contains(marker))
        {
            return Err(Rejection::Excluded);
        }

        let text = field(TEXT_COLUMN);
        if text.is_empty() {
            return Err(Rejection::MissingText);
        }

        let answers = parse_answers(field(ANSWER_COLUMN))?;
        let choices = [0, 1, 2, 3, 4].map(|offset| field(FIRST_CHOICE_COLUMN + offset).to_owned());

        Ok(Question {
            text: text.to_owned(),
            choices,
            answers,
            explanation: field(EXPLANATION_COLUMN).to_owned(),
            category: Category::from_field(field(CATEGORY_COLUMN)),
        })
    }

    pub fn is_multi(&self) -> bool {
        self.answers.len() > 1
    }
}

/// Reads answers such as `2`, `2, 3`, `"1，4"`, `３` or `3.0`. A blank field has no answers.
pub fn parse_answers(field: &str) -> Result<Vec<i64>, Rejection> {
    let normalized: String = field
        .chars()
        .filter(|c| *c != '"')
        .map(fold_full_width)
        .collect();
    ANSWER_SEPARATOR_REGEX
        .split(normalized.trim())
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_index)
        .collect()
}

fn fold_full_width(c: char) -> char {
    match c {
        '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
        '．' => '.',
        _ => c,
    }
}

fn parse_index(segment: &str) -> Result<i64, Rejection> {
    match segment.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(Rejection::InvalidAnswer(segment.to_owned())),
    }
}
