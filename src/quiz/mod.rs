use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

pub mod question;


pub use question::Question;

use crate::settings::Settings;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SOURCE_SUFFIX: &str = ".csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no quiz file found in {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QuizDataset {
    pub single: Vec<Question>,
    pub multi: Vec<Question>,
}

impl QuizDataset {
    pub fn open(source: &Path) -> Result<QuizDataset, LoadError> {
        let contents = fs::read(source).map_err(|e| LoadError::Io {
            path: source.to_owned(),
            source: e,
        })?;
        let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(&contents);
        QuizDataset::parse(contents).map_err(|e| LoadError::Decode {
            path: source.to_owned(),
            source: e,
        })
    }

    /// Parses UTF-8 CSV whose first row is a header.
    pub fn parse<R: io::Read>(reader: R) -> Result<QuizDataset, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        csv_reader.headers()?;

        let mut dataset = QuizDataset::default();
        let mut rejected = 0;
        for record in csv_reader.records() {
            let record = record?;
            match Question::from_record(&record) {
                Ok(question) => dataset.push(question),
                Err(rejection) => {
                    rejected += 1;
                    let line = record.position().map(|p| p.line());
                    debug!(?line, "skipping quiz row: {}", rejection);
                }
            }
        }

        debug!(
            single = dataset.single.len(),
            multi = dataset.multi.len(),
            rejected,
            "parsed quiz"
        );
        Ok(dataset)
    }

    fn push(&mut self, question: Question) {
        if question.is_multi() {
            self.multi.push(question);
        } else {
            self.single.push(question);
        }
    }
}

/// Picks the configured quiz file, or else the first `.csv` file in the data
/// directory by name.
pub fn locate_source(settings: &Settings) -> Result<PathBuf, LoadError> {
    let preferred = settings.quiz_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    let not_found = || LoadError::NotFound(settings.data_dir.clone());
    let entries = fs::read_dir(&settings.data_dir).map_err(|_| not_found())?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_source_file(path))
        .collect();
    candidates.sort();

    let fallback = candidates.into_iter().next().ok_or_else(not_found)?;
    info!(
        "{} does not exist, using {} instead",
        preferred.display(),
        fallback.display()
    );
    Ok(fallback)
}

fn is_source_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(SOURCE_SUFFIX))
}

/// Reads the current quiz. Failures are logged and produce an empty dataset.
pub fn load(settings: &Settings) -> QuizDataset {
    let result = locate_source(settings).and_then(|source| {
        debug!("loading quiz from {}", source.display());
        QuizDataset::open(&source)
    });
    match result {
        Ok(dataset) => dataset,
        Err(e @ LoadError::NotFound(_)) => {
            info!("{}", e);
            QuizDataset::default()
        }
        Err(e) => {
            error!("{}", e);
            QuizDataset::default()
        }
    }
}
