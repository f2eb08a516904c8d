use clap::Parser;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_QUIZ_FILE: &str = "quiz_data.csv";
const DEFAULT_DIR: &str = ".";

#[derive(Clone, Debug, Parser)]
#[command(name = "quiz-api", version, about = "Serves a spreadsheet-exported quiz over HTTP")]
pub struct Settings {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Quiz CSV, relative to the data directory
    #[arg(long, env = "QUIZ_FILE", default_value = DEFAULT_QUIZ_FILE)]
    pub quiz_file: PathBuf,

    /// Directory searched for the quiz CSV
    #[arg(long, env = "QUIZ_DATA_DIR", default_value = DEFAULT_DIR)]
    pub data_dir: PathBuf,

    /// Directory containing index.html
    #[arg(long, env = "QUIZ_STATIC_DIR", default_value = DEFAULT_DIR)]
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            quiz_file: PathBuf::from(DEFAULT_QUIZ_FILE),
            data_dir: PathBuf::from(DEFAULT_DIR),
            static_dir: PathBuf::from(DEFAULT_DIR),
        }
    }
}

impl Settings {
    pub fn quiz_path(&self) -> PathBuf {
        self.data_dir.join(&self.quiz_file)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
