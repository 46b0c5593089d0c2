mod loader;
mod model;

pub use loader::{load_documents, AssetSource, Location, CONFIG_DOCUMENT, QUESTIONS_DOCUMENT};
pub use model::{
    AssetPaths, Documents, Names, Question, QuestionBank, QuizConfig, SampleCounts,
    DEFAULT_RECIPIENT,
};
