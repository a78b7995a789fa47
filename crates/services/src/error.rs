use thiserror::Error;

use quiz_core::model::QuestionId;
use quiz_core::session::SessionError;
use storage::repository::StorageError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no question with id {0}")]
    NotFound(QuestionId),
}
