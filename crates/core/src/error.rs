use thiserror::Error;

use crate::catalog::NotFound;
use crate::document::ValidationError;
use crate::model::{IdError, QuizQuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Quiz(#[from] QuizQuestionError),
}
