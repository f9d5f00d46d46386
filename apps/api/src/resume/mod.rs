// Resume text extraction.
// Turns an uploaded PDF into the plain resume_text a session config carries.
// Nothing is stored: the extracted text goes straight back to the caller.

pub mod extract;
pub mod handlers;

use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Uploaded file is not a PDF")]
    NotPdf,

    #[error("Could not read the PDF: {0}")]
    Extraction(String),

    #[error("The PDF contains no extractable text")]
    NoText,
}

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::Empty | ResumeError::NotPdf => AppError::Validation(err.to_string()),
            ResumeError::Extraction(_) | ResumeError::NoText => {
                AppError::UnprocessableEntity(err.to_string())
            }
        }
    }
}
