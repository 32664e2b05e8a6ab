use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod catalog;
pub mod officer;

pub use catalog::{Catalog, Chapter, Question, QuestionView, Subject, SubjectView};
pub use officer::{Officer, Submission};
pub use test::{Test, TestView};

/// Single-resource response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    pub status: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: "success".to_string(),
        }
    }
}

/// Collection response envelope with element count.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
    pub message: String,
    pub status: String,
}

impl<T: Serialize> ListResponse<T> {
    pub fn success(data: Vec<T>, message: impl Into<String>) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            message: message.into(),
            status: "success".to_string(),
        }
    }
}

/// Query parameters for the get-or-create test endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct TestRequestParams {
    #[serde(rename = "officerID")]
    #[validate(range(min = 1, message = "officerID must be a positive integer"))]
    pub officer_id: i32,
    #[serde(rename = "subjectID")]
    #[validate(range(min = 1, message = "subjectID must be a positive integer"))]
    pub subject_id: i32,
}

/// Query parameters shared by the start and submit endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct TestActionParams {
    #[serde(rename = "officerID")]
    #[validate(range(min = 1, message = "officerID must be a positive integer"))]
    pub officer_id: i32,
    #[serde(rename = "testID")]
    #[validate(range(min = 1, message = "testID must be a positive integer"))]
    pub test_id: i32,
}
