//! Result envelope and rendering interface of the surrounding system.
//!
//! The copy engine never produces these; they are the shapes its callers
//! report through.

use serde::{Deserialize, Serialize};

/// Tri-state outcome.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum ResponseResult {
    Error = -99,
    Warning = -1,
    #[default]
    Success = 0,
}

impl ResponseResult {
    /// Numeric code of the outcome.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Outcome, message and optional payload.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Response<T> {
    pub result: ResponseResult,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn success(data: T) -> Self {
        Self {
            result: ResponseResult::Success,
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn warning(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            result: ResponseResult::Warning,
            message: message.into(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: ResponseResult::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == ResponseResult::Success
    }
}

/// Renders a named template against a serialisable model.
pub trait TemplateRender {
    fn render<M: Serialize>(&self, template_name: &str, model: &M) -> Response<String>;
}
