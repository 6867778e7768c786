//! Form values read by the operation handlers.
//!
//! A `Form` is a set of string fields keyed by identifier. Handlers read the
//! values at the moment of submission; fields never set read as `""`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::ApiError;

/// Field identifiers.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const USER_ID: &str = "userId";
    pub const NAME: &str = "name";
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const WEBSITE: &str = "website";
    pub const POST_ID: &str = "postId";
    pub const COMMENT_BODY: &str = "commentBody";
    pub const UPDATE_ID: &str = "updateId";
    pub const UPDATE_TITLE: &str = "updateTitle";
    pub const UPDATE_BODY: &str = "updateBody";
    pub const DELETE_ID: &str = "deleteId";
}

#[derive(Debug, Default)]
pub struct Form {
    values: Mutex<BTreeMap<String, String>>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, field: &str, value: impl Into<String>) {
        self.lock().insert(field.to_string(), value.into());
    }

    /// Current value of `field`, or `""` when it was never set.
    pub fn value(&self, field: &str) -> String {
        self.lock().get(field).cloned().unwrap_or_default()
    }

    /// Parses `field` as an integer; surrounding whitespace is ignored.
    pub fn integer(&self, field: &str) -> Result<i64, ApiError> {
        parse_int(field, &self.value(field))
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().values().all(String::is_empty)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map still holds plain strings; keep using it.
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The five forms the handlers read from.
#[derive(Debug, Default)]
pub struct Forms {
    pub post: Form,
    pub user: Form,
    pub comment: Form,
    pub update: Form,
    pub delete: Form,
}

pub fn parse_int(field: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::invalid_integer(field, raw))
}
