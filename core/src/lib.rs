//! CRUD operation runner for a JSONPlaceholder-style REST API.
//!
//! # Overview
//! Each user action (create post/user/comment, load a post for editing,
//! update a post, delete a post) becomes exactly one HTTP call. The reply is
//! classified as success or failure and reflected into two bounded,
//! newest-first sinks: a network log and a results panel.
//!
//! # Design
//! - `ApiClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. No I/O happens there.
//! - `Transport` is the only I/O seam; `UreqTransport` is the real one and
//!   tests substitute scripted implementations.
//! - `OperationRunner` owns the sinks, forms and triggers, and exposes one
//!   async handler per action plus a `dispatch` table keyed by `Action`.

pub mod client;
pub mod config;
pub mod control;
pub mod error;
pub mod form;
pub mod http;
pub mod runner;
pub mod sink;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::{RunnerConfig, API_BASE};
pub use control::{AutoPrompt, Trigger, UserPrompt};
pub use error::ApiError;
pub use form::{fields, Form, Forms};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use runner::{Action, Dispatch, OperationOutcome, OperationRunner};
pub use sink::{LogCategory, LogEntry, LogSink, ResultEntry, ResultSink};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateComment, CreatePost, CreateUser, PostDraft, UpdatePost};
