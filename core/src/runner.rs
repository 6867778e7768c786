//! The operation runner: one handler per user action.
//!
//! # Design
//! Every handler follows the same lifecycle. It engages the action's trigger,
//! reads its form, logs the intent, issues exactly one request through the
//! `Transport`, and classifies the reply. The outcome is then reflected into
//! the log and result sinks. The trigger guard is dropped on every path, so
//! loading state always ends with the operation.
//!
//! Handlers take `&self`; several may be in flight at once and only meet at
//! the sinks and forms, whose updates are individually atomic.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{info, warn};
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::config::RunnerConfig;
use crate::control::{Triggers, UserPrompt};
use crate::error::ApiError;
use crate::form::{fields, parse_int, Forms};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::sink::{LogCategory, LogSink, ResultEntry, ResultSink};
use crate::transport::Transport;
use crate::types::{CreateComment, CreatePost, CreateUser, PostDraft, UpdatePost};

/// Classified result of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    Success { http_status: u16, body: Value },
    Failure { reason: String },
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            OperationOutcome::Failure { reason } => Some(reason),
            OperationOutcome::Success { .. } => None,
        }
    }
}

/// What happened when an action was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Completed(OperationOutcome),
    /// The user declined the confirmation; nothing was logged or sent.
    Declined,
    /// The trigger was still busy with an earlier call.
    Ignored,
}

impl Dispatch {
    pub fn outcome(&self) -> Option<&OperationOutcome> {
        match self {
            Dispatch::Completed(outcome) => Some(outcome),
            Dispatch::Declined | Dispatch::Ignored => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreatePost,
    CreateUser,
    CreateComment,
    LoadPost,
    UpdatePost,
    DeletePost,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::CreatePost,
        Action::CreateUser,
        Action::CreateComment,
        Action::LoadPost,
        Action::UpdatePost,
        Action::DeletePost,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Action::CreatePost => "create-post",
            Action::CreateUser => "create-user",
            Action::CreateComment => "create-comment",
            Action::LoadPost => "load-post",
            Action::UpdatePost => "update-post",
            Action::DeletePost => "delete-post",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// User-facing texts for one operation.
struct Wording {
    success_message: &'static str,
    failure_log: &'static str,
    failure_message: &'static str,
}

const CREATE_POST: Wording = Wording {
    success_message: "Post created successfully!",
    failure_log: "Error creating post",
    failure_message: "Failed to create post",
};

const CREATE_USER: Wording = Wording {
    success_message: "User created successfully!",
    failure_log: "Error creating user",
    failure_message: "Failed to create user",
};

const CREATE_COMMENT: Wording = Wording {
    success_message: "Comment added successfully!",
    failure_log: "Error adding comment",
    failure_message: "Failed to add comment",
};

const UPDATE_POST: Wording = Wording {
    success_message: "Post updated successfully!",
    failure_log: "Error updating post",
    failure_message: "Failed to update post",
};

const DELETE_POST: Wording = Wording {
    success_message: "Post deleted successfully!",
    failure_log: "Error deleting post",
    failure_message: "Failed to delete post",
};

struct Reply {
    status: u16,
    body: Value,
}

pub struct OperationRunner {
    client: ApiClient,
    transport: Arc<dyn Transport>,
    prompt: Arc<dyn UserPrompt>,
    logs: LogSink,
    results: ResultSink,
    forms: Forms,
    triggers: Triggers,
}

impl OperationRunner {
    pub fn new(config: &RunnerConfig, transport: Arc<dyn Transport>, prompt: Arc<dyn UserPrompt>) -> Self {
        Self {
            client: ApiClient::new(&config.base_url),
            transport,
            prompt,
            logs: LogSink::default(),
            results: ResultSink::default(),
            forms: Forms::default(),
            triggers: Triggers::default(),
        }
    }

    pub fn logs(&self) -> &LogSink {
        &self.logs
    }

    pub fn results(&self) -> &ResultSink {
        &self.results
    }

    pub fn forms(&self) -> &Forms {
        &self.forms
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    pub fn log_info(&self, text: impl Into<String>) {
        self.logs.push(LogCategory::Info, text);
    }

    /// Empties both sinks.
    pub fn clear(&self) {
        self.logs.clear();
        self.results.clear();
    }

    pub async fn dispatch(&self, action: Action) -> Dispatch {
        match action {
            Action::CreatePost => self.create_post().await,
            Action::CreateUser => self.create_user().await,
            Action::CreateComment => self.create_comment().await,
            Action::LoadPost => self.load_post().await,
            Action::UpdatePost => self.update_post().await,
            Action::DeletePost => self.delete_post().await,
        }
    }

    pub async fn create_post(&self) -> Dispatch {
        let Some(_loading) = self.triggers.create_post.engage() else {
            return Dispatch::Ignored;
        };
        let result = self.submit_post().await;
        let outcome = self.conclude(HttpMethod::Post, "/posts", result, &CREATE_POST, |body| {
            format!("Post created successfully (ID: {})", id_of(body))
        });
        if outcome.is_success() {
            self.forms.post.reset();
        }
        Dispatch::Completed(outcome)
    }

    pub async fn create_user(&self) -> Dispatch {
        let Some(_loading) = self.triggers.create_user.engage() else {
            return Dispatch::Ignored;
        };
        let result = self.submit_user().await;
        let outcome = self.conclude(HttpMethod::Post, "/users", result, &CREATE_USER, |body| {
            format!("User created successfully (ID: {})", id_of(body))
        });
        if outcome.is_success() {
            self.forms.user.reset();
        }
        Dispatch::Completed(outcome)
    }

    pub async fn create_comment(&self) -> Dispatch {
        let Some(_loading) = self.triggers.create_comment.engage() else {
            return Dispatch::Ignored;
        };
        let result = self.submit_comment().await;
        let outcome = self.conclude(HttpMethod::Post, "/comments", result, &CREATE_COMMENT, |body| {
            format!("Comment added successfully (ID: {})", id_of(body))
        });
        if outcome.is_success() {
            self.forms.comment.reset();
        }
        Dispatch::Completed(outcome)
    }

    /// Fetches a post into the update form. Only the log sink is touched;
    /// failures additionally raise an alert.
    pub async fn load_post(&self) -> Dispatch {
        let Some(_loading) = self.triggers.load_post.engage() else {
            return Dispatch::Ignored;
        };
        let raw_id = self.forms.update.value(fields::UPDATE_ID).trim().to_string();

        let outcome = match self.fetch_post(&raw_id).await {
            Ok((reply, draft)) => {
                self.forms.update.set(fields::UPDATE_TITLE, draft.title);
                self.forms.update.set(fields::UPDATE_BODY, draft.body);
                let text = format!("Post {raw_id} loaded for editing");
                info!("{text}");
                self.logs.push(LogCategory::Response, text);
                OperationOutcome::Success {
                    http_status: reply.status,
                    body: reply.body,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!("loading post {raw_id} failed: {reason}");
                self.logs.push(LogCategory::Error, format!("Error loading post: {reason}"));
                self.prompt.alert(&format!("Could not load post {raw_id}: {reason}"));
                OperationOutcome::Failure { reason }
            }
        };
        Dispatch::Completed(outcome)
    }

    pub async fn update_post(&self) -> Dispatch {
        let Some(_loading) = self.triggers.update_post.engage() else {
            return Dispatch::Ignored;
        };
        let raw_id = self.forms.update.value(fields::UPDATE_ID).trim().to_string();
        let endpoint = format!("/posts/{raw_id}");
        let result = self.submit_update(&raw_id).await;
        let outcome = self.conclude(HttpMethod::Put, &endpoint, result, &UPDATE_POST, |_| {
            format!("Post {raw_id} updated successfully")
        });
        Dispatch::Completed(outcome)
    }

    /// Asks for confirmation first; declining has no side effects at all.
    pub async fn delete_post(&self) -> Dispatch {
        if self.triggers.delete_post.is_busy() {
            return Dispatch::Ignored;
        }
        let raw_id = self.forms.delete.value(fields::DELETE_ID).trim().to_string();
        if !self
            .prompt
            .confirm(&format!("Are you sure you want to delete post {raw_id}?"))
        {
            return Dispatch::Declined;
        }
        let Some(_loading) = self.triggers.delete_post.engage() else {
            return Dispatch::Ignored;
        };
        let endpoint = format!("/posts/{raw_id}");
        let result = self.submit_delete(&raw_id).await;
        let outcome = self.conclude(HttpMethod::Delete, &endpoint, result, &DELETE_POST, |_| {
            format!("Post {raw_id} deleted successfully")
        });
        Dispatch::Completed(outcome)
    }

    async fn submit_post(&self) -> Result<Reply, ApiError> {
        let form = &self.forms.post;
        let input = CreatePost {
            title: form.value(fields::TITLE),
            body: form.value(fields::BODY),
            user_id: form.integer(fields::USER_ID)?,
        };
        self.logs
            .push(LogCategory::Request, format!("Creating new post: \"{}\"", input.title));
        let response = self.send(self.client.build_create_post(&input)?).await?;
        let status = response.status;
        let body = self.client.parse_created(response)?;
        Ok(Reply { status, body })
    }

    async fn submit_user(&self) -> Result<Reply, ApiError> {
        let form = &self.forms.user;
        let input = CreateUser {
            name: form.value(fields::NAME),
            username: form.value(fields::USERNAME),
            email: form.value(fields::EMAIL),
            phone: form.value(fields::PHONE),
            website: form.value(fields::WEBSITE),
        };
        self.logs
            .push(LogCategory::Request, format!("Creating new user: \"{}\"", input.name));
        let response = self.send(self.client.build_create_user(&input)?).await?;
        let status = response.status;
        let body = self.client.parse_created(response)?;
        Ok(Reply { status, body })
    }

    async fn submit_comment(&self) -> Result<Reply, ApiError> {
        let form = &self.forms.comment;
        let input = CreateComment {
            post_id: form.integer(fields::POST_ID)?,
            name: form.value(fields::NAME),
            email: form.value(fields::EMAIL),
            body: form.value(fields::COMMENT_BODY),
        };
        self.logs
            .push(LogCategory::Request, format!("Adding comment to post {}", input.post_id));
        let response = self.send(self.client.build_create_comment(&input)?).await?;
        let status = response.status;
        let body = self.client.parse_created(response)?;
        Ok(Reply { status, body })
    }

    async fn fetch_post(&self, raw_id: &str) -> Result<(Reply, PostDraft), ApiError> {
        let id = parse_int(fields::UPDATE_ID, raw_id)?;
        self.logs
            .push(LogCategory::Request, format!("Loading post {raw_id} for update"));
        let response = self.send(self.client.build_get_post(id)).await?;
        let status = response.status;
        let (body, draft) = self.client.parse_get_post(response)?;
        Ok((Reply { status, body }, draft))
    }

    async fn submit_update(&self, raw_id: &str) -> Result<Reply, ApiError> {
        let form = &self.forms.update;
        let id = parse_int(fields::UPDATE_ID, raw_id)?;
        let input = UpdatePost::new(id, form.value(fields::UPDATE_TITLE), form.value(fields::UPDATE_BODY));
        self.logs.push(LogCategory::Request, format!("Updating post {raw_id}"));
        let response = self.send(self.client.build_update_post(id, &input)?).await?;
        let status = response.status;
        let body = self.client.parse_update_post(response)?;
        Ok(Reply { status, body })
    }

    async fn submit_delete(&self, raw_id: &str) -> Result<Reply, ApiError> {
        let id = parse_int(fields::DELETE_ID, raw_id)?;
        self.logs.push(LogCategory::Request, format!("Deleting post {raw_id}"));
        let response = self.send(self.client.build_delete_post(id)).await?;
        let status = response.status;
        self.client.parse_delete_post(response)?;
        Ok(Reply {
            status,
            body: json!({ "deleted": true, "id": raw_id }),
        })
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request).await
    }

    /// Reflects a classified result into both sinks.
    fn conclude(
        &self,
        method: HttpMethod,
        endpoint: &str,
        result: Result<Reply, ApiError>,
        wording: &Wording,
        success_log: impl FnOnce(&Value) -> String,
    ) -> OperationOutcome {
        match result {
            Ok(reply) => {
                let text = success_log(&reply.body);
                info!("{method} {endpoint}: {text}");
                self.logs.push(LogCategory::Response, text);
                self.results.push(ResultEntry::success(
                    method,
                    endpoint,
                    reply.body.clone(),
                    wording.success_message,
                ));
                OperationOutcome::Success {
                    http_status: reply.status,
                    body: reply.body,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!("{method} {endpoint} failed: {reason}");
                self.logs
                    .push(LogCategory::Error, format!("{}: {reason}", wording.failure_log));
                self.results.push(ResultEntry::failure(
                    method,
                    endpoint,
                    &reason,
                    wording.failure_message,
                ));
                OperationOutcome::Failure { reason }
            }
        }
    }
}

fn id_of(body: &Value) -> String {
    match body.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(id) => id.to_string(),
        None => "unknown".to_string(),
    }
}
