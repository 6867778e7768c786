//! Runs every operation once against the configured API and prints both
//! sinks, newest first.

use std::sync::Arc;

use crud_core::{
    fields, Action, AutoPrompt, Dispatch, OperationRunner, RunnerConfig, UreqTransport,
};

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = RunnerConfig::from_env();
    log::info!("using API at {}", config.base_url);

    let runner = OperationRunner::new(
        &config,
        Arc::new(UreqTransport::new()),
        Arc::new(AutoPrompt { answer: true }),
    );
    runner.log_info("Application initialized - Ready for CRUD operations!");

    let forms = runner.forms();
    forms.post.set(fields::TITLE, "Test Post");
    forms.post.set(fields::BODY, "This is a test post");
    forms.post.set(fields::USER_ID, "1");

    forms.user.set(fields::NAME, "Test User");
    forms.user.set(fields::USERNAME, "testuser");
    forms.user.set(fields::EMAIL, "test@example.com");

    forms.comment.set(fields::POST_ID, "1");
    forms.comment.set(fields::NAME, "Test Comment");
    forms.comment.set(fields::EMAIL, "test@example.com");
    forms.comment.set(fields::COMMENT_BODY, "This is a test comment");

    forms.update.set(fields::UPDATE_ID, "1");
    forms.delete.set(fields::DELETE_ID, "1");

    let mut failures = 0;
    for action in [
        Action::CreatePost,
        Action::CreateUser,
        Action::CreateComment,
        Action::LoadPost,
    ] {
        failures += report(action, runner.dispatch(action).await);
    }

    forms.update.set(fields::UPDATE_TITLE, "Updated Test Post");
    forms.update.set(fields::UPDATE_BODY, "This post has been updated");
    for action in [Action::UpdatePost, Action::DeletePost] {
        failures += report(action, runner.dispatch(action).await);
    }

    println!("\nNetwork log:");
    for entry in runner.logs().entries() {
        println!("  {:<8} {entry}", entry.category);
    }

    println!("\nResults:");
    for entry in runner.results().entries() {
        println!("  [{}] {} {} - {}", entry.timestamp, entry.method, entry.endpoint, entry.message);
        match serde_json::to_string_pretty(&entry.data) {
            Ok(data) => println!("{data}"),
            Err(e) => log::warn!("could not render result data: {e}"),
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn report(action: Action, dispatch: Dispatch) -> usize {
    match dispatch.outcome() {
        Some(outcome) if outcome.is_success() => {
            log::info!("{action}: ok");
            0
        }
        Some(outcome) => {
            log::error!("{action}: {}", outcome.reason().unwrap_or_default());
            1
        }
        None => {
            log::warn!("{action}: {dispatch:?}");
            0
        }
    }
}
