//! Non-interactive subcommands.
//!
//! `add` shares the task-input mini-language and duration grammar with
//! the create-task modal; `login`/`logout` manage the credential file.

use crate::api::{CreateTask, Jats, LogTime, TaskPatch, TaskStatus};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::duration::{format_minutes, parse_duration};
use crate::utils::task_input::parse_task_input;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

/// Flags accepted by `jats add`, layered over the inline mini-language.
/// An explicit flag wins over its inline counterpart.
///
#[derive(Debug, Default)]
pub struct AddOptions {
    pub complete: bool,
    pub time: Option<String>,
    pub priority: Option<String>,
    pub date: Option<String>,
}

/// Create a task from the command line, optionally logging time and
/// resolving it in the same run.
///
pub async fn add(config: &Config, words: &[String], options: AddOptions) -> AppResult<()> {
    let mut parsed = parse_task_input(&words.join(" "));
    if options.complete {
        parsed.flags.complete = true;
    }
    if options.time.is_some() {
        parsed.flags.time = options.time;
    }
    if options.priority.is_some() {
        parsed.flags.priority = options.priority;
    }
    if options.date.is_some() {
        parsed.flags.date = options.date;
    }

    if parsed.name.is_empty() {
        return Err(AppError::Validation("task name cannot be empty".to_string()));
    }
    // Validate the duration before anything is created.
    let minutes = match &parsed.flags.time {
        Some(raw) => Some(parse_duration(raw)?),
        None => None,
    };

    let api = Jats::new(config)?;
    let task = api
        .create_task(&CreateTask {
            name: parsed.name,
            priority: parsed.flags.priority,
            tags: parsed.tags,
            date: parsed.flags.date.clone(),
        })
        .await?;
    println!("Created task #{}: {}", task.id, task.name);

    if let Some(minutes) = minutes {
        api.log_time(
            task.id,
            &LogTime {
                duration: minutes,
                description: None,
                date: parsed.flags.date,
            },
        )
        .await?;
        println!("Logged {}", format_minutes(minutes));
    }
    if parsed.flags.complete {
        api.update_task(task.id, &TaskPatch::status(TaskStatus::Resolved))
            .await?;
        println!("Marked resolved");
    }
    Ok(())
}

/// Authenticate against the server and persist the session token.
/// Credentials not supplied by the caller are prompted for, the
/// password without echo.
///
pub async fn login(
    mut config: Config,
    config_path: Option<&Path>,
    username: Option<String>,
    password: Option<String>,
) -> AppResult<()> {
    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let api = Jats::new(&config)?;
    let token = api.login(&username, &password).await?;

    config.username = Some(username.clone());
    config.token = Some(token);
    config.save(config_path)?;
    info!("credentials saved");
    println!("Logged in as {}", username);
    Ok(())
}

/// Drop the stored session token.
///
pub async fn logout(mut config: Config, config_path: Option<&Path>) -> AppResult<()> {
    if config.token.is_none() {
        println!("Not logged in");
        return Ok(());
    }
    config.token = None;
    config.save(config_path)?;
    println!("Logged out");
    Ok(())
}

fn prompt(label: &str) -> AppResult<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn login_persists_username_and_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/v1/auth/login")
                    .json_body(json!({ "username": "admin", "password": "hunter2" }));
                then.status(200)
                    .header("Set-Cookie", "session_token=abc; Path=/; HttpOnly")
                    .json_body(json!({ "success": true, "data": null, "message": "" }));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jats.toml");
        let config = Config {
            server_url: server.base_url(),
            ..Config::default()
        };

        login(
            config,
            Some(&path),
            Some("admin".to_string()),
            Some("hunter2".to_string()),
        )
        .await
        .unwrap();

        let saved = Config::load(Some(&path)).unwrap();
        assert_eq!(saved.username.as_deref(), Some("admin"));
        assert_eq!(saved.token.as_deref(), Some("abc"));
        assert_eq!(saved.server_url, server.base_url());
    }

    #[tokio::test]
    async fn logout_clears_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jats.toml");
        let config = Config {
            server_url: "http://tracker:9000".to_string(),
            username: Some("admin".to_string()),
            token: Some("abc".to_string()),
        };
        config.save(Some(&path)).unwrap();

        logout(Config::load(Some(&path)).unwrap(), Some(&path))
            .await
            .unwrap();

        let saved = Config::load(Some(&path)).unwrap();
        assert_eq!(saved.token, None);
        assert_eq!(saved.username.as_deref(), Some("admin"));
    }
}
