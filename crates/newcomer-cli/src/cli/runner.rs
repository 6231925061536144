use anyhow::{bail, Context, Result};
use newcomer_core::constants::options;
use newcomer_core::controllers::ViewStatus;
use newcomer_core::models::{faq_status_line, Sender, UserPreferences};
use newcomer_core::AssistantSession;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::warn;

/// One invocation's work against a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Ask { question: String },
    Chat,
    Faqs { search: Option<String>, category: Option<String> },
    Presets,
    Events { category: Option<String> },
    Options,
}

/// Values the preference selectors offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceOptions {
    pub visa_statuses: Vec<&'static str>,
    pub interests: Vec<&'static str>,
    pub languages: Vec<&'static str>,
}

impl PreferenceOptions {
    pub fn catalog() -> Self {
        Self {
            visa_statuses: options::VISA_STATUSES.to_vec(),
            interests: options::INTERESTS.to_vec(),
            languages: options::LANGUAGES.to_vec(),
        }
    }
}

/// Preference values given on the command line; each set value replaces
/// the configured one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceOverrides {
    pub visa_status: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub interests: Vec<String>,
}

impl PreferenceOverrides {
    pub fn apply(&self, base: UserPreferences) -> UserPreferences {
        let mut prefs = base;
        if let Some(status) = &self.visa_status {
            prefs = prefs.with_visa_status(status.as_str());
        }
        if let Some(state) = &self.state {
            prefs = prefs.with_state(state.as_str());
        }
        if let Some(country) = &self.country {
            prefs = prefs.with_country(country.as_str());
        }
        if let Some(language) = &self.language {
            prefs = prefs.with_language(language.as_str());
        }
        if !self.interests.is_empty() {
            prefs.interests = self.interests.iter().cloned().collect();
        }
        prefs
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

async fn wait(handle: Option<JoinHandle<bool>>) -> Result<()> {
    if let Some(handle) = handle {
        handle.await.context("Request task failed")?;
    }
    Ok(())
}

/// The newest bot reply in the transcript
fn last_reply(session: &AssistantSession) -> Option<String> {
    session
        .chat()
        .transcript()
        .messages()
        .iter()
        .rev()
        .find(|m| m.sender == Sender::Bot)
        .map(|m| m.text.clone())
}

/// Send one question and print the reply. Returns false when the send
/// failed (the reply is then the apology).
async fn ask(session: &AssistantSession, question: &str) -> Result<bool> {
    let Some(handle) = session.send_chat(question) else {
        return Ok(true);
    };
    wait(Some(handle)).await?;

    if let Some(reply) = last_reply(session) {
        println!("{}", reply);
    }
    let chat = session.chat();
    match chat.current_view().status {
        ViewStatus::Error => {
            if let Some(banner) = chat.transcript().error_banner() {
                eprintln!("Error: {}", banner);
            }
            Ok(false)
        }
        _ => Ok(true),
    }
}

/// Execute a command. Must run inside a `LocalSet`.
pub async fn run_command(session: &AssistantSession, command: CliCommand, pretty: bool) -> Result<()> {
    match command {
        CliCommand::Ask { question } => {
            if question.trim().is_empty() {
                bail!("Question must not be empty");
            }
            if !ask(session, &question).await? {
                bail!("The assistant could not answer");
            }
        }

        CliCommand::Chat => {
            eprintln!("Type a question and press Enter. Ctrl-D to quit.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("Failed to read input")? {
                session.chat_mut().transcript_mut().set_input(line);
                if session.chat().transcript().input().trim().is_empty() {
                    continue;
                }
                let question = session.chat().transcript().input().to_string();
                ask(session, &question).await?;
            }
        }

        CliCommand::Faqs { search, category } => {
            wait(session.retry_faqs()).await?;
            let prefs = session.preferences();
            eprintln!("{}", faq_status_line(&prefs.visa_status, &prefs.language_preference));

            let mut faqs = session.faqs_mut();
            faqs.set_search_term(search.unwrap_or_default());
            faqs.select_category(category.unwrap_or_default());
            if let Some(message) = &faqs.current_view().error_message {
                bail!("Error fetching FAQs: {}", message);
            }
            print_json(&faqs.visible_faqs(), pretty)?;
        }

        CliCommand::Presets => {
            wait(session.retry_presets()).await?;
            let presets = session.presets();
            if let Some(message) = &presets.current_view().error_message {
                warn!("Showing fallback preset question: {}", message);
            }
            print_json(&presets.questions(), pretty)?;
        }

        CliCommand::Events { category } => {
            wait(session.retry_events()).await?;
            let mut events = session.events_mut();
            events.select_category(category);
            if let Some(message) = &events.current_view().error_message {
                warn!("Showing sample events: {}", message);
            }
            print_json(&events.visible_events(), pretty)?;
        }

        CliCommand::Options => print_json(&PreferenceOptions::catalog(), pretty)?,
    }

    Ok(())
}
