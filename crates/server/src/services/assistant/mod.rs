//! AI assistant: edit a section from a natural-language instruction.
//!
//! The model is asked to return the updated section as JSON. Its reply is
//! untrusted text, so it is extracted, normalized and merged into the
//! current typed section rather than taken as-is. Nothing the model says can
//! make [`AssistantService::process`] fail; the worst case is an apology and
//! the caller's config handed back untouched.

mod extract;
mod merge;
mod normalize;
mod prompt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;

use webify_core::site::{EditorError, Section, WebsiteConfig};

use crate::claude::{ClaudeError, TextCompletion};
use crate::models::ChatTurn;

pub use extract::extract_json;

/// Reply when no section is being edited.
pub const NO_SECTION_MESSAGE: &str =
    "Please select a section to edit first (navbar, hero, or collection section).";

/// Reply when the model answered without the section config.
pub const NOT_APPLIED_MESSAGE: &str =
    "I processed your request but couldn't apply any changes to the configuration.";

/// Reply for any failure along the way.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Turns kept in the conversation history.
pub const HISTORY_LIMIT: usize = 50;

/// What went wrong while reconciling a reply. Logged, never returned.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("completion failed: {0}")]
    Completion(#[from] ClaudeError),

    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] askama::Error),

    #[error("no JSON object in reply")]
    NoJson,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply JSON is not an object")]
    NotAnObject,

    #[error("unexpected reply shape: {0}")]
    Shape(String),

    #[error("merged config is invalid: {0}")]
    Invalid(#[from] EditorError),
}

/// Chat message plus the updated section, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    #[serde(flatten)]
    pub config: WebsiteConfig,
}

impl AssistantReply {
    fn message_only(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            config: WebsiteConfig::default(),
        }
    }

    /// `message` plus `section` copied unchanged from `config`.
    fn passthrough(message: &str, config: &WebsiteConfig, section: Section) -> Self {
        Self {
            message: message.to_owned(),
            config: only_section(config, section),
        }
    }
}

/// Hero copy generated for a new store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
}

impl HeroContent {
    /// Store name and description, linking to `/about`.
    #[must_use]
    pub fn fallback(store_name: &str, store_description: &str) -> Self {
        Self {
            hero_title: store_name.to_owned(),
            hero_subtitle: store_description.to_owned(),
            cta_text: "Learn More".to_owned(),
            cta_link: "/about".to_owned(),
        }
    }

    fn is_complete(&self) -> bool {
        [&self.hero_title, &self.hero_subtitle, &self.cta_text, &self.cta_link]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Assistant over any [`TextCompletion`] model.
pub struct AssistantService<'a, C> {
    model: &'a C,
}

impl<'a, C: TextCompletion> AssistantService<'a, C> {
    #[must_use]
    pub const fn new(model: &'a C) -> Self {
        Self { model }
    }

    /// Apply `instruction` to the section being edited in `config`.
    ///
    /// The active section is the last one present (navbar, hero,
    /// collection). Only that section is returned.
    #[instrument(skip_all, fields(section))]
    pub async fn process(&self, instruction: &str, config: &WebsiteConfig) -> AssistantReply {
        let Some(section) = config.active_section() else {
            return AssistantReply::message_only(NO_SECTION_MESSAGE);
        };
        tracing::Span::current().record("section", section.as_str());

        match self.reconcile(section, instruction, config).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, section = %section, "Assistant reply could not be applied");
                AssistantReply::passthrough(APOLOGY_MESSAGE, config, section)
            }
        }
    }

    async fn reconcile(
        &self,
        section: Section,
        instruction: &str,
        config: &WebsiteConfig,
    ) -> Result<AssistantReply, ReconcileError> {
        let prompt = prompt::section_prompt(section, instruction, config)?;
        let text = self.model.complete(&prompt).await?;
        let reply = extract::parse_object(&text)?;

        let Some(section_reply) = normalize::key_insensitive(&reply, section.config_key()) else {
            tracing::info!(section = %section, "Assistant reply has no section config");
            return Ok(AssistantReply::passthrough(NOT_APPLIED_MESSAGE, config, section));
        };
        let section_reply = section_reply.as_object().ok_or_else(|| {
            ReconcileError::Shape(format!("{} is not an object", section.config_key()))
        })?;

        let missing = || ReconcileError::Shape(format!("{section} section is missing"));
        let mut updated = WebsiteConfig::default();
        let changes = match section {
            Section::Navbar => {
                let current = config.navbar_config.as_ref().ok_or_else(missing)?;
                let merged = merge::navbar(current, section_reply)?;
                updated.navbar_config = Some(merged.config);
                merged.changes
            }
            Section::Hero => {
                let current = config.hero_config.as_ref().ok_or_else(missing)?;
                let merged = merge::hero(current, section_reply)?;
                updated.hero_config = Some(merged.config);
                merged.changes
            }
            Section::Collection => {
                let current = config.collection_config.as_ref().ok_or_else(missing)?;
                let merged = merge::collection(current, section_reply)?;
                updated.collection_config = Some(merged.config);
                merged.changes
            }
        };

        tracing::info!(section = %section, changes = changes.len(), "Assistant reply applied");

        Ok(AssistantReply {
            message: reply_message(section, model_message(&reply), &changes),
            config: updated,
        })
    }

    /// Ask the model for hero copy; falls back to the store's own text.
    #[instrument(skip_all)]
    pub async fn generate_hero_content(
        &self,
        store_name: &str,
        store_description: &str,
    ) -> HeroContent {
        match self.try_hero_content(store_name, store_description).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, "Hero content generation failed, using fallback");
                HeroContent::fallback(store_name, store_description)
            }
        }
    }

    async fn try_hero_content(
        &self,
        store_name: &str,
        store_description: &str,
    ) -> Result<HeroContent, ReconcileError> {
        let prompt = prompt::hero_content_prompt(store_name, store_description)?;
        let text = self.model.complete(&prompt).await?;
        let reply = extract::parse_object(&text)?;
        let content: HeroContent = serde_json::from_value(Value::Object(reply))?;

        if content.is_complete() {
            Ok(content)
        } else {
            Err(ReconcileError::Shape("incomplete hero content".to_owned()))
        }
    }
}

/// Append one exchange and drop the oldest turns past [`HISTORY_LIMIT`].
pub fn record_exchange(history: &mut Vec<ChatTurn>, instruction: &str, reply: &str) {
    history.push(ChatTurn {
        role: "user".to_owned(),
        content: instruction.to_owned(),
    });
    history.push(ChatTurn {
        role: "assistant".to_owned(),
        content: reply.to_owned(),
    });

    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
}

fn model_message(reply: &Map<String, Value>) -> Option<&str> {
    normalize::text_field(reply, &["message", "Message"]).map(str::trim)
}

fn reply_message(section: Section, model_message: Option<&str>, changes: &[String]) -> String {
    let model_message = model_message.filter(|m| !m.is_empty());

    if changes.is_empty() {
        return model_message.map_or_else(
            || format!("No changes were necessary to the {section}."),
            str::to_owned,
        );
    }

    let changelog = format!(
        "I've updated the {section} configuration. Here are the changes:\n{}",
        changes.join("\n")
    );
    match model_message {
        Some(message) => format!("{message}\n\n{changelog}"),
        None => changelog,
    }
}

fn only_section(config: &WebsiteConfig, section: Section) -> WebsiteConfig {
    let mut out = WebsiteConfig::default();
    match section {
        Section::Navbar => out.navbar_config.clone_from(&config.navbar_config),
        Section::Hero => out.hero_config.clone_from(&config.hero_config),
        Section::Collection => out.collection_config.clone_from(&config.collection_config),
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use webify_core::site::{CollectionConfig, HeroConfig, NavbarConfig};

    use super::*;

    /// Replies with canned text and remembers the prompts it saw.
    struct Canned {
        reply: Result<String, u64>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_owned()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn rate_limited() -> Self {
            Self {
                reply: Err(30),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextCompletion for Canned {
        async fn complete(&self, prompt: &str) -> Result<String, ClaudeError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            self.reply.clone().map_err(ClaudeError::RateLimited)
        }
    }

    fn hero_only() -> WebsiteConfig {
        WebsiteConfig {
            hero_config: Some(HeroConfig::starter()),
            ..WebsiteConfig::default()
        }
    }

    #[tokio::test]
    async fn test_process_without_section() {
        let model = Canned::ok("{}");
        let reply = AssistantService::new(&model)
            .process("make it pop", &WebsiteConfig::default())
            .await;

        assert_eq!(reply.message, NO_SECTION_MESSAGE);
        assert_eq!(reply.config, WebsiteConfig::default());
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_fenced_hero_reply() {
        let model = Canned::ok(
            "Here you go:\n```json\n{\"message\":\"ok\",\"heroConfig\":{\"items\":[\
             {\"type\":\"heading\",\"content\":\"Big Sale\",\"position\":\"left\"}]}}\n```",
        );
        let reply = AssistantService::new(&model).process("change heading", &hero_only()).await;

        let hero = reply.config.hero_config.unwrap();
        assert_eq!(hero.items.len(), 1);
        assert_eq!(hero.items[0].content, "Big Sale");
        assert_eq!(hero.items[0].id, "heading1");
        assert_eq!(reply.message, "ok");
        assert!(reply.config.navbar_config.is_none());
    }

    #[tokio::test]
    async fn test_process_reports_changes_after_model_message() {
        let model = Canned::ok(
            r#"{"message": "Made the navbar dark.", "navbarConfig": {"styles": {"backgroundColor": "black"}}}"#,
        );
        let config = WebsiteConfig {
            navbar_config: Some(NavbarConfig::starter()),
            ..WebsiteConfig::default()
        };
        let reply = AssistantService::new(&model).process("dark navbar", &config).await;

        assert_eq!(
            reply.message,
            "Made the navbar dark.\n\nI've updated the navbar configuration. Here are the changes:\n\
             - Changed navbar style backgroundColor from #ffffff to #000000"
        );
        assert_eq!(
            reply.config.navbar_config.unwrap().styles.background_color,
            "#000000"
        );
    }

    #[tokio::test]
    async fn test_process_uses_last_section_and_keeps_ids() {
        let model = Canned::ok(r#"{"collectionConfig": {"items": [{"id": "col2", "title": "BOOTS"}]}}"#);
        let reply = AssistantService::new(&model)
            .process("rename shoes", &WebsiteConfig::starter())
            .await;

        assert!(reply.config.navbar_config.is_none());
        assert!(reply.config.hero_config.is_none());
        let collection = reply.config.collection_config.unwrap();
        let ids: Vec<_> = collection.item_ids().collect();
        assert_eq!(ids, ["col1", "col2", "col3"]);
        assert_eq!(collection.items[1].title, "BOOTS");
        assert!(reply.message.starts_with("I've updated the collection configuration."));
        assert!(model.prompts.lock().unwrap()[0].contains("\"collectionConfig\""));
    }

    #[tokio::test]
    async fn test_process_missing_section_key() {
        let model = Canned::ok(r#"{"message": "Done!"}"#);
        let config = hero_only();
        let reply = AssistantService::new(&model).process("anything", &config).await;

        assert_eq!(reply.message, NOT_APPLIED_MESSAGE);
        assert_eq!(reply.config, config);
    }

    #[tokio::test]
    async fn test_process_case_insensitive_section_key() {
        let model = Canned::ok(r#"{"HeroConfig": {"styles": {"height": "700px"}}}"#);
        let reply = AssistantService::new(&model).process("taller", &hero_only()).await;

        assert_eq!(reply.config.hero_config.unwrap().styles.height, "700px");
    }

    #[tokio::test]
    async fn test_process_failures_return_original_config() {
        let config = WebsiteConfig {
            collection_config: Some(CollectionConfig::starter()),
            ..WebsiteConfig::default()
        };

        for model in [
            Canned::rate_limited(),
            Canned::ok("no json here"),
            Canned::ok("{\"collectionConfig\": {\"items\": [}"),
            Canned::ok("{\"collectionConfig\": \"nope\"}"),
            Canned::ok("{\"collectionConfig\": {\"styles\": {\"backgroundType\": \"plaid\"}}}"),
        ] {
            let reply = AssistantService::new(&model).process("do it", &config).await;
            assert_eq!(reply.message, APOLOGY_MESSAGE);
            assert_eq!(reply.config, config);
        }
    }

    #[tokio::test]
    async fn test_process_no_changes() {
        let model = Canned::ok(r#"{"heroConfig": {"styles": {"height": "500px"}}}"#);
        let reply = AssistantService::new(&model).process("same", &hero_only()).await;
        assert_eq!(reply.message, "No changes were necessary to the hero.");
    }

    #[tokio::test]
    async fn test_generate_hero_content() {
        let model = Canned::ok(
            r#"{"heroTitle": "Fresh Picks", "heroSubtitle": "Fruit at your door", "ctaText": "Shop", "ctaLink": "/shop"}"#,
        );
        let content = AssistantService::new(&model)
            .generate_hero_content("Orchard Co", "Fruit")
            .await;

        assert_eq!(content.hero_title, "Fresh Picks");
        assert_eq!(content.cta_link, "/shop");
    }

    #[tokio::test]
    async fn test_generate_hero_content_fallback() {
        for model in [
            Canned::rate_limited(),
            Canned::ok(r#"{"heroTitle": "Only a title"}"#),
            Canned::ok(r#"{"heroTitle": "", "heroSubtitle": "s", "ctaText": "c", "ctaLink": "/"}"#),
        ] {
            let content = AssistantService::new(&model)
                .generate_hero_content("Orchard Co", "Fruit")
                .await;
            assert_eq!(content, HeroContent::fallback("Orchard Co", "Fruit"));
        }
    }

    #[test]
    fn test_record_exchange_caps_history() {
        let mut history = Vec::new();
        for i in 0..30 {
            record_exchange(&mut history, &format!("q{i}"), &format!("a{i}"));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].content, "q5");
        assert_eq!(history[0].role, "user");
        assert_eq!(history[HISTORY_LIMIT - 1].content, "a29");
    }

    #[test]
    fn test_reply_serializes_flat() {
        let reply = AssistantReply::passthrough("hi", &hero_only(), Section::Hero);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["message"], "hi");
        assert!(json["heroConfig"]["items"].is_array());
        assert!(json.get("navbarConfig").is_none());
    }
}
