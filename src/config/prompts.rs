//! Prompt templates for Moviewhiz.
//!
//! Prompts can be customized by placing a `chain.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub chain: ChainPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the conversational retrieval chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainPrompts {
    /// Rewrites a follow-up into a standalone question.
    pub condense: String,
    /// System prompt for answering; receives the retrieved movies as {{context}}.
    pub system: String,
    /// User message for answering.
    pub user: String,
}

impl Default for ChainPrompts {
    fn default() -> Self {
        Self {
            condense: r#"Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question, in its original language.

Chat History:
{{chat_history}}
Follow Up Input: {{question}}
Standalone question:"#
                .to_string(),

            system: r#"You are Moviewhiz, a friendly assistant that helps people choose which movie to watch.

Use the following movies to answer the user's question. If you don't know the answer, just say that you don't know, don't try to make up an answer.
When you recommend a title, phrase it as "You might enjoy the movie <title>." so it can be looked up.

{{context}}"#
                .to_string(),

            user: "{{question}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let chain_path = custom_path.join("chain.toml");
            if chain_path.exists() {
                let content = std::fs::read_to_string(&chain_path)?;
                prompts.chain = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.chain.condense.contains("{{chat_history}}"));
        assert!(prompts.chain.system.contains("{{context}}"));
        assert!(prompts.chain.user.contains("{{question}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_provided_variables_override_custom() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("mood".to_string(), "cozy".to_string());
        prompts
            .variables
            .insert("question".to_string(), "ignored".to_string());

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Any thrillers?".to_string());

        let rendered = prompts.render_with_custom("{{mood}}: {{question}}", &vars);
        assert_eq!(rendered, "cozy: Any thrillers?");
    }

    #[test]
    fn test_load_custom_chain_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("chain.toml"),
            "system = \"Only talk about noir. {{context}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.chain.system, "Only talk about noir. {{context}}");
        assert_eq!(prompts.chain.user, ChainPrompts::default().user);
    }
}
