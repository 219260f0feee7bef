//! Slash-command descriptors and their locally derived categories.

use serde::{Deserialize, Serialize};

/// Category badge shown on a command card.
///
/// The API does not send categories; they come from [`CommandCategory::for_name`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum CommandCategory {
    /// Server configuration
    Admin,
    /// Lookups about the game state
    Information,
    /// Tools and trackers
    Utility,
    /// Community and support commands
    General,
}

impl CommandCategory {
    /// Derive the category from a command name.
    ///
    /// Matching is case-insensitive. Unknown commands are treated as utilities.
    ///
    /// # Examples
    ///
    /// ```
    /// use garden_core::CommandCategory;
    ///
    /// assert_eq!(CommandCategory::for_name("config"), CommandCategory::Admin);
    /// assert_eq!(CommandCategory::for_name("Last-Seen"), CommandCategory::Information);
    /// assert_eq!(CommandCategory::for_name("brand-new"), CommandCategory::Utility);
    /// ```
    pub fn for_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "config" => CommandCategory::Admin,
            "info" | "last-seen" | "future-stock" => CommandCategory::Information,
            "calculator" | "restocks" | "weather" => CommandCategory::Utility,
            "vote" | "feedback" | "donate" => CommandCategory::General,
            _ => CommandCategory::Utility,
        }
    }
}

/// Body of `GET /api/commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsResponse {
    /// Commands registered by the bot
    pub commands: Vec<RawCommand>,
}

/// A command as the API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    /// Command name without the leading slash
    pub name: String,
    /// One-line description
    #[serde(default)]
    pub description: String,
}

/// A command ready for display and caching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name without the leading slash
    pub name: String,
    /// One-line description
    pub description: String,
    /// Derived category
    pub category: CommandCategory,
}

impl CommandDescriptor {
    /// Build a descriptor, deriving its category from the name.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let category = CommandCategory::for_name(&name);
        Self {
            name,
            description: description.into(),
            category,
        }
    }

    /// Name as typed in Discord, e.g. `/weather`.
    pub fn slash_name(&self) -> String {
        format!("/{}", self.name)
    }
}

impl From<RawCommand> for CommandDescriptor {
    fn from(raw: RawCommand) -> Self {
        Self::new(raw.name, raw.description)
    }
}

impl From<CommandsResponse> for Vec<CommandDescriptor> {
    fn from(response: CommandsResponse) -> Self {
        response
            .commands
            .into_iter()
            .map(CommandDescriptor::from)
            .collect()
    }
}

/// Command list shown when the API is unreachable and nothing is cached.
pub fn default_commands() -> Vec<CommandDescriptor> {
    [
        ("config", "Configure notification channels and roles for this server"),
        ("info", "Show information about the bot"),
        ("last-seen", "See when an item was last in stock"),
        ("future-stock", "Predict upcoming shop restocks"),
        ("calculator", "Calculate crop values and mutations"),
        ("restocks", "Show the current shop restock timers"),
        ("weather", "Show the current and upcoming weather events"),
        ("vote", "Vote for the bot and unlock rewards"),
        ("feedback", "Send feedback to the developers"),
        ("donate", "Support the bot's hosting costs"),
    ]
    .into_iter()
    .map(|(name, description)| CommandDescriptor::new(name, description))
    .collect()
}
