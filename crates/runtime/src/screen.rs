//! The top-level switch between the two screens.

use std::str::FromStr;

use anyhow::bail;

/// Which screen a presentation surface is showing. The two share no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    ChatBot,
    Admin,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::ChatBot, Screen::Admin];

    pub fn slug(&self) -> &'static str {
        match self {
            Screen::ChatBot => "chatbot",
            Screen::Admin => "admin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::ChatBot => "ChatBot",
            Screen::Admin => "Admin Dashboard",
        }
    }
}

impl FromStr for Screen {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "chatbot" | "chat" => Ok(Screen::ChatBot),
            "admin" | "dashboard" => Ok(Screen::Admin),
            other => bail!("unknown screen: {other}"),
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatbot_is_the_landing_screen() {
        assert_eq!(Screen::default(), Screen::ChatBot);
    }

    #[test]
    fn parses_slugs_and_aliases() {
        assert_eq!("admin".parse::<Screen>().ok(), Some(Screen::Admin));
        assert_eq!(" Chat ".parse::<Screen>().ok(), Some(Screen::ChatBot));
        assert!("settings".parse::<Screen>().is_err());
    }
}
