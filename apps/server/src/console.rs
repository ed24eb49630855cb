//! Interactive console that drives both screens from stdin.

use std::sync::Arc;

use anyhow::Context;
use chamapay_chats::{ChatEvent, ConversationController};
use chamapay_roster::{Member, MemberId};
use chamapay_runtime::{BackendServices, Screen};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Switch(Screen),
    Toggle(MemberId),
    Members,
    Report,
    Help,
    Quit,
    /// Plain text for the chatbot
    Say(String),
    Invalid(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(ConsoleCommand::Say(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();

        let parsed = match (command, argument) {
            ("/chat" | "/c", None) => ConsoleCommand::Switch(Screen::ChatBot),
            ("/admin" | "/a", None) => ConsoleCommand::Switch(Screen::Admin),
            ("/toggle" | "/t", Some(id)) => match id.parse() {
                Ok(id) => ConsoleCommand::Toggle(id),
                Err(_) => ConsoleCommand::Invalid(format!("not a member id: {id}")),
            },
            ("/toggle" | "/t", None) => ConsoleCommand::Invalid("usage: /toggle <id>".to_string()),
            ("/members" | "/m", None) => ConsoleCommand::Members,
            ("/report" | "/r", None) => ConsoleCommand::Report,
            ("/help" | "/h", None) => ConsoleCommand::Help,
            ("/quit" | "/exit" | "/q", None) => ConsoleCommand::Quit,
            _ => ConsoleCommand::Invalid(format!("unknown command: {line}")),
        };

        Some(parsed)
    }
}

/// The chat screen while it is showing: its controller plus the task that
/// prints what the bot says.
struct ChatScreen {
    controller: Arc<ConversationController>,
    printer: JoinHandle<()>,
}

pub struct Console {
    services: BackendServices,
    screen: Screen,
    chat: Option<ChatScreen>,
}

impl Console {
    pub fn new(services: BackendServices) -> Self {
        Self {
            services,
            screen: Screen::default(),
            chat: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        println!("ChamaPay Interactive Console");
        println!("Type '/help' for commands, '/quit' to exit");
        println!("---");

        self.show(Screen::default()).await;

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                break; // EOF
            }

            let Some(command) = ConsoleCommand::parse(&line) else {
                continue;
            };
            if !self.handle(command).await? {
                break;
            }
        }

        self.leave_chat().await;
        println!("Goodbye!");
        Ok(())
    }

    /// Returns `false` once the console should exit.
    async fn handle(&mut self, command: ConsoleCommand) -> anyhow::Result<bool> {
        match command {
            ConsoleCommand::Quit => return Ok(false),
            ConsoleCommand::Help => print_help(),
            ConsoleCommand::Switch(screen) => self.show(screen).await,
            ConsoleCommand::Say(text) => match (&self.screen, &self.chat) {
                (Screen::ChatBot, Some(chat)) => {
                    if let Some(pending) = chat.controller.submit(&text).await {
                        println!("you: {}", pending.user_entry().text());
                    }
                }
                _ => println!("Switch to the chat screen with /chat to talk to the bot"),
            },
            ConsoleCommand::Toggle(id) => {
                if self.screen != Screen::Admin {
                    println!("Toggling is only available on the admin screen (/admin)");
                } else {
                    let mut roster = self.services.roster.lock().await;
                    match roster.toggle(id) {
                        Some(member) => println!(
                            "{} is now {}",
                            member.name,
                            member.status().label()
                        ),
                        None => println!("No member with id {id}"),
                    }
                }
            }
            ConsoleCommand::Members => {
                let members = self.services.roster.lock().await.list_members();
                print_members(&members);
            }
            ConsoleCommand::Report => {
                let path = write_report(&self.services, None).await?;
                println!("Report written to {path}");
            }
            ConsoleCommand::Invalid(message) => {
                println!("{message}");
                println!("Type '/help' for available commands");
            }
        }

        Ok(true)
    }

    async fn show(&mut self, screen: Screen) {
        if screen == self.screen && (screen == Screen::Admin || self.chat.is_some()) {
            println!("Already on {screen}");
            return;
        }

        self.leave_chat().await;
        self.screen = screen;
        println!("=== {screen} ===");

        match screen {
            Screen::ChatBot => self.enter_chat().await,
            Screen::Admin => {
                let members = self.services.roster.lock().await.list_members();
                print_members(&members);
            }
        }
    }

    async fn enter_chat(&mut self) {
        let controller = self.services.sessions.open().await;
        for entry in controller.entries().await {
            println!("{}: {}", entry.origin(), entry.text());
        }

        let mut events = controller.subscribe();
        let printer = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                match event {
                    ChatEvent::EntryAppended { entry, .. } if entry.is_bot() => {
                        println!("bot: {}", entry.text());
                    }
                    ChatEvent::SessionClosed { .. } => break,
                    _ => {}
                }
            }
        });

        self.chat = Some(ChatScreen {
            controller,
            printer,
        });
    }

    async fn leave_chat(&mut self) {
        let Some(chat) = self.chat.take() else {
            return;
        };

        match self.services.sessions.close(&chat.controller.id()).await {
            Ok(cancelled) => debug!(cancelled, "chat screen left"),
            Err(error) => debug!(%error, "chat screen already closed"),
        }
        chat.printer.abort();
    }
}

/// Export the current roster to `output`, or to the configured file name in
/// the working directory. Returns the path written.
pub async fn write_report(
    services: &BackendServices,
    output: Option<String>,
) -> anyhow::Result<String> {
    let members = services.roster.lock().await.list_members();
    let report = services
        .exporter
        .export(&members, chrono::Local::now().date_naive());

    let path = output.unwrap_or_else(|| report.text_file_name());
    tokio::fs::write(&path, report.render_text())
        .await
        .with_context(|| format!("failed to write report to {path}"))?;

    info!(%path, pages = report.page_count(), "report saved");
    Ok(path)
}

fn print_members(members: &[Member]) {
    println!("{:<4} {:<12} {:<10} Action", "ID", "Name", "Status");
    println!("{}", "-".repeat(42));
    for member in members {
        let status = member.status();
        println!(
            "{:<4} {:<12} {:<10} {}",
            member.id,
            member.name,
            status.label(),
            status.toggle_action()
        );
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /chat, /c          - Show the chatbot screen (fresh conversation)");
    println!("  /admin, /a         - Show the admin dashboard");
    println!("  /toggle <id>, /t   - Flip a member's payment status (admin)");
    println!("  /members, /m       - List members");
    println!("  /report, /r        - Save the contribution report");
    println!("  /help, /h          - Show this help");
    println!("  /quit, /exit, /q   - Exit console");
    println!("Anything else is sent to the chatbot.");
}

#[cfg(test)]
mod tests {
    use chamapay_config::AppConfig;

    use super::*;

    #[test]
    fn plain_text_goes_to_the_chatbot() {
        assert_eq!(
            ConsoleCommand::parse("  I sent it \n"),
            Some(ConsoleCommand::Say("I sent it".to_string()))
        );
        assert_eq!(ConsoleCommand::parse("   \n"), None);
    }

    #[test]
    fn screen_switches_and_toggles_parse() {
        assert_eq!(
            ConsoleCommand::parse("/admin"),
            Some(ConsoleCommand::Switch(Screen::Admin))
        );
        assert_eq!(
            ConsoleCommand::parse("/chat"),
            Some(ConsoleCommand::Switch(Screen::ChatBot))
        );
        assert_eq!(ConsoleCommand::parse("/toggle 4"), Some(ConsoleCommand::Toggle(4)));
        assert!(matches!(
            ConsoleCommand::parse("/toggle four"),
            Some(ConsoleCommand::Invalid(_))
        ));
        assert!(matches!(
            ConsoleCommand::parse("/dance"),
            Some(ConsoleCommand::Invalid(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_chat_screen_cancels_its_reply_and_returning_starts_fresh(
    ) -> anyhow::Result<()> {
        let services = BackendServices::initialise(&AppConfig::default())?;
        let mut console = Console::new(services.clone());
        console.show(Screen::ChatBot).await;

        let first = Arc::clone(&console.chat.as_ref().expect("chat screen").controller);
        assert!(console.handle(ConsoleCommand::Say("hello".to_string())).await?);
        assert_eq!(first.len().await, 3);

        console.handle(ConsoleCommand::Switch(Screen::Admin)).await?;
        assert!(services.sessions.is_empty().await);
        assert!(console.chat.is_none());

        tokio::time::sleep(services.config.chat.reply_delay() * 2).await;
        assert_eq!(first.len().await, 3);

        console.handle(ConsoleCommand::Switch(Screen::ChatBot)).await?;
        let second = Arc::clone(&console.chat.as_ref().expect("chat screen").controller);
        assert_ne!(second.id(), first.id());
        assert_eq!(second.len().await, 2);
        assert_eq!(services.sessions.len().await, 1);

        let before = services.roster.lock().await.list_members();
        console.handle(ConsoleCommand::Toggle(2)).await?;
        assert_eq!(services.roster.lock().await.list_members(), before);

        console.handle(ConsoleCommand::Switch(Screen::Admin)).await?;
        console.handle(ConsoleCommand::Toggle(2)).await?;
        let roster = services.roster.lock().await;
        assert_ne!(
            roster.get(2).map(|member| member.contributed),
            before.iter().find(|member| member.id == 2).map(|member| member.contributed)
        );
        drop(roster);

        assert!(!console.handle(ConsoleCommand::Quit).await?);
        Ok(())
    }
}
