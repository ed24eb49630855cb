//! Rule-based reply resolution.

pub const SENT_REPLY: &str = "Excellent! Your contribution has been successfully recorded. Thank you for your promptness 🎉";
pub const BALANCE_REPLY: &str = "Your current contribution for this cycle is KES 1,000. The group's total stands at KES 50,000.";
pub const GREETING_REPLY: &str = "Hello there! I'm your ChamaPay reminder bot. How can I assist you with your contributions?";
pub const HELP_REPLY: &str = "I can help you with reminders and basic information. Try asking about your 'balance' or confirm 'sent' payment. For complex issues, please contact your Chama administrator.";
pub const FALLBACK_REPLY: &str = "I am here to assist with your Chama contributions. You can reply \"Sent\" to confirm payment or ask about your \"Balance\".";

/// A reply chosen when the lowercased input contains any of `keywords`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl KeywordRule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Rules in precedence order; the first match wins.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["sent"],
        reply: SENT_REPLY,
    },
    KeywordRule {
        keywords: &["balance"],
        reply: BALANCE_REPLY,
    },
    KeywordRule {
        keywords: &["hello", "hi"],
        reply: GREETING_REPLY,
    },
    KeywordRule {
        keywords: &["help", "support"],
        reply: HELP_REPLY,
    },
];

/// Maps user text to the bot's reply.
///
/// `None` means "stay silent"; the keyword resolver never returns it.
pub trait ReplyResolver: Send + Sync {
    fn resolve(&self, input: &str) -> Option<String>;
}

/// Case-insensitive substring matcher over an ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordResolver {
    rules: &'static [KeywordRule],
    fallback: &'static str,
}

impl KeywordResolver {
    pub const fn new(rules: &'static [KeywordRule], fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }
}

impl Default for KeywordResolver {
    fn default() -> Self {
        Self::new(KEYWORD_RULES, FALLBACK_REPLY)
    }
}

impl ReplyResolver for KeywordResolver {
    fn resolve(&self, input: &str) -> Option<String> {
        let lowered = input.to_lowercase();
        let reply = self
            .rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.fallback, |rule| rule.reply);
        Some(reply.to_string())
    }
}

/// Resolve `input` with the default keyword rules.
///
/// ```
/// use chamapay_chats::resolve;
/// use chamapay_chats::services::reply_service::SENT_REPLY;
///
/// assert_eq!(resolve("I SENT it").as_deref(), Some(SENT_REPLY));
/// ```
pub fn resolve(input: &str) -> Option<String> {
    KeywordResolver::default().resolve(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sent_matches_regardless_of_case() {
        for input in ["SENT", "I sent it", "sent"] {
            assert_eq!(resolve(input).as_deref(), Some(SENT_REPLY), "input: {input}");
        }
    }

    #[test]
    fn sent_takes_precedence_over_balance() {
        assert_eq!(
            resolve("I sent it, what's my balance?").as_deref(),
            Some(SENT_REPLY)
        );
    }

    #[test]
    fn balance_reply_is_fixed() {
        assert_eq!(resolve("Balance please").as_deref(), Some(BALANCE_REPLY));
    }

    #[test]
    fn greetings_match_hello_and_hi() {
        assert_eq!(resolve("Hello").as_deref(), Some(GREETING_REPLY));
        assert_eq!(resolve("hi there").as_deref(), Some(GREETING_REPLY));
    }

    #[test]
    fn hi_matches_as_a_plain_substring() {
        // "this" contains "hi", which outranks "help".
        assert_eq!(resolve("this needs help").as_deref(), Some(GREETING_REPLY));
    }

    #[test]
    fn help_and_support_share_a_reply() {
        assert_eq!(resolve("HELP").as_deref(), Some(HELP_REPLY));
        assert_eq!(resolve("need support").as_deref(), Some(HELP_REPLY));
    }

    #[test]
    fn unmatched_text_gets_the_fallback() {
        assert_eq!(resolve("xyz123").as_deref(), Some(FALLBACK_REPLY));
    }

    #[test]
    fn custom_rule_tables_are_respected() {
        const RULES: &[KeywordRule] = &[KeywordRule {
            keywords: &["loan"],
            reply: "Loans open next cycle.",
        }];
        let resolver = KeywordResolver::new(RULES, "fallback");

        assert_eq!(resolver.resolve("LOAN?").as_deref(), Some("Loans open next cycle."));
        assert_eq!(resolver.resolve("sent").as_deref(), Some("fallback"));
    }
}
