//! Deterministic keyword responder used whenever the AI relay fails.
//!
//! Rules are scanned in declared order and the first keyword found in the
//! lower-cased input wins, so table order is part of the contract.

use std::sync::LazyLock;

/// Returned when no keyword matches.
pub const DEFAULT_FALLBACK_RESPONSE: &str =
    "I'm running in offline mode right now, but I can still help! Ask me about Daniel's \
     tech stack, his projects like Metropoint or Newsly AI, his experience, his education, \
     or how to get in touch.";

/// A trigger keyword and its canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: String,
    pub response: String,
}

impl KeywordRule {
    pub fn new(keyword: &str, response: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            response: response.to_string(),
        }
    }
}

static PORTFOLIO_RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    let greeting = "Hey there! I'm Daniel's digital twin. Ask me about his projects, his stack, \
                    or what he's like to work with.";
    let stack = "Daniel's core stack: Python, TypeScript and Java / Spring Boot on the backend, \
                 React Native and React / Next.js on the frontend, PostgreSQL for data, and \
                 AWS / Vercel for infrastructure. Lately a lot of AI orchestration with LLM APIs.";
    let metropoint = "Metropoint is a public transit app on the Google Play Store: real-time \
                      routes, schedules and commuter chat, built with React Native on a Java \
                      Spring Boot + PostgreSQL backend.";
    let newsly = "Newsly AI delivers AI-summarized South African tech news over WhatsApp. Python \
                  jobs on AWS EC2 scrape and summarize stories with the OpenAI API and push them \
                  through the WhatsApp Business API.";
    let projects = "Daniel's featured projects are Metropoint, a public transit app, and Newsly \
                    AI, an automated WhatsApp news platform. Ask about either one for details!";
    let experience = "Daniel co-founded LUDA BLACK, a hybrid product studio and software agency, \
                      where he leads engineering. He's also a software engineering intern at \
                      Telkom, building credit-management apps with C# .NET Core and SQL Server.";
    let education = "Daniel holds a BSc in Computer Science & Mathematics from the University \
                     of Johannesburg and is doing his Honours there with a specialization in AI.";
    let contact = "The best way to reach Daniel is by email at dannysoftdev@gmail.com. He's \
                   also on LinkedIn, GitHub, and TikTok as @dannysoftdev.";
    let location = "Daniel is based in Johannesburg, South Africa, and works hybrid.";
    let personal = "Off the keyboard, Daniel makes tech content on TikTok, plays basketball, \
                    enjoys story-mode games, and keeps up with the latest in AI.";
    let character = "Daniel is a business-minded engineer: he cares about architecture and \
                     business logic, not just syntax, and likes shipping things people use.";

    vec![
        KeywordRule::new("hello", greeting),
        KeywordRule::new("howdy", greeting),
        KeywordRule::new("stack", stack),
        KeywordRule::new("tech", stack),
        KeywordRule::new("skill", stack),
        KeywordRule::new("language", stack),
        KeywordRule::new("metropoint", metropoint),
        KeywordRule::new("newsly", newsly),
        KeywordRule::new("project", projects),
        KeywordRule::new("built", projects),
        KeywordRule::new("experience", experience),
        KeywordRule::new("luda", experience),
        KeywordRule::new("telkom", experience),
        KeywordRule::new("job", experience),
        KeywordRule::new("education", education),
        KeywordRule::new("degree", education),
        KeywordRule::new("university", education),
        KeywordRule::new("study", education),
        KeywordRule::new("contact", contact),
        KeywordRule::new("email", contact),
        KeywordRule::new("hire", contact),
        KeywordRule::new("reach him", contact),
        KeywordRule::new("reach out", contact),
        KeywordRule::new("location", location),
        KeywordRule::new("based", location),
        KeywordRule::new("hobb", personal),
        KeywordRule::new("basketball", personal),
        KeywordRule::new("for fun", personal),
        KeywordRule::new("daniel like", character),
        KeywordRule::new("is he like", character),
        KeywordRule::new("what's he like", character),
        KeywordRule::new("personality", character),
    ]
});

/// Pure keyword-table responder.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    rules: Vec<KeywordRule>,
    default_response: String,
}

impl FallbackResponder {
    /// Build from an ordered table.
    ///
    /// Keywords are lower-cased. Rules with a blank keyword or response are
    /// dropped, and a blank default falls back to `DEFAULT_FALLBACK_RESPONSE`,
    /// so `respond` can never return an empty string.
    pub fn new(rules: Vec<KeywordRule>, default_response: &str) -> Self {
        let rules = rules
            .into_iter()
            .filter(|r| !r.keyword.trim().is_empty() && !r.response.trim().is_empty())
            .map(|r| KeywordRule {
                keyword: r.keyword.to_lowercase(),
                response: r.response,
            })
            .collect();

        let default_response = if default_response.trim().is_empty() {
            DEFAULT_FALLBACK_RESPONSE.to_string()
        } else {
            default_response.to_string()
        };

        Self {
            rules,
            default_response,
        }
    }

    /// The built-in table for the portfolio site.
    pub fn portfolio() -> Self {
        Self::new(PORTFOLIO_RULES.clone(), DEFAULT_FALLBACK_RESPONSE)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    /// Canned answer for `user_text`: first matching rule, else the default.
    pub fn respond(&self, user_text: &str) -> String {
        let lowered = user_text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| lowered.contains(&rule.keyword))
            .map(|rule| rule.response.clone())
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(keyword: &str) -> String {
        PORTFOLIO_RULES
            .iter()
            .find(|r| r.keyword == keyword)
            .map(|r| r.response.clone())
            .unwrap()
    }

    #[test]
    fn hello_there_gets_greeting() {
        let responder = FallbackResponder::portfolio();
        assert_eq!(responder.respond("hello there"), response_for("hello"));
    }

    #[test]
    fn stack_matches_case_insensitively() {
        let responder = FallbackResponder::portfolio();
        let answer = responder.respond("So what is in your STACK these days, friend?");
        assert_eq!(answer, response_for("stack"));
        assert_ne!(answer, responder.default_response());
    }

    #[test]
    fn unmatched_input_gets_default() {
        let responder = FallbackResponder::portfolio();
        assert_eq!(
            responder.respond("what's the weather"),
            DEFAULT_FALLBACK_RESPONSE
        );
    }

    #[test]
    fn words_containing_short_triggers_get_default() {
        let responder = FallbackResponder::portfolio();
        for input in [
            "I'd like to know the weather",
            "what does this function return",
            "was there a data breach",
        ] {
            assert_eq!(responder.respond(input), DEFAULT_FALLBACK_RESPONSE, "{input}");
        }
    }

    #[test]
    fn character_and_hobby_questions_still_match() {
        let responder = FallbackResponder::portfolio();
        assert_eq!(
            responder.respond("What's Daniel like?"),
            response_for("daniel like")
        );
        assert_eq!(
            responder.respond("what does he do for fun"),
            response_for("for fun")
        );
        assert_eq!(
            responder.respond("how can I reach him?"),
            response_for("contact")
        );
    }

    #[test]
    fn empty_input_gets_default() {
        let responder = FallbackResponder::portfolio();
        assert_eq!(responder.respond(""), DEFAULT_FALLBACK_RESPONSE);
    }

    #[test]
    fn first_match_wins_by_table_order() {
        let responder = FallbackResponder::new(
            vec![
                KeywordRule::new("alpha", "first"),
                KeywordRule::new("beta", "second"),
            ],
            "none",
        );
        // "beta" appears earlier in the text, but "alpha" is earlier in the table
        assert_eq!(responder.respond("beta then alpha"), "first");
        assert_eq!(responder.respond("only beta"), "second");
    }

    #[test]
    fn respond_is_deterministic() {
        let responder = FallbackResponder::portfolio();
        let text = "Tell me about Metropoint";
        assert_eq!(responder.respond(text), responder.respond(text));
        assert_eq!(responder.respond(text), response_for("metropoint"));
    }

    #[test]
    fn uppercase_keywords_are_normalized() {
        let responder = FallbackResponder::new(vec![KeywordRule::new("RUST", "crab")], "none");
        assert_eq!(responder.respond("do you write rust?"), "crab");
    }

    #[test]
    fn blank_rules_and_default_are_discarded() {
        let responder = FallbackResponder::new(
            vec![KeywordRule::new("", "matches everything"), KeywordRule::new("x", " ")],
            "   ",
        );
        assert!(responder.rules().is_empty());
        assert_eq!(responder.respond("anything x"), DEFAULT_FALLBACK_RESPONSE);
    }

    #[test]
    fn greeting_is_first_rule() {
        assert_eq!(PORTFOLIO_RULES[0].keyword, "hello");
    }

    #[test]
    fn every_response_is_non_empty() {
        let responder = FallbackResponder::portfolio();
        for input in ["", "hello", "stack", "random words", "email me", "zzz"] {
            assert!(!responder.respond(input).trim().is_empty());
        }
    }
}
