//! 定型応答の文面とプール
//!
//! リモート呼び出しを伴わない固定文言をここに集約する。プールからの抽選は
//! usecase 側で RandomSource を使って行う。

pub const EMPTY_INPUT: &str = "Please provide text or image input.";

pub const RESET_ACK: &str = "Neural memory reset. Chat cleared ✅";

pub const HELP: &str = "Available features:\n/intro, /clear, /functions, /video [topic], /vid [topic], /joke, /quote, /tip, /image [query], /img [query], /tictactoe, /guessnumber, open [app]";

pub const JOKES: [&str; 3] = [
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "Real programmers count from 0.",
    "How many programmers does it take to change a light bulb? None, it's a hardware problem.",
];

pub const QUOTES: [&str; 3] = [
    "The best way to predict the future is to invent it. - Alan Kay",
    "Intelligence is the ability to adapt to change. - Stephen Hawking",
    "The advance of technology is based on making it fit in. - Bill Gates",
];

pub const TIPS: [&str; 3] = [
    "Learn to use a debugger early.",
    "Keep your functions small and focused.",
    "Automate repetitive tasks with scripts.",
];

pub const INTRO: &str = "# Welcome to **AXON AI**\n\nI'm delighted to introduce myself as your digital companion. I'm here to provide you with in-depth knowledge, expert insights, and personalized assistance across various domains.\n\n### Popular areas of interest:\n*   **Science & Tech**: AI, Space, and Biotech.\n*   **Art & Culture**: History, Music, and Art.\n*   **Performance**: Productivity and Skills.\n\nHow can I help you today?";

pub const GREETING: &str =
    "Hello! I am **AXON AI**, your digital companion. How can I assist you today? 🧠✨";

pub const STATUS: &str = "My neural circuits are functioning at peak efficiency! Powering through trillions of operations per second to provide you with the best experience. How can I assist you today?";

pub const THANKS: &str = "You're very welcome! It's my pleasure to assist. Is there anything else you'd like to dive into?";

pub const FAREWELL: &str =
    "Goodbye! My systems will remain in standby until your next request. Stay curious! 🚀";

pub const VIDEO_GUIDANCE: &str = "Please specify a topic. Example: /vid Python loops";

pub const IMAGE_GUIDANCE: &str =
    "Please specify a subject for the visual scan. Example: /img Neon cyberpunk city";

pub const SECURITY_DENIAL: &str = "Access Denied: Security protocol active.";

pub const INVALID_TICTACTOE_MOVE: &str =
    "⚠️ Invalid move. Please choose an empty slot from **1 to 9**.";

pub const TICTACTOE_START: &str = "🤖 **Neural Challenge Accepted!** Let's play Tic-Tac-Toe!";

pub const GUESS_NUMBER_START: &str =
    "🎯 I'm thinking of a number between **1 and 100**. Can you guess it?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_non_empty() {
        assert!(!JOKES.is_empty());
        assert!(!QUOTES.is_empty());
        assert!(!TIPS.is_empty());
    }

    #[test]
    fn test_help_lists_all_commands() {
        for cmd in [
            "/intro",
            "/clear",
            "/functions",
            "/video",
            "/joke",
            "/quote",
            "/tip",
            "/image",
            "/tictactoe",
            "/guessnumber",
            "open [app]",
        ] {
            assert!(HELP.contains(cmd), "help is missing {}", cmd);
        }
    }
}
