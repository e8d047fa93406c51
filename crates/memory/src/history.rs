//! Bounded per-student conversation history.

use advisor_core::{ConversationTurn, Intent};

pub const DEFAULT_HISTORY_CAP: usize = 10;
pub const DEFAULT_CONTEXT_CHARS: usize = 200;
const SUMMARY_TURNS: usize = 5;

/// FIFO-bounded turn buffer for a single student. Once the cap is
/// reached every insertion evicts the oldest turn.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
    cap: usize,
    context_chars: usize,
}

impl ConversationMemory {
    pub fn new(cap: usize, context_chars: usize) -> Self {
        Self {
            turns: Vec::new(),
            cap,
            context_chars,
        }
    }

    pub fn from_turns(turns: Vec<ConversationTurn>, cap: usize, context_chars: usize) -> Self {
        let mut memory = Self::new(cap, context_chars);
        for turn in turns {
            memory.push(turn);
        }
        memory
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if self.turns.len() > self.cap {
            self.turns.remove(0);
        }
    }

    pub fn record(&mut self, question: &str, answer: &str, intent: Intent) {
        self.push(ConversationTurn::new(question, answer, intent));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Last `n` turns as prompt context. Answers are truncated so one
    /// verbose reply cannot crowd out the rest of the prompt.
    pub fn recent_context(&self, n: usize) -> String {
        let start = self.turns.len().saturating_sub(n);
        self.turns[start..]
            .iter()
            .map(|turn| {
                format!(
                    "질문: {}\n답변: {}",
                    turn.question,
                    truncate_chars(&turn.answer, self.context_chars)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Numbered digest of the last five questions, newest last.
    pub fn summary(&self) -> String {
        if self.turns.is_empty() {
            return "이전 대화 없음".to_string();
        }
        let start = self.turns.len().saturating_sub(SUMMARY_TURNS);
        self.turns[start..]
            .iter()
            .enumerate()
            .map(|(i, turn)| format!("{}. [{}] {}", i + 1, turn.intent, turn.question))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP, DEFAULT_CONTEXT_CHARS)
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: usize) -> ConversationTurn {
        ConversationTurn::new(format!("질문 {n}"), format!("답변 {n}"), Intent::General)
    }

    #[test]
    fn eleventh_turn_evicts_the_first() {
        let mut memory = ConversationMemory::default();
        for n in 1..=11 {
            memory.push(turn(n));
        }
        assert_eq!(memory.len(), 10);
        assert_eq!(memory.turns()[0].question, "질문 2");
        assert_eq!(memory.turns()[9].question, "질문 11");
    }

    #[test]
    fn recent_context_takes_the_tail() {
        let mut memory = ConversationMemory::default();
        for n in 1..=4 {
            memory.push(turn(n));
        }
        let context = memory.recent_context(2);
        assert!(!context.contains("질문 2"));
        assert!(context.contains("질문 3"));
        assert!(context.contains("질문 4"));
    }

    #[test]
    fn long_answers_are_truncated_in_context() {
        let mut memory = ConversationMemory::new(10, 200);
        let long = "가".repeat(500);
        memory.record("질문", &long, Intent::Course);
        let context = memory.recent_context(1);
        assert!(context.contains(&format!("{}...", "가".repeat(200))));
        assert!(!context.contains(&"가".repeat(201)));
    }

    #[test]
    fn summary_covers_last_five() {
        let mut memory = ConversationMemory::default();
        for n in 1..=7 {
            memory.push(turn(n));
        }
        let summary = memory.summary();
        assert!(summary.starts_with("1. [general] 질문 3"));
        assert!(summary.contains("5. [general] 질문 7"));
        assert!(!summary.contains("질문 2"));
    }

    #[test]
    fn empty_summary_placeholder() {
        assert_eq!(ConversationMemory::default().summary(), "이전 대화 없음");
    }
}
