use crate::domain::model::ChangeSet;
use crate::domain::ports::ConfirmGate;
use std::io::{BufRead, Write};

/// 在終端機詢問 (y/n)
pub struct StdinPrompt {
    question: String,
}

impl StdinPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// 只有 y / yes（不分大小寫）才算同意
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl ConfirmGate for StdinPrompt {
    fn confirm(&self, changes: &ChangeSet) -> bool {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "{} ({} changes) (y/n): ", self.question, changes.len());
        let _ = stdout.flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// --yes 時直接放行
pub struct AutoApprove;

impl ConfirmGate for AutoApprove {
    fn confirm(&self, _changes: &ChangeSet) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_auto_approve() {
        assert!(AutoApprove.confirm(&ChangeSet::new()));
    }
}
