#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

/// Figures reported by the server alongside a completed session. Older
/// servers omit them, so everything is optional.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub questions_count: Option<u32>,
    pub processing_time_secs: Option<f64>,
}

impl CompletionSummary {
    pub fn describe(&self) -> Option<String> {
        match (self.questions_count, self.processing_time_secs) {
            (Some(count), Some(secs)) => {
                return Some(format!("Generated {count} questions in {secs:.1} seconds."));
            }
            (Some(count), None) => {
                return Some(format!("Generated {count} questions."));
            }
            _ => return None,
        }
    }
}

/// Server-side processing state for a session. Anything the server reports
/// that is not completed or error counts as still pending.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingStatus {
    Pending,
    Completed(CompletionSummary),
    Error(Option<String>),
}

/// Where the user is sent once processing finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Review { session_id: String },
    Quiz { session_id: String },
}

impl Destination {
    /// The review flag is sampled when processing completes, not when the
    /// workflow was submitted.
    pub fn for_completion(session_id: &str, review_enabled: bool) -> Destination {
        if review_enabled {
            return Destination::Review {
                session_id: session_id.to_string(),
            };
        }

        return Destination::Quiz {
            session_id: session_id.to_string(),
        };
    }

    pub fn path(&self) -> String {
        match self {
            Destination::Review { session_id } => return format!("/review/{session_id}"),
            Destination::Quiz { session_id } => return format!("/quiz/{session_id}"),
        }
    }

    pub fn url(&self, server_url: &str) -> String {
        return format!("{}{}", server_url.trim_end_matches('/'), self.path());
    }
}
