//! Fetch lifecycle of one widget.
//!
//! Every fetch gets a [`Ticket`]. Only the newest ticket may update the widget:
//! a response for parameters the user has since changed is dropped.

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    /// A fetch is in flight; the previous data stays on screen meanwhile.
    Loading { previous: Option<T> },
    Ready(T),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetFeed<P, T> {
    params: Option<P>,
    generation: u64,
    state: FetchState<T>,
}

impl<P, T> Default for WidgetFeed<P, T> {
    fn default() -> Self {
        Self { params: None, generation: 0, state: FetchState::Idle }
    }
}

impl<P: Clone, T> WidgetFeed<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Generation of the newest ticket; changes whenever a fetch starts.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    /// Data to display: the latest result, or the one kept while reloading.
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Ready(data) => Some(data),
            FetchState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a fetch for `params`, superseding any fetch still in flight.
    pub fn begin(&mut self, params: P) -> Ticket {
        self.generation += 1;
        self.params = Some(params);
        let previous = match std::mem::replace(&mut self.state, FetchState::Idle) {
            FetchState::Ready(data) => Some(data),
            FetchState::Loading { previous } => previous,
            _ => None,
        };
        self.state = FetchState::Loading { previous };
        Ticket { generation: self.generation }
    }

    /// Re-issues a fetch for the last parameters. `None` if nothing was ever fetched.
    pub fn retry(&mut self) -> Option<(Ticket, P)> {
        let params = self.params.clone()?;
        tracing::debug!(generation = self.generation + 1, "Manual retry");
        Some((self.begin(params.clone()), params))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a fetch result if `ticket` is still the newest one.
    pub fn resolve<E: Into<EngineError>>(&mut self, ticket: Ticket, result: Result<T, E>) -> Resolution {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale response"
            );
            return Resolution::Stale;
        }
        self.state = match result {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err.into().user_message()),
        };
        Resolution::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedError;

    type Feed = WidgetFeed<&'static str, Vec<u32>>;

    #[test]
    fn test_newest_ticket_wins() {
        let mut feed = Feed::new();
        let first = feed.begin("24h");
        let second = feed.begin("7d");
        assert_eq!(feed.resolve(second, Ok::<_, EngineError>(vec![7])), Resolution::Applied);
        assert_eq!(feed.resolve(first, Ok::<_, EngineError>(vec![24])), Resolution::Stale);
        assert_eq!(feed.data(), Some(&vec![7]));
        assert_eq!(feed.params(), Some(&"7d"));
        assert_eq!(feed.generation(), second.generation());
    }

    #[test]
    fn test_stale_error_does_not_clobber_data() {
        let mut feed = Feed::new();
        let old = feed.begin("1h");
        let new = feed.begin("30d");
        feed.resolve(new, Ok::<_, EngineError>(vec![1, 2]));
        assert_eq!(feed.resolve(old, Err(FeedError::from_response(500, ""))), Resolution::Stale);
        assert_eq!(feed.state(), &FetchState::Ready(vec![1, 2]));
    }

    #[test]
    fn test_loading_keeps_previous_data() {
        let mut feed = Feed::new();
        let t = feed.begin("1h");
        feed.resolve(t, Ok::<_, EngineError>(vec![3]));
        feed.begin("24h");
        assert!(feed.is_loading());
        assert_eq!(feed.data(), Some(&vec![3]));
    }

    #[test]
    fn test_failure_and_manual_retry() {
        let mut feed = Feed::new();
        assert!(feed.retry().is_none());

        let t = feed.begin("24h");
        feed.resolve(t, Err(FeedError::from_response(404, r#"{"error":"Introuvable"}"#)));
        assert_eq!(feed.error(), Some("Introuvable"));

        let (ticket, params) = feed.retry().unwrap();
        assert_eq!(params, "24h");
        assert!(feed.is_current(ticket));
        assert!(feed.is_loading());
        feed.resolve(ticket, Ok::<_, EngineError>(vec![9]));
        assert_eq!(feed.data(), Some(&vec![9]));
    }

    #[test]
    fn test_missing_pair_is_reported_verbatim() {
        let mut feed = Feed::new();
        let t = feed.begin("24h");
        feed.resolve(t, Err(EngineError::MissingPair("DOGE".to_string())));
        assert_eq!(feed.error(), Some("Paire introuvable pour DOGE"));
    }
}
