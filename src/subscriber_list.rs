use crate::{
    directory_client::{DirectoryClient, RequestOutcome},
    domain::Subscriber,
};

/// The last subscriber collection fetched from the directory, plus the view
/// narrowed down by the admin's search term.
#[derive(Debug, Default)]
pub struct SubscriberList {
    subscribers: Vec<Subscriber>,
    filter: String,
    /// Indexes into `subscribers` matching `filter`.
    visible: Vec<usize>,
    last_error: Option<String>,
}

impl SubscriberList {
    /// Fetch the collection again and keep it if the fetch succeeds.
    pub async fn refresh(&mut self, client: &DirectoryClient) -> RequestOutcome<usize> {
        let outcome = client.list_subscribers().await;
        self.apply_refresh(outcome)
    }

    /// Take in the result of a fetch. A successful fetch replaces the whole
    /// collection; a failed one leaves it untouched and records the error.
    pub fn apply_refresh(
        &mut self,
        outcome: RequestOutcome<Vec<Subscriber>>,
    ) -> RequestOutcome<usize> {
        match outcome {
            Ok(subscribers) => {
                self.subscribers = subscribers;
                self.last_error = None;
                self.recompute_visible();
                Ok(self.subscribers.len())
            }
            Err(e) => {
                self.last_error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Only show subscribers whose email or phone contains `term`,
    /// ignoring case. An empty term shows everyone.
    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_string();
        self.recompute_visible();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn visible(&self) -> impl Iterator<Item = &Subscriber> + '_ {
        self.visible.iter().map(|&index| &self.subscribers[index])
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn recompute_visible(&mut self) {
        let term = self.filter.to_lowercase();
        self.visible = self
            .subscribers
            .iter()
            .enumerate()
            .filter(|(_, subscriber)| term.is_empty() || subscriber.matches_lowercase(&term))
            .map(|(index, _)| index)
            .collect();
    }
}
