//! Page-level state: the single writer of the result set and loading flag.

use tracing::debug;

use crate::api::{RecommendationApi, RequestError};
use crate::collector::{PreferenceCollector, SubmitOutcome, Submission, ValidationError};
use crate::model::GymResult;

/// Transient state of the page, read by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub gyms: Vec<GymResult>,
    pub loading: bool,
    pub location: String,
}

/// What the results area shows right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel<'a> {
    Loading,
    Results { gyms: &'a [GymResult], location: &'a str },
    Empty,
}

#[derive(Debug, Default)]
pub struct PageComposer {
    state: PageState,
    collector: PreferenceCollector,
}

impl PageComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collector(collector: PreferenceCollector) -> Self {
        Self { state: PageState::default(), collector }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn collector(&self) -> &PreferenceCollector {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut PreferenceCollector {
        &mut self.collector
    }

    pub fn panel(&self) -> Panel<'_> {
        if self.state.loading {
            Panel::Loading
        } else if !self.state.gyms.is_empty() {
            Panel::Results { gyms: &self.state.gyms, location: &self.state.location }
        } else {
            Panel::Empty
        }
    }

    /// Start a submission and raise the loading flag.
    ///
    /// A rejected form leaves the flag as it was, so a request still in
    /// flight keeps showing as loading.
    pub fn begin_search(&mut self) -> Result<Submission, ValidationError> {
        let submission = self.collector.begin_submit()?;
        self.state.loading = true;
        Ok(submission)
    }

    /// Apply a finished submission. Loading ends unless the result was stale.
    pub fn complete_search(
        &mut self,
        submission: Submission,
        result: Result<Vec<GymResult>, RequestError>,
    ) -> SubmitOutcome {
        let state = &mut self.state;
        let outcome = self.collector.finish(submission, result, |location, gyms| {
            state.location = location;
            state.gyms = gyms;
        });

        if outcome != SubmitOutcome::Stale {
            self.state.loading = false;
        } else {
            debug!("stale completion left page state untouched");
        }

        outcome
    }

    pub async fn search<A>(&mut self, api: &A) -> Result<SubmitOutcome, ValidationError>
    where
        A: RecommendationApi + ?Sized,
    {
        let submission = self.begin_search()?;
        let result = submission.send(api).await;
        Ok(self.complete_search(submission, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubApi, gym};

    fn composer_for(location: &str) -> PageComposer {
        let mut page = PageComposer::new();
        page.collector_mut().set_location(location);
        page
    }

    #[test]
    fn starts_empty() {
        let page = PageComposer::new();
        assert_eq!(page.state(), &PageState::default());
        assert_eq!(page.panel(), Panel::Empty);
    }

    #[test]
    fn begin_search_shows_loading() {
        let mut page = composer_for("Austin, TX");
        let _ticket = page.begin_search().unwrap();
        assert!(page.state().loading);
        assert_eq!(page.panel(), Panel::Loading);
    }

    #[test]
    fn validation_failure_does_not_leave_loading_set() {
        let mut page = PageComposer::new();
        assert!(page.begin_search().is_err());
        assert!(!page.state().loading);
    }

    #[test]
    fn rejected_resubmit_keeps_pending_search_loading() {
        let mut page = composer_for("Austin, TX");
        let _pending = page.begin_search().unwrap();

        page.collector_mut().set_location("");
        assert!(page.begin_search().is_err());

        assert!(page.state().loading);
        assert_eq!(page.panel(), Panel::Loading);
    }

    #[tokio::test]
    async fn success_replaces_results_wholesale() {
        let mut page = composer_for("Austin, TX");
        page.search(&StubApi::ok(vec![gym("A", 8.0), gym("B", 7.0), gym("C", 1.0)]))
            .await
            .unwrap();
        assert_eq!(page.state().gyms.len(), 3);

        page.collector_mut().set_location("Dallas, TX");
        page.search(&StubApi::ok(vec![gym("D", 5.0)])).await.unwrap();

        let state = page.state();
        assert!(!state.loading);
        assert_eq!(state.location, "Dallas, TX");
        assert_eq!(state.gyms, vec![gym("D", 5.0)]);
        assert!(matches!(page.panel(), Panel::Results { location: "Dallas, TX", .. }));
    }

    #[tokio::test]
    async fn failure_keeps_previous_results_and_ends_loading() {
        let mut page = composer_for("Austin, TX");
        page.search(&StubApi::ok(vec![gym("A", 8.0)])).await.unwrap();

        page.collector_mut().set_location("Nowhere");
        let outcome = page.search(&StubApi::err(404, Some("Location not found"))).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Failed { message: "Location not found".into() });
        assert!(!page.state().loading);
        assert_eq!(page.state().location, "Austin, TX");
        assert_eq!(page.state().gyms.len(), 1);
        assert_eq!(page.collector().last_error(), Some("Location not found"));
    }

    #[tokio::test]
    async fn stale_completion_is_ignored() {
        let mut page = composer_for("Austin, TX");
        let older = page.begin_search().unwrap();
        let newer = page.begin_search().unwrap();

        let outcome = page.complete_search(older, Ok(vec![gym("Old", 1.0)]));
        assert_eq!(outcome, SubmitOutcome::Stale);
        assert!(page.state().loading);
        assert!(page.state().gyms.is_empty());

        page.complete_search(newer, Ok(vec![gym("New", 9.0)]));
        assert!(!page.state().loading);
        assert_eq!(page.state().gyms[0].gym_name, "New");
    }
}
