//! Debounced registry search for one search box
//!
//! `Idle → Debouncing → Querying → Displaying | Idle`. Every dispatched query
//! gets a new generation; a response is applied only while its generation is
//! the latest and the box is still waiting for it, so slow answers to older
//! queries never overwrite newer ones.

use std::rc::Rc;

use contracts::domain::a002_company::CompanySearchResult;

use crate::shared::http::ApiError;
use crate::shared::observable::Observable;
use crate::shared::timer::{Debouncer, Scheduler};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Querying,
    Displaying(Vec<CompanySearchResult>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub phase: SearchPhase,
    generation: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Idle,
            generation: 0,
        }
    }
}

impl SearchState {
    pub fn results(&self) -> &[CompanySearchResult] {
        match &self.phase {
            SearchPhase::Displaying(results) => results,
            _ => &[],
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, SearchPhase::Displaying(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Querying)
    }
}

/// A query ready to be sent to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

pub struct SearchBox {
    state: Rc<Observable<SearchState>>,
    debouncer: Debouncer,
    min_chars: usize,
    dispatch: Rc<dyn Fn(SearchRequest)>,
}

impl SearchBox {
    /// `dispatch` runs when the debounce delay elapses and must eventually
    /// report back through [`SearchBox::on_results`] or [`SearchBox::on_failure`].
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        delay_ms: u32,
        min_chars: usize,
        dispatch: impl Fn(SearchRequest) + 'static,
    ) -> Self {
        Self {
            state: Rc::new(Observable::new(SearchState::default())),
            debouncer: Debouncer::new(scheduler, delay_ms),
            min_chars,
            dispatch: Rc::new(dispatch),
        }
    }

    pub fn state(&self) -> Rc<Observable<SearchState>> {
        self.state.clone()
    }

    /// Every keystroke restarts the delay; short queries close the box
    pub fn on_input(&self, text: &str) {
        let query = text.trim().to_string();

        if query.chars().count() < self.min_chars {
            self.debouncer.cancel();
            self.state.update(|s| {
                s.query = query;
                s.generation += 1;
                s.phase = SearchPhase::Idle;
            });
            return;
        }

        self.state.update(|s| {
            s.query = query.clone();
            s.phase = SearchPhase::Debouncing;
        });

        let state = self.state.clone();
        let dispatch = self.dispatch.clone();
        self.debouncer.schedule(Box::new(move || {
            let generation = state.update(|s| {
                s.generation += 1;
                s.phase = SearchPhase::Querying;
                s.generation
            });
            log::debug!("Company search #{}: {}", generation, query);
            dispatch(SearchRequest { generation, query });
        }));
    }

    /// Returns whether the results were applied
    pub fn on_results(&self, generation: u64, results: Vec<CompanySearchResult>) -> bool {
        self.state.update(|s| {
            if s.generation != generation || s.phase != SearchPhase::Querying {
                log::debug!(
                    "Dropping company search #{} (current #{})",
                    generation,
                    s.generation
                );
                return false;
            }
            s.phase = if results.is_empty() {
                SearchPhase::Idle
            } else {
                SearchPhase::Displaying(results)
            };
            true
        })
    }

    pub fn on_failure(&self, generation: u64, error: &ApiError) {
        log::error!("Company search #{} failed: {}", generation, error);
        self.state.update(|s| {
            if s.generation == generation && s.phase == SearchPhase::Querying {
                s.phase = SearchPhase::Idle;
            }
        });
    }

    /// Click outside the search wrapper
    pub fn dismiss(&self) {
        if self.state.with(|s| s.phase == SearchPhase::Idle) {
            return;
        }
        self.debouncer.cancel();
        self.state.update(|s| {
            s.generation += 1;
            s.phase = SearchPhase::Idle;
        });
    }

    /// Picks a displayed result and closes the dropdown
    pub fn select(&self, index: usize) -> Option<CompanySearchResult> {
        let picked = self.state.with(|s| s.results().get(index).cloned())?;
        self.state.update(|s| s.phase = SearchPhase::Idle);
        Some(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timer::testing::ManualScheduler;
    use std::cell::RefCell;

    fn company(name: &str, siren: &str) -> CompanySearchResult {
        CompanySearchResult {
            nom_complet: name.to_string(),
            siren: siren.to_string(),
            ..CompanySearchResult::default()
        }
    }

    fn setup() -> (Rc<ManualScheduler>, SearchBox, Rc<RefCell<Vec<SearchRequest>>>) {
        let scheduler = ManualScheduler::new();
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = sent.clone();
        let search = SearchBox::new(scheduler.clone(), 300, 3, move |req| {
            sink.borrow_mut().push(req)
        });
        (scheduler, search, sent)
    }

    #[test]
    fn test_superseded_keystroke_cancels_pending_query() {
        let (scheduler, search, sent) = setup();

        search.on_input("acm");
        scheduler.advance(100);
        search.on_input("acme");
        assert_eq!(search.state().get().phase, SearchPhase::Debouncing);

        scheduler.advance(250);
        assert!(sent.borrow().is_empty());

        scheduler.advance(50);
        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].query, "acme");
        assert!(sent.iter().all(|r| r.query != "acm"));
    }

    #[test]
    fn test_short_query_never_dispatches() {
        let (scheduler, search, sent) = setup();
        search.on_input("ac");
        search.on_input("  ab  ");
        scheduler.advance(1000);
        assert!(sent.borrow().is_empty());
        assert_eq!(search.state().get().phase, SearchPhase::Idle);
    }

    #[test]
    fn test_shortening_query_cancels_timer() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(100);
        search.on_input("ac");
        scheduler.advance(1000);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_results_are_displayed_then_selected() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(300);
        let request = sent.borrow()[0].clone();
        assert!(search.state().get().is_loading());

        assert!(search.on_results(
            request.generation,
            vec![company("ACME", "732829320"), company("ACME 2", "123456789")]
        ));
        assert!(search.state().get().is_open());
        assert_eq!(search.state().get().results().len(), 2);

        let picked = search.select(1).unwrap();
        assert_eq!(picked.nom_complet, "ACME 2");
        assert_eq!(search.state().get().phase, SearchPhase::Idle);
        assert_eq!(search.select(0), None);
    }

    #[test]
    fn test_empty_results_hide_dropdown() {
        let (scheduler, search, sent) = setup();
        search.on_input("zzzz");
        scheduler.advance(300);
        let generation = sent.borrow()[0].generation;
        assert!(search.on_results(generation, Vec::new()));
        assert!(!search.state().get().is_open());
    }

    #[test]
    fn test_out_of_order_response_is_dropped() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(300);
        search.on_input("acme corp");
        scheduler.advance(300);

        let (old, new) = {
            let sent = sent.borrow();
            (sent[0].clone(), sent[1].clone())
        };
        assert!(search.on_results(new.generation, vec![company("ACME CORP", "1")]));
        assert!(!search.on_results(old.generation, vec![company("ACME", "2")]));
        assert_eq!(search.state().get().results()[0].nom_complet, "ACME CORP");
    }

    #[test]
    fn test_response_arriving_while_debouncing_is_dropped() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(300);
        search.on_input("acme s");
        let generation = sent.borrow()[0].generation;
        assert!(!search.on_results(generation, vec![company("ACME", "2")]));
        assert_eq!(search.state().get().phase, SearchPhase::Debouncing);
    }

    #[test]
    fn test_dismiss_collapses_and_ignores_late_answers() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(300);
        search.dismiss();
        assert_eq!(search.state().get().phase, SearchPhase::Idle);

        let generation = sent.borrow()[0].generation;
        assert!(!search.on_results(generation, vec![company("ACME", "2")]));
        assert!(!search.state().get().is_open());
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let (scheduler, search, sent) = setup();
        search.on_input("acme");
        scheduler.advance(300);
        let generation = sent.borrow()[0].generation;
        search.on_failure(generation, &ApiError::Network("offline".to_string()));
        assert_eq!(search.state().get().phase, SearchPhase::Idle);
    }
}
