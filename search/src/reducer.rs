//! Search reducer.
//!
//! # Flow
//!
//! 1. `SetQueryText` stores the text and (re)starts the debounce timer, a
//!    `Delay` registered under [`DEBOUNCE_ID`]. Scheduling under the same id
//!    aborts the previous timer, so at most one is ever live.
//! 2. When the timer fires it dispatches `RunQuery`, which bumps the epoch and
//!    calls the provider.
//! 3. `QueryCompleted` is applied only if its epoch is still current. Results
//!    are therefore applied in the order queries started, not the order they
//!    finished.
//!
//! Superseded queries are not aborted; their completions are dropped.

use crate::actions::SearchAction;
use crate::config::SearchConfig;
use crate::environment::{QueryProvider, SearchEnvironment, SearchEvent, SearchListener};
use crate::item::Item;
use crate::selection::Selection;
use crate::state::{SearchPhase, SearchState};
use cinelog_core::effect::{Effect, EffectId};
use cinelog_core::reducer::Reducer;
use cinelog_core::{async_effect, debounce, smallvec, SmallVec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Cancellation id of the debounce timer.
pub const DEBOUNCE_ID: EffectId = EffectId::new("search-debounce");

/// Search reducer.
///
/// Generic over the provider and listener so the environment can hold them
/// without boxing.
pub struct SearchReducer<P, L> {
    config: Arc<SearchConfig>,
    _phantom: PhantomData<fn() -> (P, L)>,
}

impl<P, L> SearchReducer<P, L> {
    /// Create a reducer for `config`.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: Arc::new(config),
            _phantom: PhantomData,
        }
    }

    /// The configuration this reducer was built with.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn truncate(&self, mut items: Vec<Item>) -> Vec<Item> {
        items.truncate(self.config.max_results);
        items
    }
}

impl<P, L> Clone for SearchReducer<P, L> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            _phantom: PhantomData,
        }
    }
}

impl<P, L> std::fmt::Debug for SearchReducer<P, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchReducer")
            .field("config", &self.config)
            .finish()
    }
}

impl<P, L> Reducer for SearchReducer<P, L>
where
    P: QueryProvider,
    L: SearchListener,
{
    type State = SearchState;
    type Action = SearchAction;
    type Environment = SearchEnvironment<P, L>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SetQueryText: echo, then debounce or reset
            // ═══════════════════════════════════════════════════════════════
            SearchAction::SetQueryText { text } => {
                state.query_text.clone_from(&text);
                env.emit(SearchEvent::Changed(text.clone()));

                if text.is_empty() {
                    state.results.clear();
                    state.is_open = false;
                    state.phase = SearchPhase::Idle;
                    state.invalidate();
                    tracing::debug!(epoch = state.epoch, "Query text emptied");
                    return smallvec![Effect::Cancel(DEBOUNCE_ID)];
                }

                state.is_open = true;
                state.phase = SearchPhase::Debouncing;
                tracing::trace!(debounce_ms = ?self.config.debounce, "Scheduling query");

                smallvec![debounce! {
                    id: DEBOUNCE_ID,
                    duration: self.config.debounce,
                    action: SearchAction::RunQuery { text }
                }]
            },

            // ═══════════════════════════════════════════════════════════════
            // RunQuery: fired by the debounce timer
            // ═══════════════════════════════════════════════════════════════
            SearchAction::RunQuery { text } => {
                let epoch = state.invalidate();
                state.phase = SearchPhase::Loading;
                tracing::debug!(epoch, "Running query");
                metrics::counter!("search.queries.started").increment(1);

                let provider = Arc::clone(&env.provider);
                smallvec![async_effect! {
                    let outcome = provider.query(&text).await;
                    Some(SearchAction::QueryCompleted { epoch, outcome })
                }]
            },

            // ═══════════════════════════════════════════════════════════════
            // QueryCompleted: apply only if still current
            // ═══════════════════════════════════════════════════════════════
            SearchAction::QueryCompleted { epoch, outcome } => {
                if epoch != state.epoch {
                    tracing::debug!(
                        epoch,
                        current = state.epoch,
                        "Discarding stale query completion"
                    );
                    metrics::counter!("search.queries.stale").increment(1);
                    return smallvec![Effect::None];
                }

                match outcome {
                    Ok(items) => {
                        state.results = self.truncate(items);
                        tracing::debug!(epoch, results = state.results.len(), "Query applied");
                    },
                    Err(error) => {
                        state.results.clear();
                        tracing::warn!(epoch, %error, "Query failed, showing no results");
                        metrics::counter!("search.queries.failed").increment(1);
                    },
                }

                if state.phase == SearchPhase::Loading {
                    state.phase = SearchPhase::Idle;
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // SelectItem: replace (single) or toggle (multiple)
            // ═══════════════════════════════════════════════════════════════
            SearchAction::SelectItem { item } => {
                if self.config.multiple {
                    let selected = state.selection.toggle(item);
                    tracing::trace!(selected, "Toggled selection");
                    env.emit(SearchEvent::SelectionChanged(state.selection.to_vec()));
                    return smallvec![Effect::None];
                }

                state.selection.replace_with(item.clone());
                state.query_text.clone_from(&item.name);
                state.is_open = false;
                if state.phase == SearchPhase::Debouncing {
                    state.phase = SearchPhase::Idle;
                }

                env.emit(SearchEvent::Selected(item));
                env.emit(SearchEvent::SelectionChanged(state.selection.to_vec()));
                smallvec![Effect::Cancel(DEBOUNCE_ID)]
            },

            SearchAction::RemoveSelection { item } => {
                if state.selection.remove(&item.id).is_some() {
                    env.emit(SearchEvent::SelectionChanged(state.selection.to_vec()));
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Clear / ClearAll
            // ═══════════════════════════════════════════════════════════════
            SearchAction::Clear => {
                reset_input(state);
                env.emit(SearchEvent::Cleared);
                smallvec![Effect::Cancel(DEBOUNCE_ID)]
            },

            SearchAction::ClearAll => {
                reset_input(state);
                state.selection.clear();
                env.emit(SearchEvent::Cleared);
                env.emit(SearchEvent::SelectionChanged(Vec::new()));
                smallvec![Effect::Cancel(DEBOUNCE_ID)]
            },

            SearchAction::CloseResults => {
                state.is_open = false;
                smallvec![Effect::None]
            },

            SearchAction::SyncSelection { items } => {
                state.selection = Selection::from_items(items, self.config.multiple);
                smallvec![Effect::None]
            },
        }
    }
}

fn reset_input(state: &mut SearchState) {
    state.query_text.clear();
    state.results.clear();
    state.is_open = false;
    state.phase = SearchPhase::Idle;
    state.invalidate();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::mocks::{MockQueryProvider, RecordingListener};
    use cinelog_testing::{ReducerTest, assertions};
    use std::time::Duration;

    type TestReducer = SearchReducer<MockQueryProvider, RecordingListener>;

    fn reducer(config: SearchConfig) -> TestReducer {
        SearchReducer::new(config)
    }

    fn test_env() -> (
        SearchEnvironment<MockQueryProvider, RecordingListener>,
        RecordingListener,
    ) {
        let listener = RecordingListener::new();
        (
            SearchEnvironment::new(MockQueryProvider::new(), listener.clone()),
            listener,
        )
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::new(i.to_string(), format!("Movie {i}"))).collect()
    }

    #[test]
    fn set_query_text_schedules_debounced_query() {
        let (env, listener) = test_env();
        let config = SearchConfig::default().with_debounce(Duration::from_millis(250));

        ReducerTest::new(reducer(config))
            .with_env(env)
            .given_state(SearchState::default())
            .when_action(SearchAction::SetQueryText { text: "alien".into() })
            .then_state(|state| {
                assert_eq!(state.query_text, "alien");
                assert_eq!(state.phase, SearchPhase::Debouncing);
                assert!(state.is_open);
                assert_eq!(state.epoch, 0);
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects);
                assert_eq!(
                    assertions::scheduled_action(effects, &DEBOUNCE_ID),
                    Some(&SearchAction::RunQuery { text: "alien".into() })
                );
            })
            .run();

        assert_eq!(listener.events(), vec![SearchEvent::Changed("alien".into())]);
    }

    #[test]
    fn empty_text_cancels_timer_and_invalidates() {
        let (env, _) = test_env();
        let state = SearchState {
            query_text: "al".into(),
            results: items(3),
            epoch: 4,
            phase: SearchPhase::Loading,
            is_open: true,
            ..SearchState::default()
        };

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(state)
            .when_action(SearchAction::SetQueryText { text: String::new() })
            .then_state(|state| {
                assert!(state.query_text.is_empty());
                assert!(state.results.is_empty());
                assert_eq!(state.phase, SearchPhase::Idle);
                assert!(!state.is_open);
                assert_eq!(state.epoch, 5);
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &DEBOUNCE_ID);
                assert!(assertions::scheduled_action(effects, &DEBOUNCE_ID).is_none());
            })
            .run();
    }

    #[test]
    fn run_query_bumps_epoch_and_calls_provider() {
        let (env, _) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState { epoch: 2, ..SearchState::default() })
            .when_action(SearchAction::RunQuery { text: "heat".into() })
            .then_state(|state| {
                assert_eq!(state.epoch, 3);
                assert!(state.is_loading());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn current_completion_is_truncated_and_applied() {
        let (env, _) = test_env();
        let config = SearchConfig::default().with_max_results(2);

        ReducerTest::new(reducer(config))
            .with_env(env)
            .given_state(SearchState {
                epoch: 7,
                phase: SearchPhase::Loading,
                ..SearchState::default()
            })
            .when_action(SearchAction::QueryCompleted { epoch: 7, outcome: Ok(items(5)) })
            .then_state(|state| {
                assert_eq!(state.results, items(2));
                assert_eq!(state.phase, SearchPhase::Idle);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn stale_completion_is_discarded() {
        let (env, _) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState {
                epoch: 8,
                results: items(1),
                phase: SearchPhase::Loading,
                ..SearchState::default()
            })
            .when_action(SearchAction::QueryCompleted { epoch: 7, outcome: Ok(items(4)) })
            .then_state(|state| {
                assert_eq!(state.results, items(1));
                assert!(state.is_loading());
            })
            .run();
    }

    #[test]
    fn failed_completion_empties_results() {
        let (env, _) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState {
                epoch: 1,
                results: items(3),
                phase: SearchPhase::Loading,
                ..SearchState::default()
            })
            .when_action(SearchAction::QueryCompleted {
                epoch: 1,
                outcome: Err(QueryError::Status { status: 503 }),
            })
            .then_state(|state| {
                assert!(state.results.is_empty());
                assert_eq!(state.phase, SearchPhase::Idle);
            })
            .run();
    }

    #[test]
    fn completion_while_debouncing_keeps_debouncing() {
        let (env, _) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState {
                epoch: 1,
                phase: SearchPhase::Debouncing,
                ..SearchState::default()
            })
            .when_action(SearchAction::QueryCompleted { epoch: 1, outcome: Ok(items(1)) })
            .then_state(|state| {
                assert_eq!(state.results.len(), 1);
                assert!(state.is_debouncing());
            })
            .run();
    }

    #[test]
    fn single_select_replaces_closes_and_echoes_name() {
        let (env, listener) = test_env();
        let picked = Item::new("9", "Blade Runner");

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState {
                query_text: "blade".into(),
                is_open: true,
                phase: SearchPhase::Debouncing,
                selection: Selection::from_items([Item::new("1", "Alien")], false),
                ..SearchState::default()
            })
            .when_action(SearchAction::SelectItem { item: picked.clone() })
            .then_state(|state| {
                assert_eq!(state.selection.items(), &[Item::new("9", "Blade Runner")]);
                assert_eq!(state.query_text, "Blade Runner");
                assert!(!state.is_open);
                assert_eq!(state.phase, SearchPhase::Idle);
            })
            .then_effects(|effects| assertions::assert_cancels(effects, &DEBOUNCE_ID))
            .run();

        assert_eq!(
            listener.events(),
            vec![
                SearchEvent::Selected(picked.clone()),
                SearchEvent::SelectionChanged(vec![picked]),
            ]
        );
    }

    #[test]
    fn multiple_select_toggles_and_keeps_view_open() {
        let (env, _) = test_env();
        let config = SearchConfig::default().with_multiple(true);
        let x = Item::new("x", "Xanadu");

        ReducerTest::new(reducer(config))
            .with_env(env)
            .given_state(SearchState {
                query_text: "xa".into(),
                is_open: true,
                ..SearchState::default()
            })
            .when_action(SearchAction::SelectItem { item: x.clone() })
            .when_action(SearchAction::SelectItem { item: x.clone() })
            .when_action(SearchAction::SelectItem { item: x })
            .then_state(|state| {
                assert!(state.selection.contains("x"));
                assert_eq!(state.selection.len(), 1);
                assert_eq!(state.query_text, "xa");
                assert!(state.is_open);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn remove_absent_selection_emits_nothing() {
        let (env, listener) = test_env();

        ReducerTest::new(reducer(SearchConfig::default().with_multiple(true)))
            .with_env(env)
            .given_state(SearchState::default())
            .when_action(SearchAction::RemoveSelection { item: Item::new("1", "Heat") })
            .then_state(|state| assert!(state.selection.is_empty()))
            .run();

        assert!(listener.events().is_empty());
    }

    #[test]
    fn clear_keeps_selection_clear_all_drops_it() {
        let seeded = SearchState {
            query_text: "her".into(),
            results: items(2),
            is_open: true,
            selection: Selection::from_items(items(2), true),
            ..SearchState::default()
        };

        let (env, listener) = test_env();
        ReducerTest::new(reducer(SearchConfig::default().with_multiple(true)))
            .with_env(env)
            .given_state(seeded.clone())
            .when_action(SearchAction::Clear)
            .then_state(|state| {
                assert!(state.query_text.is_empty());
                assert!(state.results.is_empty());
                assert_eq!(state.selection.len(), 2);
            })
            .then_effects(|effects| assertions::assert_cancels(effects, &DEBOUNCE_ID))
            .run();
        assert_eq!(listener.events(), vec![SearchEvent::Cleared]);

        let (env, _) = test_env();
        ReducerTest::new(reducer(SearchConfig::default().with_multiple(true)))
            .with_env(env)
            .given_state(seeded)
            .when_action(SearchAction::ClearAll)
            .then_state(|state| {
                assert!(state.query_text.is_empty());
                assert!(state.results.is_empty());
                assert!(state.selection.is_empty());
            })
            .run();
    }

    #[test]
    fn close_results_touches_nothing_else() {
        let (env, _) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState {
                query_text: "up".into(),
                results: items(1),
                is_open: true,
                ..SearchState::default()
            })
            .when_action(SearchAction::CloseResults)
            .then_state(|state| {
                assert!(!state.is_open);
                assert_eq!(state.query_text, "up");
                assert_eq!(state.results.len(), 1);
            })
            .run();
    }

    #[test]
    fn sync_selection_in_single_mode_keeps_first() {
        let (env, listener) = test_env();

        ReducerTest::new(reducer(SearchConfig::default()))
            .with_env(env)
            .given_state(SearchState::default())
            .when_action(SearchAction::SyncSelection { items: items(3) })
            .then_state(|state| {
                assert_eq!(state.selection.items(), &items(1)[..]);
            })
            .run();

        assert!(listener.events().is_empty());
    }
}
