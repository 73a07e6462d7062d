//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use mandap_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several actions may be queued with [`ReducerTest::when_action`] or
/// [`ReducerTest::when_actions`]; they are reduced in order and effect
/// assertions see the effects of the last one.
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Queue several actions, reduced in order (When)
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use mandap_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect would do work.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_noop),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect, at any nesting depth
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(contains_future),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert the number of leaf effects that will run
    ///
    /// # Panics
    ///
    /// Panics if the leaf count doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_leaf_count<A>(effects: &[Effect<A>], expected: usize) {
        let actual: usize = effects.iter().map(Effect::leaf_count).sum();
        assert_eq!(
            actual, expected,
            "Expected {expected} runnable effects, but found {actual}"
        );
    }

    fn contains_future<A>(effect: &Effect<A>) -> bool {
        match effect {
            Effect::Future(_) => true,
            Effect::Parallel(effects) | Effect::Sequential(effects) => {
                effects.iter().any(contains_future)
            },
            Effect::None | Effect::Delay { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandap_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

    #[derive(Clone, Debug)]
    struct GuestState {
        guests: u32,
    }

    #[derive(Clone, Debug)]
    enum GuestAction {
        Arrive,
        Leave,
        Confirm,
    }

    struct GuestReducer;

    struct GuestEnv;

    impl Reducer for GuestReducer {
        type State = GuestState;
        type Action = GuestAction;
        type Environment = GuestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                GuestAction::Arrive => {
                    state.guests += 1;
                    smallvec![Effect::None]
                },
                GuestAction::Leave => {
                    state.guests = state.guests.saturating_sub(1);
                    smallvec![Effect::None]
                },
                GuestAction::Confirm => smallvec![Effect::merge(vec![
                    Effect::Future(Box::pin(async { Some(GuestAction::Arrive) })),
                    Effect::None,
                ])],
            }
        }
    }

    #[test]
    fn test_single_action() {
        ReducerTest::new(GuestReducer)
            .with_env(GuestEnv)
            .given_state(GuestState { guests: 0 })
            .when_action(GuestAction::Arrive)
            .then_state(|state| {
                assert_eq!(state.guests, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_action_sequence() {
        ReducerTest::new(GuestReducer)
            .with_env(GuestEnv)
            .given_state(GuestState { guests: 0 })
            .when_actions([GuestAction::Arrive, GuestAction::Arrive, GuestAction::Leave])
            .then_state(|state| {
                assert_eq!(state.guests, 1);
            })
            .run();
    }

    #[test]
    fn test_nested_future_is_found() {
        ReducerTest::new(GuestReducer)
            .with_env(GuestEnv)
            .given_state(GuestState { guests: 0 })
            .when_action(GuestAction::Confirm)
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
                assertions::assert_leaf_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<GuestAction>(&[Effect::None]);
        assertions::assert_no_effects::<GuestAction>(&[]);
        assertions::assert_no_effects::<GuestAction>(&[Effect::Parallel(vec![])]);
    }
}
