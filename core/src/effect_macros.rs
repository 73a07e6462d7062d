//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when a reducer needs to describe an async
//! call to an injected service or a delayed follow-up action.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```
/// use mandap_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum Action {
///     Loaded { price: u64 },
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     Some(Action::Loaded { price: 50_000 })
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```
/// use mandap_core::{delay, effect::Effect};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// enum Action {
///     HoldExpired,
/// }
///
/// let effect: Effect<Action> = delay! {
///     duration: Duration::from_secs(30),
///     action: Action::HoldExpired
/// };
/// assert!(matches!(effect, Effect::Delay { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
