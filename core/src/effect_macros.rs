//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants in reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use cinelog_core::async_effect;
///
/// async_effect! {
///     let items = provider.query(&text).await.ok()?;
///     Some(SearchAction::QueryCompleted { epoch, outcome: Ok(items) })
/// }
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
/// ```rust,ignore
/// use cinelog_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(300),
///     action: SearchAction::RunQuery { text }
/// }
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

/// Create a debounced action: a `Delay` registered under a cancellation id
///
/// Emitting the same id again before the delay elapses aborts the earlier
/// timer, so only the last scheduled action is ever dispatched.
///
/// # Example
///
/// ```rust,ignore
/// use cinelog_core::debounce;
///
/// debounce! {
///     id: DEBOUNCE_ID,
///     duration: config.debounce,
///     action: SearchAction::RunQuery { text }
/// }
/// ```
#[macro_export]
macro_rules! debounce {
    (
        id: $id:expr,
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::delay! {
                duration: $duration,
                action: $action
            }),
        }
    };
}
