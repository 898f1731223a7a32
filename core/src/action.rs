//! Option actions and the typed parameter sink.
//!
//! An [`Action`] is the callback half of a registered option: either a
//! zero-argument handler or a one-string-argument handler, fixed at
//! registration. The parser never inspects the parameter string itself;
//! coercion to typed values happens inside the action, most conveniently
//! through [`Action::store`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Signal returned by an option action to the dispatch loop.
///
/// Returning [`Flow::Exit`] stops the parse immediately with success
/// semantics; the built-in `--help` option uses this to hand control back
/// to the host without going through the error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep scanning tokens.
    #[default]
    Continue,
    /// Stop the parse now and surface `ParseOutcome::EarlyExit`.
    Exit,
}

/// A `WithArg` action rejected its parameter string.
///
/// Produced by [`Action::store`] when the string cannot be coerced into
/// the destination type, or by any host callback that validates its
/// input. The dispatcher wraps it into `ParseError::InvalidParameter`
/// together with the offending option's canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidValue(pub String);

impl InvalidValue {
    /// Creates an `InvalidValue` from any displayable error.
    pub fn new(message: impl fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// The callback registered for an option.
///
/// Exactly one of the two shapes, chosen at registration and immutable
/// afterwards. `WithArg` actions may fail with [`InvalidValue`]; `NoArg`
/// actions only steer control flow.
///
/// # Examples
///
/// ```
/// use optline_core::{Action, Flow};
///
/// let mut count = 0u32;
/// let mut action = Action::flag(|| count += 1);
/// assert!(!action.takes_value());
/// ```
pub enum Action<'a> {
    /// Invoked with no input.
    NoArg(Box<dyn FnMut() -> Flow + 'a>),
    /// Invoked with the option's parameter string.
    WithArg(Box<dyn FnMut(&str) -> Result<Flow, InvalidValue> + 'a>),
}

impl fmt::Debug for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoArg(_) => f.write_str("Action::NoArg"),
            Action::WithArg(_) => f.write_str("Action::WithArg"),
        }
    }
}

impl<'a> Action<'a> {
    /// Wraps an infallible zero-argument callback; parsing continues.
    pub fn flag(mut run: impl FnMut() + 'a) -> Self {
        Action::NoArg(Box::new(move || {
            run();
            Flow::Continue
        }))
    }

    /// Wraps a zero-argument callback that requests early termination,
    /// the shape used by help-style options.
    pub fn exit_flag(mut run: impl FnMut() + 'a) -> Self {
        Action::NoArg(Box::new(move || {
            run();
            Flow::Exit
        }))
    }

    /// Wraps an infallible one-argument callback; parsing continues.
    pub fn param(mut run: impl FnMut(&str) + 'a) -> Self {
        Action::WithArg(Box::new(move |value| {
            run(value);
            Ok(Flow::Continue)
        }))
    }

    /// Wraps a one-argument callback that may reject its parameter.
    pub fn try_param(mut run: impl FnMut(&str) -> Result<(), InvalidValue> + 'a) -> Self {
        Action::WithArg(Box::new(move |value| {
            run(value)?;
            Ok(Flow::Continue)
        }))
    }

    /// Parses the parameter into `slot` via [`FromStr`].
    ///
    /// This is the "store into a typed destination" adapter: the parser
    /// core never coerces strings itself, it just runs this action like
    /// any other. Coercion failure becomes [`InvalidValue`] and aborts
    /// the parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use optline_core::{Action, OptionSet, ParseOutcome};
    ///
    /// let mut limit = 0usize;
    /// {
    ///     let mut opts = OptionSet::without_help("demo");
    ///     opts.register("limit|n", Action::store(&mut limit), "Result limit.")?;
    ///     opts.parse(["-n", "8"])?;
    /// }
    /// assert_eq!(limit, 8);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn store<T>(slot: &'a mut T) -> Self
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        Action::WithArg(Box::new(move |value| {
            *slot = value.parse().map_err(InvalidValue::new)?;
            Ok(Flow::Continue)
        }))
    }

    /// Whether this action consumes a parameter.
    pub fn takes_value(&self) -> bool {
        matches!(self, Action::WithArg(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_coerces_into_destination() {
        let mut value = 0.0f64;
        let mut action = Action::store(&mut value);

        let Action::WithArg(run) = &mut action else {
            panic!("store must be a WithArg action");
        };
        assert_eq!(run("3.5"), Ok(Flow::Continue));
        drop(action);

        assert_eq!(value, 3.5);
    }

    #[test]
    fn test_store_rejects_uncoercible_input() {
        let mut value = 0i32;
        let mut action = Action::store(&mut value);

        let Action::WithArg(run) = &mut action else {
            panic!("store must be a WithArg action");
        };
        let err = run("not-a-number").expect_err("coercion must fail");
        assert!(!err.0.is_empty());
        drop(action);

        assert_eq!(value, 0);
    }

    #[test]
    fn test_flag_continues_and_exit_flag_exits() {
        let mut hits = 0u32;
        let Action::NoArg(mut run) = Action::flag(|| hits += 1) else {
            panic!("flag must be a NoArg action");
        };
        assert_eq!(run(), Flow::Continue);
        assert_eq!(run(), Flow::Continue);
        drop(run);
        assert_eq!(hits, 2);

        let Action::NoArg(mut run) = Action::exit_flag(|| {}) else {
            panic!("exit_flag must be a NoArg action");
        };
        assert_eq!(run(), Flow::Exit);
    }

    #[test]
    fn test_invalid_value_display() {
        let err = InvalidValue::new("invalid digit found in string");
        assert_eq!(err.to_string(), "invalid digit found in string");
    }
}
