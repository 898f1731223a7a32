//! The token-classification state machine.
//!
//! Consumes a flat token sequence exactly once, left to right, with a
//! single slot of lookahead state: the option still waiting for its
//! parameter. Each recognized option fires its registered action as soon
//! as the match is complete; tokens that are neither options nor consumed
//! parameters come back as positional arguments.

use thiserror::Error;
use tracing::trace;

use crate::action::{Action, Flow, InvalidValue};
use crate::registry::{OptionId, OptionSet};

/// Character that introduces an option token.
pub const OPTION_LEAD: char = '-';
/// Token that ends option scanning; everything after it is positional.
pub const TERMINATOR: &str = "--";
/// Separates a long option's name from its inline value.
pub const VALUE_DELIMITER: char = '=';

/// Errors that abort a parse call.
///
/// The whole call fails fast: no positional result is returned, though
/// actions invoked before the failing token have already run and are not
/// undone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option-leading token or bundled character does not resolve.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// An option token appeared while the previous option was still
    /// waiting for its parameter.
    #[error("expected a parameter, found option {0}")]
    UnexpectedOption(String),
    /// The token stream ended while the named option was still waiting
    /// for its parameter.
    #[error("missing parameter for option {0}")]
    MissingParameter(String),
    /// A `WithArg` action rejected the parameter it was given.
    #[error("invalid parameter for option {option}")]
    InvalidParameter {
        /// Canonical name of the rejecting option.
        option: String,
        #[source]
        source: InvalidValue,
    },
}

/// Result of a successful parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed; holds the positional arguments in their
    /// original relative order.
    Completed(Vec<String>),
    /// An action returned [`Flow::Exit`] (conventionally `--help`); the
    /// host decides what to do, typically render usage and terminate.
    EarlyExit,
}

impl ParseOutcome {
    /// Whether an action requested early termination.
    pub fn exit_requested(&self) -> bool {
        matches!(self, ParseOutcome::EarlyExit)
    }

    /// The positional arguments, empty on early exit.
    pub fn into_unparsed(self) -> Vec<String> {
        match self {
            ParseOutcome::Completed(unparsed) => unparsed,
            ParseOutcome::EarlyExit => Vec::new(),
        }
    }
}

impl<'a> OptionSet<'a> {
    /// Parses a token sequence, dispatching actions as options match.
    ///
    /// Rules per token, in order: the [`TERMINATOR`] (with no parameter
    /// pending) ends scanning and passes every later token through
    /// verbatim; an option-leading token resolves as a long option or a
    /// short-option bundle; anything else feeds a pending parameter or
    /// becomes positional.
    ///
    /// # Examples
    ///
    /// ```
    /// use optline_core::{Action, OptionSet, ParseOutcome};
    ///
    /// let mut verbose = 0u32;
    /// let mut limit = 10usize;
    /// let leftovers = {
    ///     let mut opts = OptionSet::new("demo");
    ///     opts.register("verbose|v", Action::flag(|| verbose += 1), "Chatty output.")?;
    ///     opts.register("limit|n", Action::store(&mut limit), "Result limit.")?;
    ///     match opts.parse(["-vv", "--limit=3", "input.txt"])? {
    ///         ParseOutcome::Completed(rest) => rest,
    ///         ParseOutcome::EarlyExit => return Ok(()),
    ///     }
    /// };
    /// assert_eq!(verbose, 2);
    /// assert_eq!(limit, 3);
    /// assert_eq!(leftovers, ["input.txt"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse<I>(&mut self, tokens: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut iter = tokens.into_iter().map(Into::into);
        let mut unparsed: Vec<String> = Vec::new();
        let mut pending: Option<OptionId> = None;

        while let Some(token) = iter.next() {
            trace!(token = %token, "scanning");

            if pending.is_none() && token == TERMINATOR {
                // terminator itself is consumed, the rest is positional
                unparsed.extend(iter);
                break;
            }

            let flow = match option_body(&token) {
                Some(body) => {
                    if pending.is_some() {
                        return Err(ParseError::UnexpectedOption(token));
                    }
                    match body.strip_prefix(OPTION_LEAD) {
                        Some(long) => self.dispatch_long(long, &mut pending)?,
                        None => self.dispatch_bundle(body, &mut pending)?,
                    }
                }
                None => match pending.take() {
                    Some(id) => self.feed_parameter(id, &token)?,
                    None => {
                        unparsed.push(token);
                        Flow::Continue
                    }
                },
            };

            if flow == Flow::Exit {
                trace!("early exit requested");
                return Ok(ParseOutcome::EarlyExit);
            }
        }

        if let Some(id) = pending {
            return Err(ParseError::MissingParameter(
                self.canonical_name(id).to_string(),
            ));
        }

        Ok(ParseOutcome::Completed(unparsed))
    }

    /// Parses a full process-argument vector, skipping the program-name
    /// slot.
    pub fn parse_argv<S>(&mut self, argv: &[S]) -> Result<ParseOutcome, ParseError>
    where
        S: AsRef<str>,
    {
        self.parse(argv.iter().skip(1).map(|arg| arg.as_ref().to_string()))
    }

    /// In-place variant of [`parse_argv`](OptionSet::parse_argv):
    /// compacts `argv` down to the program name plus the positional
    /// arguments. On early exit the vector is left untouched.
    pub fn parse_argv_inplace(
        &mut self,
        argv: &mut Vec<String>,
    ) -> Result<ParseOutcome, ParseError> {
        let outcome = self.parse_argv(argv.as_slice())?;
        if let ParseOutcome::Completed(unparsed) = &outcome {
            argv.truncate(1);
            argv.extend(unparsed.iter().cloned());
        }
        Ok(outcome)
    }

    /// Resolves and dispatches a long option, `body` being the token
    /// after the `--` prefix. An inline value follows the first
    /// [`VALUE_DELIMITER`]; without one, a `WithArg` option defers to the
    /// next token.
    fn dispatch_long(
        &mut self,
        body: &str,
        pending: &mut Option<OptionId>,
    ) -> Result<Flow, ParseError> {
        let (name, inline) = match body.find(VALUE_DELIMITER) {
            Some(pos) => (&body[..pos], Some(&body[pos + VALUE_DELIMITER.len_utf8()..])),
            None => (body, None),
        };
        trace!(name, inline = inline.is_some(), "long option");

        let Some(id) = self.resolve_long_id(name) else {
            return Err(ParseError::UnknownOption(name.to_string()));
        };
        let (canonical, action) = self.entry_mut(id);
        match action {
            Action::WithArg(run) => match inline {
                Some(value) => run(value).map_err(|source| ParseError::InvalidParameter {
                    option: canonical.to_string(),
                    source,
                }),
                None => {
                    *pending = Some(id);
                    Ok(Flow::Continue)
                }
            },
            // an inline value on a no-argument option is ignored
            Action::NoArg(run) => Ok(run()),
        }
    }

    /// Walks a short-option bundle, the token after a single
    /// [`OPTION_LEAD`]. No-argument options fire one after another; the
    /// first argument-taking option ends the bundle, either swallowing
    /// the rest of the token as its value or deferring to the next token.
    fn dispatch_bundle(
        &mut self,
        bundle: &str,
        pending: &mut Option<OptionId>,
    ) -> Result<Flow, ParseError> {
        for (pos, ch) in bundle.char_indices() {
            trace!(short = %ch, "short option");

            let Some(id) = self.resolve_short_id(ch) else {
                return Err(ParseError::UnknownOption(ch.to_string()));
            };
            let (canonical, action) = self.entry_mut(id);
            match action {
                Action::NoArg(run) => {
                    if run() == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                Action::WithArg(run) => {
                    let rest = &bundle[pos + ch.len_utf8()..];
                    if rest.is_empty() {
                        *pending = Some(id);
                        return Ok(Flow::Continue);
                    }
                    return run(rest).map_err(|source| ParseError::InvalidParameter {
                        option: canonical.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Feeds a whole token to the option deferred from the previous one.
    fn feed_parameter(&mut self, id: OptionId, value: &str) -> Result<Flow, ParseError> {
        trace!(value, "pending parameter");
        let (canonical, action) = self.entry_mut(id);
        match action {
            Action::WithArg(run) => run(value).map_err(|source| ParseError::InvalidParameter {
                option: canonical.to_string(),
                source,
            }),
            Action::NoArg(_) => unreachable!("pending option is always WithArg"),
        }
    }
}

/// The token's body after the option lead, if the token is an option at
/// all. A bare `-` is positional.
fn option_body(token: &str) -> Option<&str> {
    token
        .strip_prefix(OPTION_LEAD)
        .filter(|body| !body.is_empty())
}
