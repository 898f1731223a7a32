//! Option registration and spelling resolution.
//!
//! An [`OptionSet`] owns every registered option and maps each of its
//! spellings back to a single action identity. Options live in a vector
//! in registration order; the spelling tables hold indexes into that
//! vector, so alternate names never dangle and the set can be inspected
//! freely.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::action::{Action, Flow};

/// Separates alternate spellings in a registration name spec.
pub const NAME_DIVIDER: char = '|';

/// Stable handle for one registered option.
pub(crate) type OptionId = usize;

pub(crate) struct OptionEntry<'a> {
    pub(crate) canonical: String,
    pub(crate) short_alias: Option<char>,
    pub(crate) description: String,
    pub(crate) action: Action<'a>,
}

/// Errors reported while registering an option.
///
/// A failed registration leaves the set exactly as it was; previously
/// registered options stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A spelling candidate is the empty string (e.g. `"a||b"`).
    #[error("option name cannot be empty")]
    EmptyName,
    /// A spelling repeats within the call or collides with an existing
    /// short, long, or canonical name.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),
}

/// A read-only view of one registered option.
///
/// Yielded by [`OptionSet::iter`] in registration order; enough for a
/// usage-rendering collaborator to produce a help line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo<'s> {
    /// Primary name, the first spelling given at registration.
    pub canonical: &'s str,
    /// First single-character spelling, if any was registered.
    pub short_alias: Option<char>,
    /// Display text attached at registration.
    pub description: &'s str,
}

/// The registered option set for one program.
///
/// Register every option up front, then hand the set a token stream via
/// [`parse`](OptionSet::parse). The lifetime parameter lets actions
/// borrow host locals for the duration of the set.
///
/// # Examples
///
/// ```
/// use optline_core::{Action, OptionSet};
///
/// let mut opts = OptionSet::new("demo");
/// opts.register("file|in|f", Action::param(|_| {}), "Input file.")?;
///
/// assert!(opts.resolve_long("file").is_some());
/// assert!(opts.resolve_long("in").is_some());
/// assert!(opts.resolve_short('f').is_some());
/// assert!(opts.resolve_short('x').is_none());
/// # Ok::<(), optline_core::RegistrationError>(())
/// ```
pub struct OptionSet<'a> {
    progname: String,
    entries: Vec<OptionEntry<'a>>,
    canonical_names: BTreeMap<String, OptionId>,
    alternate_names: BTreeMap<String, OptionId>,
    short_names: BTreeMap<char, OptionId>,
}

impl<'a> OptionSet<'a> {
    /// Creates a set with the built-in `help|h` option, which requests
    /// early exit so the host can render usage and terminate.
    pub fn new(progname: impl Into<String>) -> Self {
        let mut set = Self::without_help(progname);
        set.register(
            "help|h",
            Action::NoArg(Box::new(|| Flow::Exit)),
            "Show this help message.",
        )
        .expect("help registration cannot collide in an empty set");
        set
    }

    /// Creates an empty set without the built-in help option.
    pub fn without_help(progname: impl Into<String>) -> Self {
        Self {
            progname: progname.into(),
            entries: Vec::new(),
            canonical_names: BTreeMap::new(),
            alternate_names: BTreeMap::new(),
            short_names: BTreeMap::new(),
        }
    }

    /// Registers one option under one or more spellings.
    ///
    /// `name_spec` is a [`NAME_DIVIDER`]-separated list of names; the
    /// first is the canonical identity and keys the long table even when
    /// it is a single character (in which case it doubles as a short
    /// spelling). Remaining names land in the short or alternate long
    /// table by length.
    ///
    /// All candidates are validated before any table is touched, so a
    /// failed call leaves the set unchanged.
    pub fn register(
        &mut self,
        name_spec: &str,
        action: Action<'a>,
        description: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        let mut names: Vec<&str> = Vec::new();
        for name in name_spec.split(NAME_DIVIDER) {
            if name.is_empty() {
                return Err(RegistrationError::EmptyName);
            }
            if names.contains(&name) {
                return Err(RegistrationError::DuplicateName(name.to_string()));
            }
            let taken = match as_short(name) {
                Some(ch) => self.short_names.contains_key(&ch),
                None => {
                    self.canonical_names.contains_key(name)
                        || self.alternate_names.contains_key(name)
                }
            };
            if taken {
                return Err(RegistrationError::DuplicateName(name.to_string()));
            }
            names.push(name);
        }
        // split() yields at least one candidate, and empty ones were rejected
        let canonical = names[0];

        let id = self.entries.len();
        self.canonical_names.insert(canonical.to_string(), id);
        let mut short_alias = as_short(canonical);
        if let Some(ch) = short_alias {
            self.short_names.insert(ch, id);
        }
        for name in &names[1..] {
            match as_short(name) {
                Some(ch) => {
                    self.short_names.insert(ch, id);
                    short_alias.get_or_insert(ch);
                }
                None => {
                    self.alternate_names.insert((*name).to_string(), id);
                }
            }
        }

        debug!(option = canonical, spellings = names.len(), "registered option");
        self.entries.push(OptionEntry {
            canonical: canonical.to_string(),
            short_alias,
            description: description.into(),
            action,
        });
        Ok(())
    }

    /// Looks up a short spelling.
    pub fn resolve_short(&self, ch: char) -> Option<OptionInfo<'_>> {
        self.resolve_short_id(ch).map(|id| self.info(id))
    }

    /// Looks up a long spelling, canonical names first, then alternates.
    pub fn resolve_long(&self, name: &str) -> Option<OptionInfo<'_>> {
        self.resolve_long_id(name).map(|id| self.info(id))
    }

    /// Iterates the registered options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = OptionInfo<'_>> {
        (0..self.entries.len()).map(|id| self.info(id))
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no options are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The program name given at construction.
    pub fn progname(&self) -> &str {
        &self.progname
    }

    pub(crate) fn resolve_short_id(&self, ch: char) -> Option<OptionId> {
        self.short_names.get(&ch).copied()
    }

    pub(crate) fn resolve_long_id(&self, name: &str) -> Option<OptionId> {
        self.canonical_names
            .get(name)
            .copied()
            .or_else(|| self.alternate_names.get(name).copied())
    }

    /// Splits one entry into its canonical name and mutable action, so
    /// the dispatcher can invoke the action and still name the option in
    /// error reports.
    pub(crate) fn entry_mut(&mut self, id: OptionId) -> (&str, &mut Action<'a>) {
        let entry = &mut self.entries[id];
        (entry.canonical.as_str(), &mut entry.action)
    }

    pub(crate) fn canonical_name(&self, id: OptionId) -> &str {
        &self.entries[id].canonical
    }

    fn info(&self, id: OptionId) -> OptionInfo<'_> {
        let entry = &self.entries[id];
        OptionInfo {
            canonical: &entry.canonical,
            short_alias: entry.short_alias,
            description: &entry.description,
        }
    }
}

/// A spelling is short when it is exactly one character.
fn as_short(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop<'a>() -> Action<'a> {
        Action::flag(|| {})
    }

    #[test]
    fn test_every_spelling_resolves_to_registered_option() {
        let mut opts = OptionSet::without_help("t");
        opts.register("file|in|f", Action::param(|_| {}), "Input file.")
            .expect("registration must succeed");

        for info in [
            opts.resolve_long("file"),
            opts.resolve_long("in"),
            opts.resolve_short('f'),
        ] {
            let info = info.expect("spelling must resolve");
            assert_eq!(info.canonical, "file");
            assert_eq!(info.short_alias, Some('f'));
            assert_eq!(info.description, "Input file.");
        }
        assert!(opts.resolve_long("f").is_none());
    }

    #[test]
    fn test_single_char_canonical_is_long_and_short() {
        let mut opts = OptionSet::without_help("t");
        opts.register("s", noop(), "").expect("registration must succeed");

        assert!(opts.resolve_long("s").is_some());
        assert!(opts.resolve_short('s').is_some());
        assert_eq!(opts.resolve_long("s").map(|i| i.short_alias), Some(Some('s')));
    }

    #[test]
    fn test_empty_candidate_is_rejected() {
        let mut opts = OptionSet::without_help("t");
        assert_eq!(
            opts.register("a||b", noop(), ""),
            Err(RegistrationError::EmptyName)
        );
        assert!(opts.is_empty());
        assert!(opts.resolve_long("a").is_none());
    }

    #[test]
    fn test_duplicate_within_one_call_is_rejected() {
        let mut opts = OptionSet::without_help("t");
        assert_eq!(
            opts.register("x|x", noop(), ""),
            Err(RegistrationError::DuplicateName("x".to_string()))
        );
        assert!(opts.is_empty());
    }

    #[test]
    fn test_collision_with_existing_spelling_is_rejected() {
        let mut opts = OptionSet::without_help("t");
        opts.register("verbose|v", noop(), "")
            .expect("registration must succeed");

        assert_eq!(
            opts.register("v", noop(), ""),
            Err(RegistrationError::DuplicateName("v".to_string()))
        );
        assert_eq!(
            opts.register("value|verbose", noop(), ""),
            Err(RegistrationError::DuplicateName("verbose".to_string()))
        );
    }

    #[test]
    fn test_failed_registration_leaves_set_unchanged() {
        let mut opts = OptionSet::without_help("t");
        opts.register("verbose|v", noop(), "Chatty output.")
            .expect("registration must succeed");

        let before = opts.len();
        assert!(opts.register("quiet|verbose", noop(), "").is_err());

        assert_eq!(opts.len(), before);
        assert!(opts.resolve_long("quiet").is_none());
        let kept = opts.resolve_long("verbose").expect("prior option must survive");
        assert_eq!(kept.description, "Chatty output.");
    }

    #[test]
    fn test_builtin_help_is_registered() {
        let opts = OptionSet::new("t");
        let help = opts.resolve_long("help").expect("help must be present");
        assert_eq!(help.short_alias, Some('h'));
        assert!(opts.resolve_short('h').is_some());
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut opts = OptionSet::without_help("t");
        opts.register("zeta", noop(), "").expect("registration must succeed");
        opts.register("alpha|a", noop(), "")
            .expect("registration must succeed");

        let names: Vec<&str> = opts.iter().map(|i| i.canonical).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
