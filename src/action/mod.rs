//! Build actions for xcodebuild invocations
//!
//! An [`Action`] is one of the named operations xcodebuild accepts on the
//! command line (`build`, `test`, `clean`, ...). An [`ActionSet`] is a
//! membership-only collection of actions: insertion order is not retained,
//! and rendering always emits members in a fixed canonical order so that
//! assembled command lines are deterministic.

use crate::command::Commandable;

/// A single xcodebuild action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Remove build products and intermediate files.
    Clean,
    /// Build the target.
    Build,
    /// Build and run the tests of the scheme.
    Test,
    /// Build and install the target into its installation directory.
    Install,
    /// Copy the source of the project to the source root.
    InstallSrc,
    /// Run the static analyzer on the target.
    Analyze,
    /// Archive the scheme into the archive location.
    Archive,
    /// Build the scheme's test targets without running them.
    BuildForTesting,
    /// Run previously built tests without rebuilding.
    TestWithoutBuilding,
}

/// Canonical emission order for assembled command lines. Rendering iterates
/// this order regardless of how the set was built.
pub const CANONICAL_ORDER: [Action; 9] = [
    Action::Test,
    Action::Build,
    Action::Clean,
    Action::Install,
    Action::InstallSrc,
    Action::Analyze,
    Action::Archive,
    Action::BuildForTesting,
    Action::TestWithoutBuilding,
];

impl Action {
    /// The argument spelling xcodebuild expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Clean => "clean",
            Action::Build => "build",
            Action::Test => "test",
            Action::Install => "install",
            Action::InstallSrc => "install-src",
            Action::Analyze => "analyze",
            Action::Archive => "archive",
            Action::BuildForTesting => "build-for-testing",
            Action::TestWithoutBuilding => "test-without-building",
        }
    }

    fn bit(&self) -> u16 {
        match self {
            Action::Clean => 1 << 0,
            Action::Build => 1 << 1,
            Action::Test => 1 << 2,
            Action::Install => 1 << 3,
            Action::InstallSrc => 1 << 4,
            Action::Analyze => 1 << 5,
            Action::Archive => 1 << 6,
            Action::BuildForTesting => 1 << 7,
            Action::TestWithoutBuilding => 1 << 8,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unordered set of build actions.
///
/// Duplicates collapse and insertion order is discarded; [`arguments`]
/// emits members in [`CANONICAL_ORDER`].
///
/// [`arguments`]: Commandable::arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    /// The empty set.
    pub fn new() -> Self {
        ActionSet(0)
    }

    /// Whether `action` is a member.
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Add an action. Adding a member again is a no-op.
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// The set of actions in `self`, `other`, or both.
    pub fn union(&self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in canonical emission order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        CANONICAL_ORDER.into_iter().filter(|a| self.contains(*a))
    }
}

impl From<Action> for ActionSet {
    fn from(action: Action) -> Self {
        let mut set = ActionSet::new();
        set.insert(action);
        set
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl Commandable for ActionSet {
    fn arguments(&self) -> Vec<String> {
        self.iter().map(|a| a.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_action_commands() {
        let cases = [
            (Action::Clean, "clean"),
            (Action::Build, "build"),
            (Action::Test, "test"),
            (Action::Install, "install"),
            (Action::InstallSrc, "install-src"),
            (Action::Analyze, "analyze"),
            (Action::Archive, "archive"),
            (Action::BuildForTesting, "build-for-testing"),
            (Action::TestWithoutBuilding, "test-without-building"),
        ];
        for (action, expected) in cases {
            assert_eq!(ActionSet::from(action).command(), expected);
        }
    }

    #[test]
    fn test_empty_set_renders_empty() {
        let set = ActionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.arguments(), Vec::<String>::new());
        assert_eq!(set.command(), "");
    }

    #[test]
    fn test_canonical_order_ignores_insertion_order() {
        let orders = [
            vec![Action::Build, Action::Clean, Action::Test],
            vec![Action::Clean, Action::Test, Action::Build],
            vec![Action::Test, Action::Build, Action::Clean],
        ];
        for order in orders {
            let set: ActionSet = order.into_iter().collect();
            assert_eq!(set.arguments(), vec!["test", "build", "clean"]);
        }
    }

    #[test]
    fn test_clean_build_command() {
        let set: ActionSet = [Action::Build, Action::Clean].into_iter().collect();
        assert_eq!(set.command(), "build clean");
    }

    #[test]
    fn test_full_set_emits_canonical_order() {
        let set: ActionSet = CANONICAL_ORDER.iter().rev().copied().collect();
        assert_eq!(
            set.arguments(),
            vec![
                "test",
                "build",
                "clean",
                "install",
                "install-src",
                "analyze",
                "archive",
                "build-for-testing",
                "test-without-building",
            ]
        );
    }

    #[test]
    fn test_union_and_membership() {
        let a = ActionSet::from(Action::Build);
        let b = ActionSet::from(Action::Test);
        let both = a.union(b);
        assert!(both.contains(Action::Build));
        assert!(both.contains(Action::Test));
        assert!(!both.contains(Action::Clean));
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_collapses() {
        let mut set = ActionSet::new();
        set.insert(Action::Archive);
        set.insert(Action::Archive);
        assert_eq!(set.len(), 1);
        assert_eq!(set.command(), "archive");
    }
}
