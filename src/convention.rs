use std::borrow::Cow;

/// Prefix used when a caller names a convention we don't know about.
pub const CUSTOM_PREFIX: &str = "User-defined convention: ";

/// Known convention names and the instruction handed to the model for each.
pub const CATALOG: [(&str, &str); 4] = [
    (
        "Conventional Commits",
        "Use the format '<type>(<optional scope>): <subject>' in imperative mood. \
         Use types like feat, fix, chore, docs, style, refactor, test, perf. \
         Keep subject concise and under 50 characters.",
    ),
    (
        "Gitmoji",
        "Start the commit message with an emoji representing the change type, \
         followed by a concise subject line in imperative mood. ",
    ),
    (
        "JIRA-style",
        "Prefix the commit message with the issue ID (e.g., 'PROJ-123'), followed by \
         a concise imperative subject describing the change. Example: 'PROJ-123 fix login timeout'.",
    ),
    (
        "Scoped Commits",
        "Prefix the subject with the scope of the change (e.g., module or package), \
         followed by a colon and a concise imperative subject. Example: 'api: add rate limiting'.",
    ),
];

/// A commit-message style requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Convention {
    ConventionalCommits,
    Gitmoji,
    JiraStyle,
    ScopedCommits,
    /// Anything else; the raw name is passed to the model as-is.
    Custom(String),
}

impl Convention {
    /// Resolve a convention by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Conventional Commits" => Convention::ConventionalCommits,
            "Gitmoji" => Convention::Gitmoji,
            "JIRA-style" => Convention::JiraStyle,
            "Scoped Commits" => Convention::ScopedCommits,
            other => Convention::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Convention::ConventionalCommits => CATALOG[0].0,
            Convention::Gitmoji => CATALOG[1].0,
            Convention::JiraStyle => CATALOG[2].0,
            Convention::ScopedCommits => CATALOG[3].0,
            Convention::Custom(name) => name,
        }
    }

    /// Instruction text substituted into the system prompt.
    pub fn instruction(&self) -> Cow<'static, str> {
        match self {
            Convention::ConventionalCommits => Cow::Borrowed(CATALOG[0].1),
            Convention::Gitmoji => Cow::Borrowed(CATALOG[1].1),
            Convention::JiraStyle => Cow::Borrowed(CATALOG[2].1),
            Convention::ScopedCommits => Cow::Borrowed(CATALOG[3].1),
            Convention::Custom(name) => Cow::Owned(format!("{CUSTOM_PREFIX}{name}")),
        }
    }

    pub fn is_gitmoji(&self) -> bool {
        matches!(self, Convention::Gitmoji)
    }
}
