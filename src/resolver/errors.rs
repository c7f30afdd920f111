//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error during dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("dependency not found: `{name}`")]
    #[diagnostic(code(coresmith::resolve::not_found))]
    DependencyNotFound { name: String },

    #[error("cyclic dependency: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(coresmith::resolve::cycle),
        help("Break the cycle by removing or restructuring dependencies")
    )]
    CyclicDependency { cycle: Vec<String> },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::DependencyNotFound { name } => {
                Diagnostic::error(format!("could not find core `{}`", name))
                    .with_suggestion("Check that the core name is spelled correctly")
                    .with_suggestion("Add the directory containing it with `--cores-root`")
                    .with_suggestion("Run `coresmith list` to see all known cores")
            }

            ResolveError::CyclicDependency { cycle } => {
                Diagnostic::error("cycle detected in dependency graph")
                    .with_context(format!("cycle: {}", cycle.join(" -> ")))
                    .with_suggestion(
                        "Break the cycle by removing or restructuring dependencies",
                    )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_diagnostic() {
        let err = ResolveError::CyclicDependency {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };

        assert_eq!(err.to_string(), "cyclic dependency: a -> b -> a");

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("cycle detected"));
        assert!(output.contains("a -> b -> a"));
    }

    #[test]
    fn test_not_found_diagnostic() {
        let err = ResolveError::DependencyNotFound { name: "zlib".into() };
        let output = err.to_diagnostic().format(false);

        assert!(output.contains("error: could not find core `zlib`"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("--cores-root"));
    }
}
