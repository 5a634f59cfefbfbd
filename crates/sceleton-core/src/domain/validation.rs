use crate::domain::{error::DomainError, project_structure::ProjectStructure};

/// Python keywords that cannot name a package.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// A module/package directory name must be an importable identifier.
    pub fn validate_package_name(name: &str) -> Result<(), DomainError> {
        let fail = |reason: &str| DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(fail("name cannot be empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(fail("must start with a letter or underscore"));
            }
            _ => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(fail("only letters, digits and underscores are allowed"));
        }
        if PYTHON_KEYWORDS.contains(&name) {
            return Err(fail("is a reserved Python keyword"));
        }
        Ok(())
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
