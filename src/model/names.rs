//! Identifier casing used for generated file names and Go identifiers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym regex should be valid"));

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("word regex should be valid"));

/// Convert a CamelCase (or mixed) identifier to lower snake case.
///
/// ```rust
/// use provider_gen::model::to_snake_case;
///
/// assert_eq!(to_snake_case("LifecyclePolicy"), "lifecycle_policy");
/// assert_eq!(to_snake_case("DBInstance"), "db_instance");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let s = s.replace(['-', ' ', '.'], "_");
    let s = ACRONYM_BOUNDARY.replace_all(&s, "${1}_${2}");
    let s = WORD_BOUNDARY.replace_all(&s, "${1}_${2}");
    s.to_lowercase()
        .split('_')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Upper-case the first character (Go exported identifier)
pub fn to_exported(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first character (JSON field name)
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Go constant identifier for an enum value, e.g. `IMMUTABLE` → `Immutable`
pub fn enum_value_ident(value: &str) -> String {
    to_snake_case(&value.replace(|c: char| !c.is_ascii_alphanumeric(), "_"))
        .split('_')
        .map(to_exported)
        .collect()
}

/// The spellings of one resource name that templates and file names need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Names {
    /// Name as it appears in the service model, e.g. `LifecyclePolicy`
    pub original: String,
    /// Exported Go identifier, e.g. `LifecyclePolicy`
    pub camel: String,
    /// File name spelling, e.g. `lifecycle_policy`
    pub snake: String,
}

impl Names {
    pub fn new(original: &str) -> Self {
        let camel = to_exported(original);
        Self {
            original: original.to_string(),
            snake: to_snake_case(original),
            camel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Repository"), "repository");
        assert_eq!(to_snake_case("LifecyclePolicy"), "lifecycle_policy");
        assert_eq!(to_snake_case("DBClusterParameterGroup"), "db_cluster_parameter_group");
        assert_eq!(to_snake_case("S3Bucket"), "s3_bucket");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_enum_value_ident() {
        assert_eq!(enum_value_ident("IMMUTABLE"), "Immutable");
        assert_eq!(enum_value_ident("AES256"), "Aes256");
        assert_eq!(enum_value_ident("scan-on-push"), "ScanOnPush");
        assert_eq!(enum_value_ident("KMS"), "Kms");
    }

    #[test]
    fn test_names() {
        let n = Names::new("LifecyclePolicy");
        assert_eq!(n.camel, "LifecyclePolicy");
        assert_eq!(n.snake, "lifecycle_policy");
    }
}
