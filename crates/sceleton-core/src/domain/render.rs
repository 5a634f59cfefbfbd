//! Template variable substitution.

use std::collections::HashMap;

use crate::domain::descriptor::ProjectDescriptor;

/// Context for template rendering.
///
/// A value object holding every variable a bundled template may reference.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "My-Tool" | User input |
/// | `PACKAGE_NAME` | "my_tool" | Computed |
/// | `APP_CLASS` | "MyTool" | Computed |
/// | `TITLE_UNDERLINE` | "=======" | Computed |
/// | `VERSION`, `DESCRIPTION`, `AUTHOR`, `EMAIL`, `URL`, `LICENSE` | | Descriptor |
/// | `YEAR` | "2026" | Caller (system clock) |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Create a context with the name-derived variables only.
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = HashMap::new();

        vars.insert("PACKAGE_NAME".to_string(), package_name(&name));
        vars.insert("APP_CLASS".to_string(), class_name(&name));
        vars.insert(
            "TITLE_UNDERLINE".to_string(),
            "=".repeat(name.chars().count()),
        );
        vars.insert("PROJECT_NAME".to_string(), name);

        Self { variables: vars }
    }

    /// Context carrying every descriptor field plus the copyright year.
    pub fn for_descriptor(descriptor: &ProjectDescriptor, year: i32) -> Self {
        Self::new(&descriptor.name)
            .with_variable("VERSION", &descriptor.version)
            .with_variable("DESCRIPTION", &descriptor.description)
            .with_variable("AUTHOR", &descriptor.author)
            .with_variable("EMAIL", &descriptor.email)
            .with_variable("URL", &descriptor.url)
            .with_variable("LICENSE", descriptor.license.name())
            .with_variable("YEAR", year.to_string())
    }

    /// Add a custom variable, consuming self and returning a new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{VARIABLE}}` placeholders in one left-to-right pass.
    ///
    /// Substituted values are never scanned again. Unknown placeholders are
    /// left untouched.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let value = after
                .find("}}")
                .and_then(|end| self.get(&after[..end]).map(|v| (v, end)));

            match value {
                Some((value, end)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Python package directory name for a project name.
///
/// | Input | Output |
/// |-------|--------|
/// | "demo" | "demo" |
/// | "my-tool" | "my_tool" |
/// | "MyTool" | "my_tool" |
pub fn package_name(project_name: &str) -> String {
    split_words(project_name).join("_")
}

/// Python class name prefix for a project name (`my-tool` → `MyTool`).
fn class_name(project_name: &str) -> String {
    split_words(project_name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words on separators and case transitions.
///
/// `_`, `-`, `.` and whitespace always split; `aB` splits between `a` and
/// `B`; `HTTPServer` splits into `http` + `server`.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let ctx = RenderContext::new("demo")
            .with_variable("AUTHOR", "{{YEAR}}")
            .with_variable("YEAR", "2026");
        for _ in 0..20 {
            assert_eq!(ctx.render("(c) {{YEAR}} {{AUTHOR}}"), "(c) 2026 {{YEAR}}");
        }
    }

    #[test]
    fn unknown_and_unterminated_placeholders_stay() {
        let ctx = RenderContext::new("demo");
        assert_eq!(
            ctx.render("{{NOPE}} {{PACKAGE_NAME}} {{PACKAGE_NAME"),
            "{{NOPE}} demo {{PACKAGE_NAME"
        );
    }

    #[test]
    fn package_name_variants() {
        assert_eq!(package_name("demo"), "demo");
        assert_eq!(package_name("my-tool"), "my_tool");
        assert_eq!(package_name("MyTool"), "my_tool");
        assert_eq!(package_name("HTTPServer"), "http_server");
        assert_eq!(package_name("zope.interface"), "zope_interface");
    }

    #[test]
    fn app_class_is_pascal_case() {
        assert_eq!(RenderContext::new("my-blog").get("APP_CLASS"), Some("MyBlog"));
        assert_eq!(RenderContext::new("polls").get("APP_CLASS"), Some("Polls"));
    }

    #[test]
    fn title_underline_matches_length() {
        let ctx = RenderContext::new("demo");
        assert_eq!(ctx.render("{{PROJECT_NAME}}\n{{TITLE_UNDERLINE}}"), "demo\n====");
    }

    #[test]
    fn unknown_placeholder_is_kept() {
        let ctx = RenderContext::new("demo");
        assert_eq!(ctx.render("{{NOPE}} {{PACKAGE_NAME}}"), "{{NOPE}} demo");
    }

    #[test]
    fn descriptor_fields_are_exposed() {
        let descriptor = ProjectDescriptor::new("demo")
            .with_author("Ada", "ada@example.com");
        let ctx = RenderContext::for_descriptor(&descriptor, 2026);
        assert_eq!(ctx.render("(c) {{YEAR}} {{AUTHOR}}"), "(c) 2026 Ada");
        assert_eq!(ctx.get("LICENSE"), Some("MIT License"));
    }
}
