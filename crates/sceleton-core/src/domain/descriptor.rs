//! Metadata of a project being created.

use serde::{Deserialize, Serialize};

use crate::domain::{
    license::License,
    render::package_name,
    setup_py::{SetupPy, SetupValue},
};

pub const DEFAULT_VERSION: &str = "0.1.0";

/// Everything needed to render a new package.
///
/// Built from CLI flags, config defaults or interactive answers, used once
/// and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub url: String,
    pub keywords: Vec<String>,
    pub license: License,
    pub classifiers: Vec<String>,
    pub install_requires: Vec<String>,
    pub django: bool,
}

impl ProjectDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let license = License::default();
        Self {
            name: name.into(),
            version: DEFAULT_VERSION.to_string(),
            description: String::new(),
            author: String::new(),
            email: String::new(),
            url: String::new(),
            keywords: Vec::new(),
            license,
            classifiers: default_classifiers(license),
            install_requires: Vec::new(),
            django: false,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = author.into();
        self.email = email.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Switch license, keeping the `License ::` classifier in sync.
    pub fn with_license(mut self, license: License) -> Self {
        self.set_license(license);
        self
    }

    pub fn set_license(&mut self, license: License) {
        self.license = license;
        self.classifiers = replace_license_classifier(&self.classifiers, license);
    }

    /// Mark as a Django app: adds the dependency and framework classifiers.
    pub fn with_django(mut self) -> Self {
        self.django = true;
        if !self.install_requires.iter().any(|r| r.eq_ignore_ascii_case("django")) {
            self.install_requires.push("Django".to_string());
        }
        for classifier in ["Environment :: Web Environment", "Framework :: Django"] {
            if !self.classifiers.iter().any(|c| c == classifier) {
                self.classifiers.push(classifier.to_string());
            }
        }
        self.classifiers.sort();
        self
    }

    /// Python package (directory) name.
    pub fn package(&self) -> String {
        package_name(&self.name)
    }

    /// Write every descriptor field into a `setup()` call.
    pub fn apply_to(&self, setup: &mut SetupPy) {
        setup.set("name", self.name.as_str());
        setup.set("version", self.version.as_str());
        setup.set("description", self.description.as_str());
        setup.set("long_description", SetupValue::Expr("readme".into()));
        setup.set("author", self.author.as_str());
        setup.set("author_email", self.email.as_str());
        setup.set("url", self.url.as_str());
        setup.set("license", self.license.name());
        setup.set("keywords", self.keywords.join(" "));
        setup.set(
            "packages",
            SetupValue::Expr("find_packages(exclude=['tests', 'docs'])".into()),
        );
        setup.set("include_package_data", SetupValue::Expr("True".into()));
        setup.set("install_requires", self.install_requires.clone());
        setup.set("classifiers", self.classifiers.clone());
        setup.set("zip_safe", SetupValue::Expr("False".into()));
    }
}

/// Classifiers every new project starts with.
pub fn default_classifiers(license: License) -> Vec<String> {
    vec![
        "Development Status :: 3 - Alpha".to_string(),
        "Intended Audience :: Developers".to_string(),
        license.classifier(),
        "Programming Language :: Python :: 3".to_string(),
    ]
}

/// Drop existing `License ::` classifiers and insert the one for `license`
/// at the position of the first dropped entry (or sorted in when absent).
pub fn replace_license_classifier(classifiers: &[String], license: License) -> Vec<String> {
    let position = classifiers.iter().position(|c| c.starts_with("License ::"));
    let mut out: Vec<String> = classifiers
        .iter()
        .filter(|c| !c.starts_with("License ::"))
        .cloned()
        .collect();

    let wanted = license.classifier();
    match position {
        Some(idx) => out.insert(idx.min(out.len()), wanted),
        None => {
            let idx = out.partition_point(|c| c.as_str() < wanted.as_str());
            out.insert(idx, wanted);
        }
    }
    out
}

/// Split a free-text keyword answer on commas and whitespace.
pub fn split_keywords(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_mit_defaults() {
        let d = ProjectDescriptor::new("demo");
        assert_eq!(d.version, "0.1.0");
        assert_eq!(d.license, License::Mit);
        assert!(
            d.classifiers
                .contains(&"License :: OSI Approved :: MIT License".to_string())
        );
    }

    #[test]
    fn license_switch_updates_classifier() {
        let d = ProjectDescriptor::new("demo").with_license(License::Bsd3);
        let licenses: Vec<_> = d
            .classifiers
            .iter()
            .filter(|c| c.starts_with("License ::"))
            .collect();
        assert_eq!(licenses, ["License :: OSI Approved :: BSD License"]);
        assert_eq!(d.classifiers.len(), 4);
    }

    #[test]
    fn license_classifier_inserted_when_absent() {
        let out = replace_license_classifier(
            &["Development Status :: 4 - Beta".into(), "Topic :: Utilities".into()],
            License::Isc,
        );
        assert_eq!(out[1], "License :: OSI Approved :: ISC License (ISCL)");
    }

    #[test]
    fn django_adds_dependency_once() {
        let d = ProjectDescriptor::new("site").with_django().with_django();
        assert_eq!(d.install_requires, vec!["Django"]);
        assert!(d.classifiers.contains(&"Framework :: Django".to_string()));
    }

    #[test]
    fn apply_to_writes_all_fields() {
        let mut setup = SetupPy::parse("setup()").unwrap();
        ProjectDescriptor::new("demo")
            .with_author("Ada", "ada@example.com")
            .apply_to(&mut setup);
        assert_eq!(setup.get("license").and_then(SetupValue::as_str), Some("MIT License"));
        assert_eq!(setup.get("author_email").and_then(SetupValue::as_str), Some("ada@example.com"));
        assert_eq!(setup.list("install_requires").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn keywords_split_on_commas_and_spaces() {
        assert_eq!(split_keywords("cli, tools  python"), vec!["cli", "tools", "python"]);
        assert!(split_keywords("  ").is_empty());
    }
}
