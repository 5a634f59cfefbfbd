//! Interactive collection of project metadata.

use tracing::debug;

use crate::{
    application::ports::Prompter,
    domain::{
        ClassifierCatalog, ClassifierCategory, License, ProjectDescriptor, selection,
        split_keywords,
    },
    error::SceletonResult,
};

/// Categories offered as menus when collecting classifiers.
pub const MENU_CATEGORIES: [ClassifierCategory; 4] = [
    ClassifierCategory::DevelopmentStatus,
    ClassifierCategory::IntendedAudience,
    ClassifierCategory::ProgrammingLanguage,
    ClassifierCategory::Topic,
];

/// Asks the operator for descriptor fields through a [`Prompter`].
pub struct Questionnaire<'a> {
    prompter: &'a dyn Prompter,
    catalog: &'a ClassifierCatalog,
}

impl<'a> Questionnaire<'a> {
    pub fn new(prompter: &'a dyn Prompter, catalog: &'a ClassifierCatalog) -> Self {
        Self { prompter, catalog }
    }

    /// Ask for every field, using `base` for defaults.
    pub fn descriptor(&self, base: ProjectDescriptor) -> SceletonResult<ProjectDescriptor> {
        let mut d = base;

        d.description = self.text("Description", &d.description)?;
        d.version = self.text("Version", &d.version)?;
        let (author, email) = self.user(&d.author, &d.email)?;
        d.author = author;
        d.email = email;
        d.url = self.text("URL", &d.url)?;
        d.keywords = self.keywords(&d.keywords)?;

        let license = self.license(d.license)?;
        d.set_license(license);
        d.classifiers = self.classifiers(&d.classifiers)?;

        Ok(d)
    }

    /// Author name and e-mail.
    pub fn user(&self, author: &str, email: &str) -> SceletonResult<(String, String)> {
        Ok((self.text("Author", author)?, self.text("E-mail", email)?))
    }

    pub fn keywords(&self, current: &[String]) -> SceletonResult<Vec<String>> {
        let answer = self.text("Keywords (comma or space separated)", &current.join(" "))?;
        Ok(split_keywords(&answer))
    }

    /// Pick one license from a menu; an empty answer keeps `current`.
    pub fn license(&self, current: License) -> SceletonResult<License> {
        let names: Vec<String> = License::ALL.iter().map(|l| l.name().to_string()).collect();
        let default = License::ALL
            .iter()
            .position(|l| *l == current)
            .map(|i| (i + 1).to_string());

        let picked = self.choose("License", &names, default.as_deref())?;
        Ok(picked
            .first()
            .and_then(|&i| License::ALL.get(i - 1).copied())
            .unwrap_or(current))
    }

    /// Menu per category of [`MENU_CATEGORIES`]. A non-empty answer replaces
    /// that category's entries in `current`; other entries are kept.
    pub fn classifiers(&self, current: &[String]) -> SceletonResult<Vec<String>> {
        let mut result = current.to_vec();

        for category in MENU_CATEGORIES {
            let items = self.catalog.get(category);
            let picked = self.choose(&category.to_string(), items, None)?;
            if picked.is_empty() {
                continue;
            }

            let chosen = self.catalog.pick(category, &picked)?;
            result.retain(|c| ClassifierCategory::of(c) != Some(category));
            result.extend(chosen);
        }

        result.sort();
        result.dedup();
        Ok(result)
    }

    fn text(&self, prompt: &str, default: &str) -> SceletonResult<String> {
        let default = (!default.is_empty()).then_some(default);
        Ok(self.prompter.ask(prompt, default)?.trim().to_string())
    }

    /// Show a menu and ask until the answer is in range.
    fn choose(
        &self,
        title: &str,
        items: &[String],
        default: Option<&str>,
    ) -> SceletonResult<Vec<usize>> {
        self.prompter.show_menu(title, items)?;
        loop {
            let answer = self
                .prompter
                .ask("Choose numbers separated by spaces", default)?;
            if selection::in_range(&answer, items.len()) {
                debug!(title, answer = %answer, "Menu answer accepted");
                return Ok(selection::parse(&answer, items.len())?);
            }
            self.prompter
                .warn(&format!("Please enter numbers between 1 and {}", items.len()))?;
        }
    }
}
