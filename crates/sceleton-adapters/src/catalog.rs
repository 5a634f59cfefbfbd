//! The bundled classifier catalog.

use tracing::debug;

use sceleton_core::{domain::ClassifierCatalog, error::SceletonResult};

const CLASSIFIERS: &str = include_str!("../resources/classifiers.txt");

/// Parse and validate the catalog compiled into the binary.
pub fn builtin_catalog() -> SceletonResult<ClassifierCatalog> {
    let catalog = ClassifierCatalog::parse(CLASSIFIERS);
    catalog.validate()?;
    debug!(classifiers = catalog.len(), "classifier catalog loaded");
    Ok(catalog)
}
