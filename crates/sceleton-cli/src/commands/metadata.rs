//! `sceleton classifiers | user | license | keywords [--edit]`.

use serde_json::{Value, json};
use tracing::instrument;

use sceleton_core::{
    application::Questionnaire,
    domain::{License, SetupValue, split_keywords},
};

use crate::{
    cli::{FieldArgs, OutputFormat},
    context::AppContext,
    error::CliResult,
    output::OutputManager,
    prompt::terminal_prompter,
};

/// Metadata group a command shows or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Classifiers,
    User,
    License,
    Keywords,
}

#[instrument(skip(args, ctx, output))]
pub fn execute(
    field: Field,
    args: FieldArgs,
    ctx: &AppContext,
    output: &OutputManager,
) -> CliResult<()> {
    if args.edit {
        edit(field, ctx, output)
    } else {
        show(field, ctx, output)
    }
}

fn show(field: Field, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let path = ctx.setup_py();
    let keys: &[&str] = match field {
        Field::Classifiers => &["classifiers"],
        Field::User => &["author", "author_email"],
        Field::License => &["license"],
        Field::Keywords => &["keywords"],
    };

    if output.format() == OutputFormat::Json {
        let mut doc = serde_json::Map::new();
        for key in keys {
            let value = ctx.editor.try_get(key, &path)?;
            doc.insert((*key).to_string(), value.as_ref().map_or(Value::Null, to_json));
        }
        output.json(&Value::Object(doc))?;
        return Ok(());
    }

    match field {
        Field::Classifiers => {
            let classifiers = ctx.editor.try_get("classifiers", &path)?;
            for line in classifiers.as_ref().and_then(SetupValue::as_list).unwrap_or_default() {
                output.print(line)?;
            }
        }
        Field::User => {
            let author = ctx.editor.get("author", &path)?.display();
            match ctx.editor.try_get("author_email", &path)? {
                Some(email) if !email.display().is_empty() => {
                    output.print(&format!("{author} <{}>", email.display()))?
                }
                _ => output.print(&author)?,
            }
        }
        Field::License | Field::Keywords => {
            output.print(&ctx.editor.get(keys[0], &path)?.display())?;
        }
    }
    Ok(())
}

fn edit(field: Field, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let path = ctx.setup_py();
    let setup = ctx.editor.load(&path)?;
    let text = |key: &str| setup.get(key).map(SetupValue::display).unwrap_or_default();

    let prompter = terminal_prompter();
    let questionnaire = Questionnaire::new(prompter.as_ref(), &ctx.catalog);

    match field {
        Field::Classifiers => {
            let current = setup.list("classifiers")?;
            let chosen = questionnaire.classifiers(&current)?;
            ctx.editor.edit("classifiers", chosen, &path)?;
        }
        Field::User => {
            let (author, email) = questionnaire.user(&text("author"), &text("author_email"))?;
            ctx.editor.edit("author", author, &path)?;
            ctx.editor.edit("author_email", email, &path)?;
        }
        Field::License => {
            let current = text("license").parse().unwrap_or_else(|_| License::default());
            let chosen = questionnaire.license(current)?;
            ctx.assembler.relicense(chosen, ctx.dir())?;
        }
        Field::Keywords => {
            let keywords = questionnaire.keywords(&split_keywords(&text("keywords")))?;
            ctx.editor.edit("keywords", keywords.join(" "), &path)?;
        }
    }

    output.success("setup.py updated")?;
    Ok(())
}

fn to_json(value: &SetupValue) -> Value {
    match value {
        SetupValue::Str(s) | SetupValue::Expr(s) => json!(s),
        SetupValue::List(items) => json!(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_become_json_arrays() {
        let value = SetupValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(to_json(&value), json!(["a", "b"]));
        assert_eq!(to_json(&SetupValue::from("MIT License")), json!("MIT License"));
    }
}
