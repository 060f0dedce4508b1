//! Pull request title and description templates.
//!
//! Templates are rendered by `minijinja` with `${` and `}` as variable
//! delimiters, so `${target_branch}` and `${ pull_title }` both work and the
//! usual `{% if %}` blocks remain available. Comments use `{## ##}` so
//! Markdown heading anchors such as `{#usage}` stay literal. Undefined names
//! are errors.

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

use crate::github::error::BackportError;
use crate::github::identity::PullRequestNumber;

const TEMPLATE_NAME: &str = "pull";

/// Values available to the title and description templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    /// Number of the original pull request.
    pub pull_number: PullRequestNumber,
    /// Title of the original pull request.
    pub pull_title: &'a str,
    /// Branch the backport targets.
    pub target_branch: &'a str,
}

fn template_error(error: &minijinja::Error) -> BackportError {
    BackportError::Template {
        message: error.to_string(),
    }
}

fn environment(template: &str) -> Result<Environment<'_>, BackportError> {
    let syntax = SyntaxConfig::builder()
        .variable_delimiters("${", "}")
        .comment_delimiters("{##", "##}")
        .build()
        .map_err(|error| template_error(&error))?;

    let mut environment = Environment::new();
    environment.set_syntax(syntax);
    environment.set_auto_escape_callback(|_| AutoEscape::None);
    environment.set_undefined_behavior(UndefinedBehavior::Strict);
    environment.set_keep_trailing_newline(true);
    environment
        .add_template(TEMPLATE_NAME, template)
        .map_err(|error| template_error(&error))?;
    Ok(environment)
}

/// Renders `template` with `${pull_number}`, `${pull_title}`, and
/// `${target_branch}` bound.
///
/// # Errors
///
/// Returns [`BackportError::Template`] when the template does not parse or
/// references a name other than the three above.
pub fn render(template: &str, values: &TemplateValues<'_>) -> Result<String, BackportError> {
    let environment = environment(template)?;
    let compiled = environment
        .get_template(TEMPLATE_NAME)
        .map_err(|error| template_error(&error))?;
    compiled
        .render(context! {
            pull_number => values.pull_number.get(),
            pull_title => values.pull_title,
            target_branch => values.target_branch,
        })
        .map_err(|error| template_error(&error))
}

/// Checks that the template named `input` renders with sample values.
///
/// # Errors
///
/// Returns [`BackportError::Template`] naming `input` when rendering fails.
pub fn validate_template(input: &str, template: &str) -> Result<(), BackportError> {
    let sample = TemplateValues {
        pull_number: PullRequestNumber::new(1)?,
        pull_title: "title",
        target_branch: "branch",
    };
    render(template, &sample).map(|_| ()).map_err(|error| match error {
        BackportError::Template { message } => BackportError::Template {
            message: format!("{input}: {message}"),
        },
        other => other,
    })
}

/// Name of the branch that carries a backport.
#[must_use]
pub fn backport_branch_name(pull_number: PullRequestNumber, target_branch: &str) -> String {
    format!("backport-{pull_number}-to-{target_branch}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{TemplateValues, backport_branch_name, render, validate_template};
    use crate::github::error::BackportError;
    use crate::github::identity::PullRequestNumber;

    fn values() -> TemplateValues<'static> {
        TemplateValues {
            pull_number: PullRequestNumber::new(42).expect("number should be valid"),
            pull_title: "Fix the flux capacitor",
            target_branch: "release-1",
        }
    }

    #[rstest]
    #[case::title(
        "[Backport ${target_branch}] ${pull_title}",
        "[Backport release-1] Fix the flux capacitor"
    )]
    #[case::body(
        "Backport of #${pull_number} to `${target_branch}`.",
        "Backport of #42 to `release-1`."
    )]
    #[case::repeated("${pull_number}/${pull_number}", "42/42")]
    #[case::spaced("${ target_branch }", "release-1")]
    #[case::plain("no placeholders", "no placeholders")]
    #[case::trailing_newline("Backport of #${pull_number}\n", "Backport of #42\n")]
    #[case::heading_anchor("## Notes {#notes}", "## Notes {#notes}")]
    #[case::markup_kept("<b>${pull_title}</b> & more", "<b>Fix the flux capacitor</b> & more")]
    fn renders_placeholders(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(
            render(template, &values()).expect("template should render"),
            expected
        );
    }

    #[rstest]
    fn values_are_not_expanded_again() {
        let values = TemplateValues {
            pull_title: "Document ${target_branch}",
            ..values()
        };

        assert_eq!(
            render("${pull_title} on ${target_branch}", &values).expect("template should render"),
            "Document ${target_branch} on release-1"
        );
    }

    #[rstest]
    #[case::unknown("${issue_refs}")]
    #[case::unterminated("${pull_number")]
    #[case::empty_name("${}")]
    fn bad_templates_are_rejected(#[case] template: &str) {
        let result = render(template, &values());

        assert!(
            matches!(result, Err(BackportError::Template { .. })),
            "got {result:?}"
        );
    }

    #[rstest]
    fn validation_names_the_input() {
        let error = validate_template("pull_title", "${nope}").expect_err("should fail");

        match error {
            BackportError::Template { message } => {
                assert!(message.starts_with("pull_title: "), "{message}");
            }
            other => panic!("expected Template error, got {other:?}"),
        }
    }

    #[rstest]
    fn names_backport_branch() {
        let number = PullRequestNumber::new(7).expect("number should be valid");

        assert_eq!(backport_branch_name(number, "stable"), "backport-7-to-stable");
    }
}
