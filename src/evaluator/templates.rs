use super::error::EvaluationError;
use crate::environment::AmbientEnvironment;
use regex::Regex;
use std::sync::OnceLock;

/// Regex that extracts environment placeholders from a string.
///
/// Example:
///
/// ```
/// use regex::Regex;
///
/// const TEMPLATE_RE: &str = r"\$\{env:([a-zA-Z_][a-zA-Z0-9_]*)\}";
/// let re = Regex::new(TEMPLATE_RE).unwrap();
/// let content = "${env:HOME}/RNAseq_web";
///
/// let result = re.find_iter(content).map(|i| i.as_str()).collect::<Vec<_>>();
///
/// assert_eq!(result, vec!["${env:HOME}"]);
/// ```
const TEMPLATE_RE: &str = r"\$\{env:([a-zA-Z_][a-zA-Z0-9_]*)\}";

fn template_re() -> &'static Regex {
    static RE_ONCE: OnceLock<Regex> = OnceLock::new();
    RE_ONCE.get_or_init(|| Regex::new(TEMPLATE_RE).unwrap())
}

/// Replaces every `${env:NAME}` in `s` with the value of `NAME` in the ambient snapshot.
///
/// Substituted values are not scanned again. Referencing a variable that is absent or empty
/// fails with [`EvaluationError::MissingEnvironment`].
pub fn template_with(s: &str, ambient: &AmbientEnvironment) -> Result<String, EvaluationError> {
    let mut templated = String::with_capacity(s.len());
    let mut last = 0;

    for captured in template_re().captures_iter(s) {
        let (Some(placeholder), Some(var_name)) = (captured.get(0), captured.get(1)) else {
            continue;
        };
        let value = ambient
            .non_empty(var_name.as_str())
            .ok_or_else(|| EvaluationError::MissingEnvironment(var_name.as_str().to_string()))?;

        templated.push_str(&s[last..placeholder.start()]);
        templated.push_str(value);
        last = placeholder.end();
    }
    templated.push_str(&s[last..]);

    Ok(templated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ambient() -> AmbientEnvironment {
        AmbientEnvironment::from([
            ("HOME", "/home/alice"),
            ("APP_PORT", "8000"),
            ("LOOP", "${env:HOME}"),
            ("EMPTY", ""),
        ])
    }

    #[test]
    fn test_template_string() {
        let actual = template_with(
            "--bind 0.0.0.0:${env:APP_PORT} --chdir ${env:HOME}/app ${UNTOUCHED}",
            &ambient(),
        )
        .unwrap();
        assert_eq!(
            actual,
            "--bind 0.0.0.0:8000 --chdir /home/alice/app ${UNTOUCHED}"
        );
    }

    #[test]
    fn no_placeholder_is_identity() {
        assert_eq!(
            template_with("app:app", &ambient()).unwrap(),
            "app:app".to_string()
        );
        assert_eq!(template_with("", &ambient()).unwrap(), String::new());
    }

    #[test]
    fn substituted_values_are_not_templated_again() {
        assert_eq!(
            template_with("${env:LOOP}", &ambient()).unwrap(),
            "${env:HOME}"
        );
    }

    #[test]
    fn malformed_placeholders_are_untouched() {
        let input = "${env:} ${var:HOME} ${environ:HOME} ${env:9BAD} $env:HOME";
        assert_eq!(template_with(input, &ambient()).unwrap(), input);
    }

    #[test]
    fn missing_or_empty_variables_fail() {
        assert_matches!(
            template_with("${env:NOT_SET}", &ambient()),
            Err(EvaluationError::MissingEnvironment(name)) => assert_eq!(name, "NOT_SET")
        );
        assert_matches!(
            template_with("prefix-${env:EMPTY}", &ambient()),
            Err(EvaluationError::MissingEnvironment(name)) => assert_eq!(name, "EMPTY")
        );
    }
}
