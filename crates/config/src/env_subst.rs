/// Expand `${VAR}` references in raw config text from the process
/// environment.
///
/// Runs over the whole file before parsing, so any string value can carry a
/// reference — in practice `place_api_key`, which deployments keep out of
/// checked-in config files. A reference to an unset variable stays literal,
/// so the eventual parse or connect error still names it.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            // `${}` or an unterminated reference is not ours to rewrite.
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| match name {
            "MINAB_TEST_KEY" => Some("pk_live_123".to_string()),
            _ => None,
        };
        assert_eq!(
            substitute_env_with("place_api_key = \"${MINAB_TEST_KEY}\"", lookup),
            "place_api_key = \"pk_live_123\""
        );
    }

    #[test]
    fn leaves_unknown_var() {
        let lookup = |_: &str| None;
        assert_eq!(
            substitute_env_with("${MINAB_NONEXISTENT_XYZ}", lookup),
            "${MINAB_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn substitutes_multiple_references_in_one_value() {
        let lookup = |name: &str| match name {
            "HOST" => Some("graph.minab.app".to_string()),
            "PORT" => Some("443".to_string()),
            _ => None,
        };
        assert_eq!(
            substitute_env_with("https://${HOST}:${PORT}/v1/graphql", lookup),
            "https://graph.minab.app:443/v1/graphql"
        );
    }

    #[test]
    fn empty_or_unterminated_reference_stays_literal() {
        assert_eq!(
            substitute_env_with("a ${} b", |_| Some("x".to_string())),
            "a ${} b"
        );
        assert_eq!(substitute_env_with("tail ${OPEN", |_| None), "tail ${OPEN");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
