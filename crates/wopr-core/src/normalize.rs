//! Input canonicalization.

/// Reduce raw received text to a comparable token.
///
/// Removes every carriage return and line feed (not only trailing ones) and
/// upper-cases the rest. Interior whitespace is kept and nothing is
/// truncated, so `"help games"` and `"HELP  GAMES"` stay distinct.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\r' | '\n')).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn strips_line_endings_and_uppercases() {
        assert_eq!(normalize("joshua\r\n"), "JOSHUA");
        assert_eq!(normalize("help\ngames"), "HELPGAMES");
        assert_eq!(normalize("\r\n"), "");
    }

    #[test]
    fn keeps_interior_whitespace() {
        assert_eq!(normalize("list  games \r\n"), "LIST  GAMES ");
    }

    #[test]
    fn line_ending_and_case_insensitive() {
        assert_eq!(normalize("joshua\r\n"), normalize("JOSHUA"));
        assert_eq!(normalize("Help Logon\n"), normalize("HELP LOGON\r"));
    }

    proptest! {
        #[test]
        fn prop_idempotent(raw in "[ -~\r\n\tà-ÿ]*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_never_contains_line_breaks(raw in "[ -~\r\n\t]*") {
            let token = normalize(&raw);
            prop_assert!(!token.contains('\r'));
            prop_assert!(!token.contains('\n'));
        }

        #[test]
        fn prop_ignores_appended_line_endings(raw in "[a-zA-Z ]{0,16}", tail in "[\r\n]{0,4}") {
            prop_assert_eq!(normalize(&format!("{raw}{tail}")), normalize(&raw.to_uppercase()));
        }
    }
}
