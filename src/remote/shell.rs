// ABOUTME: POSIX shell quoting for paths and arguments sent to the remote host.
// ABOUTME: Keeps a leading ~ expandable while quoting everything else.

/// Quote a single shell word with single quotes.
pub fn quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Quote a remote path, leaving a leading `~` or `~/` to the shell as `$HOME`.
pub fn quote_path(path: &str) -> String {
    if path == "~" {
        return "\"$HOME\"".to_string();
    }
    match path.strip_prefix("~/") {
        Some("") => "\"$HOME\"/".to_string(),
        Some(rest) => format!("\"$HOME\"/{}", quote(rest)),
        None => quote(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_pass_through() {
        assert_eq!(quote("/srv/apps/demo"), "/srv/apps/demo");
        assert_eq!(quote("demo.service"), "demo.service");
    }

    #[test]
    fn spaces_and_quotes_are_escaped() {
        assert_eq!(quote("my app"), "'my app'");
        assert_eq!(quote("it's"), "'it'\\''s'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn home_prefix_stays_expandable() {
        assert_eq!(quote_path("~"), "\"$HOME\"");
        assert_eq!(quote_path("~/apps/demo"), "\"$HOME\"/apps/demo");
        assert_eq!(quote_path("~/my apps"), "\"$HOME\"/'my apps'");
        assert_eq!(quote_path("/opt/demo"), "/opt/demo");
    }

    #[test]
    fn tilde_inside_path_is_quoted_literally() {
        assert_eq!(quote_path("/tmp/~x y"), "'/tmp/~x y'");
    }
}
