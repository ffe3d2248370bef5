//! Quoting for generated shell scripts and desktop entries.

/// Quote a value for a POSIX shell as one single-quoted word.
///
/// Embedded single quotes become `'\''`; nothing else is special inside
/// single quotes.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Escape a desktop entry string value (`\s`-style escapes for line breaks and backslashes).
pub fn escape_desktop_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Quote one argument of a desktop entry `Exec` key.
///
/// The argument is wrapped in double quotes with `"`, `` ` ``, `$` and `\`
/// backslash-escaped, and `%` doubled so it is not read as a field code. The
/// result still has to pass through [`escape_desktop_value`] when written.
pub fn quote_exec_arg(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        match c {
            '"' | '`' | '$' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '%' => quoted.push_str("%%"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
