//! Command templates with path placeholders
//!
//! Placeholders:
//! - `{}`: the matched path
//! - `{name}`: its file name
//! - `{stem}`: its file name without the last extension
//! - `{dir}`: its parent directory (`.` when there is none)
//!
//! `{{` and `}}` produce literal braces. Substituted values are shell-quoted.
//! A template without placeholders gets the path appended.

use procpool_errors::SourceError;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Path,
    Name,
    Stem,
    Dir,
}

/// A parsed command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<Segment>,
}

impl CommandTemplate {
    /// Parse a template string
    ///
    /// # Errors
    ///
    /// Returns an error for a blank template or an unknown or unterminated
    /// placeholder.
    pub fn parse(template: &str) -> Result<Self, SourceError> {
        if template.trim().is_empty() {
            return Err(SourceError::EmptyTemplate);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(SourceError::UnknownPlaceholder { name });
                    }

                    let segment = match name.as_str() {
                        "" => Segment::Path,
                        "name" => Segment::Name,
                        "stem" => Segment::Stem,
                        "dir" => Segment::Dir,
                        _ => return Err(SourceError::UnknownPlaceholder { name }),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                _ => literal.push(c),
            }
        }

        let has_placeholder = segments.iter().any(|s| !matches!(s, Segment::Literal(_)));
        if !has_placeholder {
            if !literal.ends_with(' ') {
                literal.push(' ');
            }
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
            segments.push(Segment::Path);
        } else if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Render the command for one path
    #[must_use]
    pub fn render(&self, path: &Path) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Path => out.push_str(&shell_quote(&path.to_string_lossy())),
                Segment::Name => {
                    let name = path.file_name().map(|n| n.to_string_lossy());
                    out.push_str(&shell_quote(name.as_deref().unwrap_or("")));
                }
                Segment::Stem => {
                    let stem = path.file_stem().map(|n| n.to_string_lossy());
                    out.push_str(&shell_quote(stem.as_deref().unwrap_or("")));
                }
                Segment::Dir => {
                    let dir = match path.parent() {
                        Some(parent) if !parent.as_os_str().is_empty() => {
                            parent.to_string_lossy().into_owned()
                        }
                        _ => ".".to_string(),
                    };
                    out.push_str(&shell_quote(&dir));
                }
            }
        }
        out
    }

    /// Render one command per path, keeping the path order
    #[must_use]
    pub fn render_all<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<String> {
        paths.iter().map(|p| self.render(p.as_ref())).collect()
    }
}

impl FromStr for CommandTemplate {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Quote a value for POSIX shells
///
/// Values made only of characters the shell never interprets are returned
/// unchanged; anything else is single-quoted.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c);
    if !value.is_empty() && value.chars().all(safe) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_placeholders() {
        let template = CommandTemplate::parse("gzip -c {} > {dir}/{stem}.gz # {name}").unwrap();
        let cmd = template.render(Path::new("data/2024/jan.csv"));
        assert_eq!(cmd, "gzip -c data/2024/jan.csv > data/2024/jan.gz # jan.csv");
    }

    #[test]
    fn test_template_without_placeholder_appends_path() {
        let template = CommandTemplate::parse("wc -l").unwrap();
        assert_eq!(template.render(Path::new("a.txt")), "wc -l a.txt");
    }

    #[test]
    fn test_escaped_braces() {
        let template = CommandTemplate::parse("awk '{{print $1}}' {}").unwrap();
        assert_eq!(template.render(Path::new("f")), "awk '{print $1}' f");
    }

    #[test]
    fn test_paths_are_quoted() {
        let template = CommandTemplate::parse("cat {}").unwrap();
        assert_eq!(
            template.render(Path::new("my file's.txt")),
            r"cat 'my file'\''s.txt'"
        );
    }

    #[test]
    fn test_dir_defaults_to_dot() {
        let template = CommandTemplate::parse("ls {dir}").unwrap();
        assert_eq!(template.render(Path::new("top.txt")), "ls .");
    }

    #[test]
    fn test_unknown_and_unterminated_placeholders() {
        assert!(matches!(
            CommandTemplate::parse("echo {ext}"),
            Err(SourceError::UnknownPlaceholder { name }) if name == "ext"
        ));
        assert!(matches!(
            CommandTemplate::parse("echo {name"),
            Err(SourceError::UnknownPlaceholder { .. })
        ));
        assert!(matches!(
            CommandTemplate::parse("   "),
            Err(SourceError::EmptyTemplate)
        ));
    }

    #[test]
    fn test_render_all_keeps_order() {
        let template: CommandTemplate = "touch {}.done".parse().unwrap();
        let paths = vec![PathBuf::from("b"), PathBuf::from("a")];
        assert_eq!(template.render_all(&paths), vec!["touch b.done", "touch a.done"]);
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain-name_1.txt"), "plain-name_1.txt");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }
}
