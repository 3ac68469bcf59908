//! Integration tests for command sources

#[cfg(test)]
mod tests {
    use procpool_errors::SourceError;
    use procpool_source::*;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in ["a.csv", "b.csv", "notes.txt", "2024/jan.csv", "2024/q1/feb.csv"] {
            touch(dir.path(), file);
        }
        dir
    }

    fn relative(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let dir = fixture();
        let found = expand_patterns(dir.path(), &["*.csv"]).unwrap();
        assert_eq!(relative(dir.path(), found), vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_double_star_recurses() {
        let dir = fixture();
        let found = expand_patterns(dir.path(), &["**/*.csv"]).unwrap();
        assert_eq!(
            relative(dir.path(), found),
            vec!["2024/jan.csv", "2024/q1/feb.csv", "a.csv", "b.csv"]
        );
    }

    #[test]
    fn test_overlapping_patterns_are_deduplicated() {
        let dir = fixture();
        let found = expand_patterns(dir.path(), &["a.*", "*.csv", "notes.txt"]).unwrap();
        assert_eq!(
            relative(dir.path(), found),
            vec!["a.csv", "b.csv", "notes.txt"]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = fixture();
        let err = expand_patterns(dir.path(), &["[unclosed"]).unwrap_err();
        assert!(matches!(err, SourceError::InvalidPattern { pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = expand_patterns(&dir.path().join("absent"), &["*"]).unwrap_err();
        assert!(matches!(err, SourceError::WalkFailed { .. }));
    }

    #[test]
    fn test_template_over_expanded_paths() {
        let dir = fixture();
        let found = expand_patterns(dir.path(), &["2024/*.csv"]).unwrap();
        let template = CommandTemplate::parse("gzip {}").unwrap();
        let commands = template.render_all(&found);
        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with("gzip "));
        assert!(commands[0].ends_with("2024/jan.csv"));
    }

    #[test]
    fn test_read_command_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# batch\nsleep 1\nexit 3\n").unwrap();

        let commands = read_command_file(file.path()).unwrap();
        assert_eq!(commands, vec!["sleep 1", "exit 3"]);

        let err = read_command_file(Path::new("/nonexistent/procpool/cmds")).unwrap_err();
        assert!(matches!(err, SourceError::ReadFailed { .. }));
    }
}
