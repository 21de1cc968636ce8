// src/control/depends.rs

//! `Depends:` field splitting

/// Split a `Depends:` value into bare package names
///
/// Commas and pipes are both treated as separators, so alternatives
/// (`a | b`) come out as independent candidates. Version constraints are cut
/// at the first `(`. Order and duplicates are preserved; empty fragments are
/// skipped.
///
/// Format: "libc6 (>= 2.14), debconf (>= 0.5) | debconf-2.0"
pub fn split_depends(value: &str) -> Vec<String> {
    value
        .split([',', '|'])
        .map(|fragment| {
            let name = match fragment.find('(') {
                Some(paren_pos) => &fragment[..paren_pos],
                None => fragment,
            };
            name.trim()
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_versions_and_alternatives() {
        let deps = split_depends("libc6 (>= 2.14), debconf (>= 0.5) | debconf-2.0");
        assert_eq!(deps, vec!["libc6", "debconf", "debconf-2.0"]);
    }

    #[test]
    fn test_split_plain_list() {
        let deps = split_depends("bash, coreutils,zlib1g");
        assert_eq!(deps, vec!["bash", "coreutils", "zlib1g"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let deps = split_depends("perl (>= 5.10) | perl (<< 6)");
        assert_eq!(deps, vec!["perl", "perl"]);
    }

    #[test]
    fn test_empty_fragments_skipped() {
        assert!(split_depends("").is_empty());
        assert!(split_depends("  ").is_empty());
        assert_eq!(split_depends("a,, b |"), vec!["a", "b"]);
    }

    #[test]
    fn test_constraint_without_space() {
        let deps = split_depends("libssl3(>= 3.0.0)");
        assert_eq!(deps, vec!["libssl3"]);
    }
}
