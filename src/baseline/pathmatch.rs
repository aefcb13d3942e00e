// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Path comparison rules shared by every baseline kind.

use super::ignoresetrecord::ImaIgnoreSetRecord;
use super::policy::ImaPolicy;
use super::record::BaselineRecord;

/// The file name component of `path`: everything after the last `/`.  The
/// root directory has an empty partial path.
pub fn partial_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// A path is partial when it is not anchored at the root
pub fn is_partial_path(path: &str) -> bool {
    !path.starts_with('/')
}

/// Decide whether a measured path and a baseline path name the same file.
///
/// Full paths match when equal, possibly after swapping one equivalent
/// prefix for another.  With partial path matching enabled, any two paths
/// with the same (non-empty) file name match.
pub fn paths_match(measured: &str, baseline: &str, policy: &ImaPolicy) -> bool {
    if measured == baseline {
        return true;
    }

    if policy
        .path_equivalences
        .equivalent_paths(measured)
        .iter()
        .any(|p| p == baseline)
    {
        return true;
    }

    if !policy.partial_path_enable {
        return false;
    }

    let p = partial_path(measured);

    !p.is_empty() && p == partial_path(baseline)
}

/// Regex flavour of [`paths_match`] used by ignore-set records: the pattern
/// has to cover the whole measured path (or one of its equivalent
/// spellings).  Literal file name patterns are also compared with the
/// measured file name when partial path matching is enabled.
pub fn pattern_matches(record: &ImaIgnoreSetRecord, measured: &str, policy: &ImaPolicy) -> bool {
    if policy
        .path_equivalences
        .equivalent_paths(measured)
        .iter()
        .any(|p| record.is_full_match(p))
    {
        return true;
    }

    policy.partial_path_enable
        && record.is_literal_filename()
        && record.pattern() == partial_path(measured)
}

/// Whether `record` is reachable from `measured` by path.  Records that
/// carry no path (digest-only blacklist entries) never match by path.
pub fn record_matches_path(record: &BaselineRecord, measured: &str, policy: &ImaPolicy) -> bool {
    match record {
        BaselineRecord::IgnoreSet(r) => pattern_matches(r, measured, policy),
        other => other
            .path()
            .map(|p| paths_match(measured, p, policy))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::policy::PathEquivalences;

    fn policy(partial: bool) -> ImaPolicy {
        ImaPolicy {
            partial_path_enable: partial,
            ..Default::default()
        }
    }

    #[test]
    fn partial_paths() {
        assert_eq!(partial_path("/usr/bin/foo"), "foo");
        assert_eq!(partial_path("/"), "");
        assert_eq!(partial_path("foo"), "foo");
        assert_eq!(partial_path("/usr/bin/"), "");
    }

    #[test]
    fn exact_match_regardless_of_partial_setting() {
        assert!(paths_match("/usr/bin/foo", "/usr/bin/foo", &policy(false)));
        assert!(paths_match("/usr/bin/foo", "/usr/bin/foo", &policy(true)));
        assert!(paths_match("foo", "foo", &policy(false)));
    }

    #[test]
    fn partial_match_needs_policy() {
        assert!(paths_match("gradle", "/usr/bin/gradle", &policy(true)));
        assert!(paths_match("/usr/bin/gradle", "gradle", &policy(true)));
        assert!(!paths_match("gradle", "/usr/bin/gradle", &policy(false)));
        assert!(!paths_match("gradle", "/usr/bin/gradlew", &policy(true)));
    }

    #[test]
    fn full_paths_match_by_file_name() {
        assert!(paths_match("/var/tmp/evil", "/tmp/evil", &policy(true)));
        assert!(!paths_match("/var/tmp/evil", "/tmp/evil", &policy(false)));
        assert!(!paths_match("/usr/bin/", "/tmp/", &policy(true)));
    }

    #[test]
    fn equivalent_prefixes_are_symmetric() {
        let p = policy(false);

        assert!(paths_match("/bin/ls", "/usr/bin/ls", &p));
        assert!(paths_match("/usr/bin/ls", "/bin/ls", &p));
        assert!(!paths_match("/opt/bin/ls", "/usr/bin/ls", &p));
    }

    #[test]
    fn injected_table_replaces_default() {
        let p = ImaPolicy {
            partial_path_enable: false,
            path_equivalences: PathEquivalences::parse("/opt/a/ /opt/b/").unwrap(),
            ..Default::default()
        };

        assert!(paths_match("/opt/a/x", "/opt/b/x", &p));
        assert!(!paths_match("/bin/ls", "/usr/bin/ls", &p));
    }

    #[test]
    fn regex_pattern_uses_full_path() {
        let r = ImaIgnoreSetRecord::new(r".*\/bin\/.*\.pyc", None).unwrap();
        let p = policy(true);

        assert!(pattern_matches(&r, "/usr/bin/scripts/runner.pyc", &p));
        assert!(!pattern_matches(&r, "/usr/bin/scripts/runner.py", &p));
    }

    #[test]
    fn bare_filename_pattern() {
        let r = ImaIgnoreSetRecord::new("gradlew", None).unwrap();

        assert!(pattern_matches(&r, "/usr/bin/gradlew", &policy(true)));
        assert!(!pattern_matches(&r, "/usr/bin/gradlew", &policy(false)));
        assert!(pattern_matches(&r, "gradlew", &policy(false)));
    }

    #[test]
    fn slash_free_regex_is_not_a_file_name() {
        let r = ImaIgnoreSetRecord::new(r"lib.*\.so", None).unwrap();
        let p = policy(true);

        assert!(!pattern_matches(&r, "/usr/lib/libevil.so", &p));
        assert!(pattern_matches(&r, "libevil.so", &p));
    }

    #[test]
    fn pattern_sees_equivalent_paths() {
        let r = ImaIgnoreSetRecord::new("/usr/bin/.*", None).unwrap();

        assert!(pattern_matches(&r, "/bin/ls", &policy(false)));
    }
}
