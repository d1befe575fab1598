//! Property-based tests for branch name normalization.
//!
//! Whatever the model returns, the normalizer must produce `<type>/<slug>`
//! with a well-formed (or empty) slug, and feeding its output back in must
//! not change it.

use flowname::ai::normalize::{
    extract_explanation, is_valid_branch_name, normalize_branch_name, slug_of,
};
use flowname::core::branch_type::{BranchTag, BranchType};
use proptest::prelude::*;

fn branch_type_strategy() -> impl Strategy<Value = BranchType> {
    prop::sample::select(BranchType::all().to_vec())
}

/// Raw completions: arbitrary text, with or without the markers
fn completion_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ -~]{0,40}".prop_map(|s| format!("BRANCH: {s}\nEXPLANATION: ok")),
        "[A-Za-z0-9 _./!-]{0,40}".prop_map(|s| format!("Sure!\nbranch:\t{s}\r\n")),
    ]
}

fn slug_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: output is always `<type>/` followed by an empty or well-formed slug.
    #[test]
    fn output_matches_branch_grammar(
        raw in completion_strategy(),
        branch_type in branch_type_strategy()
    ) {
        let name = normalize_branch_name(&raw, branch_type);

        let slug = slug_of(&name, branch_type);
        prop_assert!(slug.is_some(), "missing prefix: {name}");
        let slug = slug.unwrap_or_default();
        prop_assert!(slug.is_empty() || is_valid_branch_name(&name, branch_type), "bad slug: {name}");
        prop_assert!(!name.contains("--"));
        prop_assert!(!name.ends_with('-'));
    }

    /// Property: normalizing an already normalized name is a no-op.
    #[test]
    fn normalization_is_idempotent(
        raw in completion_strategy(),
        branch_type in branch_type_strategy()
    ) {
        let once = normalize_branch_name(&raw, branch_type);
        let twice = normalize_branch_name(&once, branch_type);

        prop_assert_eq!(once, twice);
    }

    /// Property: a well-formed name for the requested type passes through unchanged.
    #[test]
    fn well_formed_names_are_preserved(
        slug in slug_strategy(),
        branch_type in branch_type_strategy()
    ) {
        let expected = format!("{branch_type}/{slug}");
        let raw = format!("BRANCH: {expected}\nEXPLANATION: Fine.");

        prop_assert_eq!(normalize_branch_name(&raw, branch_type), expected);
    }

    /// Property: any caller-supplied tag yields a well-formed prefix and a stable name.
    #[test]
    fn unregistered_tags_keep_the_grammar(
        raw_tag in "[A-Za-z0-9 _/.-]{0,12}",
        raw in completion_strategy()
    ) {
        let tag = BranchTag::parse(&raw_tag);
        prop_assert!(!tag.as_str().is_empty());
        prop_assert!(tag
            .as_str()
            .split('-')
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())));

        let name = normalize_branch_name(&raw, &tag);
        let slug = slug_of(&name, &tag).unwrap_or("-");
        prop_assert!(slug.is_empty() || is_valid_branch_name(&name, &tag), "bad name: {name}");
        prop_assert_eq!(normalize_branch_name(&name, &tag), name);
    }

    /// Property: the explanation is never empty.
    #[test]
    fn explanation_is_never_empty(raw in any::<String>()) {
        prop_assert!(!extract_explanation(&raw).is_empty());
    }
}
