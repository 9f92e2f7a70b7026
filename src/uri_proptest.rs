//! Property-based tests for URI classification.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::uri::{basename, uri_type, UriType};
    use proptest::prelude::*;

    proptest! {
        /// Property: anything carrying a scheme separator is absolute
        #[test]
        fn uri_with_colon_is_absolute(prefix in "[a-z/]*", suffix in ".*") {
            let uri = format!("{}:{}", prefix, suffix);
            prop_assert_eq!(uri_type(&uri), UriType::Absolute);
        }

        /// Property: colon-free paths starting with '/' are root-relative
        #[test]
        fn colon_free_rooted_path_is_root_relative(rest in "[a-zA-Z0-9_./-]*") {
            let uri = format!("/{}", rest);
            prop_assert_eq!(uri_type(&uri), UriType::RootRelative);
        }

        /// Property: colon-free paths not starting with '/' are relative
        #[test]
        fn plain_path_is_relative(path in "[a-zA-Z0-9_.-][a-zA-Z0-9_./-]*") {
            prop_assert_eq!(uri_type(&path), UriType::Relative);
        }

        /// Property: basename never contains a separator and is a suffix of the input
        #[test]
        fn basename_is_separator_free_suffix(location in ".*") {
            let name = basename(&location);
            prop_assert!(!name.contains('/'));
            prop_assert!(location.ends_with(name));
        }
    }
}
