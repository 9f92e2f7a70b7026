//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists every tag library
//! URI the application can resolve, with the location each one maps to.
//!
//! ## Functionality
//!
//! - **Listing**: One `uri -> location` line per record, sorted by URI
//! - **Pattern Filtering**: Supports glob patterns over the URI
//! - **JSON Output**: `--json` prints the mapping in the format accepted by
//!   the `prebuilt_mapping` configuration key
//! - **Counting**: `--count` prints only the number of matching records
//!
//! This command is read-only.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use taglib_resolver::defaults::DEFAULT_CONFIG_FILENAME;
use taglib_resolver::record::Mapping;
use taglib_resolver::suggestions;

/// List every resolvable taglib URI
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the .taglib-resolver.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "TAGLIB_RESOLVER_CONFIG"
    )]
    pub config: PathBuf,

    /// Filter URIs by glob pattern (e.g., "urn:acme:*", "http://*").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Print the mapping as JSON.
    #[arg(long, conflicts_with = "count")]
    pub json: bool,

    /// Show only the total count of records.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let cache = super::load_cache(&args.config)?;
    let mapping = cache
        .mapping()
        .map_err(|e| suggestions::initialization_failed(&e))?;

    let selected = filter(mapping, args.pattern.as_deref())?;

    if args.count {
        println!("{}", selected.len());
        return Ok(());
    }

    if args.json {
        println!("{}", selected.to_json()?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No tag libraries found.");
        return Ok(());
    }

    for record in selected.sorted() {
        println!("{}", super::lookup::format_record(record));
    }
    println!();
    println!("{} tag librar{}", selected.len(), plural(selected.len()));

    Ok(())
}

/// Records whose URI matches `pattern`, or all of them.
fn filter(mapping: &Mapping, pattern: Option<&str>) -> Result<Mapping> {
    let Some(pattern) = pattern else {
        return Ok(mapping.clone());
    };
    let glob_pattern =
        glob::Pattern::new(pattern).map_err(|e| suggestions::invalid_glob(pattern, &e))?;
    Ok(mapping
        .iter()
        .filter(|record| glob_pattern.matches(&record.identifier))
        .cloned()
        .collect())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use taglib_resolver::record::LocationRecord;
    use tempfile::TempDir;

    fn sample_mapping() -> Mapping {
        [
            LocationRecord::direct("urn:acme:core", "/WEB-INF/core.tld"),
            LocationRecord::direct("urn:acme:fmt", "/WEB-INF/fmt.tld"),
            LocationRecord::archived("http://example.com/x", "/lib/x.jar", "META-INF/x.tld"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_filter_by_pattern() {
        let mapping = sample_mapping();
        let selected = filter(&mapping, Some("urn:acme:*")).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(!selected.contains("http://example.com/x"));

        assert_eq!(filter(&mapping, None).unwrap(), mapping);
    }

    #[test]
    fn test_filter_invalid_pattern() {
        let err = filter(&sample_mapping(), Some("[invalid")).unwrap_err();
        assert!(err.to_string().contains("Invalid glob pattern"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "y");
        assert_eq!(plural(0), "ies");
        assert_eq!(plural(3), "ies");
    }

    #[test]
    fn test_execute_missing_config() {
        let args = LsArgs {
            config: PathBuf::from("/nonexistent/.taglib-resolver.yaml"),
            pattern: None,
            json: false,
            count: false,
        };

        let result = execute(args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Configuration file not found"));
    }

    #[test]
    fn test_execute_json_and_count() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("webapp/WEB-INF")).unwrap();
        fs::write(
            temp_dir.path().join("webapp/WEB-INF/acme.tld"),
            "<taglib><uri>urn:acme:tags</uri></taglib>",
        )
        .unwrap();
        let config_path = temp_dir.path().join(".taglib-resolver.yaml");
        fs::write(&config_path, "web_root: webapp\n").unwrap();

        let args = LsArgs {
            config: config_path.clone(),
            pattern: None,
            json: true,
            count: false,
        };
        assert!(execute(args).is_ok());

        let args = LsArgs {
            config: config_path,
            pattern: Some("urn:*".to_string()),
            json: false,
            count: true,
        };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_execute_reports_initialization_failure() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("webapp/WEB-INF/tags")).unwrap();
        fs::write(
            temp_dir.path().join("webapp/WEB-INF/tags/custom.tld"),
            "<taglib><uri>urn:custom</uri></taglib>",
        )
        .unwrap();
        let config_path = temp_dir.path().join(".taglib-resolver.yaml");
        fs::write(&config_path, "web_root: webapp\n").unwrap();

        let args = LsArgs {
            config: config_path,
            pattern: None,
            json: false,
            count: false,
        };
        let err = execute(args).unwrap_err().to_string();
        assert!(err.contains("custom.tld"));
        assert!(err.contains("hint:"));
    }
}
