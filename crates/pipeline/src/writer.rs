//! Output serialization and atomic file replacement.

use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use ordermill_aggregate::{CustomerDirectory, ItemCatalog};
use ordermill_core::{OutputError, ResolvedConfig};

/// Where the two aggregate views land on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub customers: PathBuf,
    pub items: PathBuf,
}

impl OutputPaths {
    /// Resolve the configured file names, optionally under a directory.
    ///
    /// The directory is not created here; writing into a missing one fails
    /// with an [`OutputError`].
    pub fn resolve(config: &ResolvedConfig, output_dir: Option<&Path>) -> Self {
        let place = |name: &str| match output_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        Self {
            customers: place(&config.output_customers),
            items: place(&config.output_items),
        }
    }
}

/// Borrowed key→value pairs serialized as a JSON object in pair order.
struct JsonMapView<'a, V: Serialize + ?Sized> {
    pairs: Vec<(&'a str, &'a V)>,
}

impl<V: Serialize + ?Sized> Serialize for JsonMapView<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serialize pairs per the configured key order and indentation.
///
/// `indent == 0` produces compact output with no embedded newlines; any
/// other width pretty-prints with that many spaces and a trailing newline.
fn render<V: Serialize + ?Sized>(
    mut pairs: Vec<(&str, &V)>,
    config: &ResolvedConfig,
    what: &'static str,
) -> Result<Vec<u8>, OutputError> {
    if config.sort_output {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
    }
    let view = JsonMapView { pairs };

    let mut buffer = Vec::new();
    let result = if config.indent == 0 {
        let mut serializer = serde_json::Serializer::new(&mut buffer);
        view.serialize(&mut serializer)
    } else {
        let indent = vec![b' '; config.indent];
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        view.serialize(&mut serializer)
    };
    result.map_err(|source| OutputError::Serialize { what, source })?;

    if config.indent > 0 {
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Write bytes via a temporary sibling, then rename over the destination.
///
/// The temporary lives in the destination directory so the rename stays on
/// one filesystem. A failed write never leaves a truncated file in place of
/// a previously valid one.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, bytes).map_err(|e| OutputError::unwritable(path, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(OutputError::unwritable(path, e));
    }
    Ok(())
}

/// Serialize and write both aggregate views.
///
/// Both destinations are attempted even when the first fails; the first
/// failure is returned once the second attempt has finished.
pub fn write_outputs(
    directory: &CustomerDirectory,
    catalog: &ItemCatalog,
    config: &ResolvedConfig,
    paths: &OutputPaths,
) -> Result<(), OutputError> {
    let customers = render(directory.iter().collect(), config, "customer directory")?;
    let items = render(catalog.iter().collect(), config, "item catalog")?;

    let mut first_failure = None;
    for (path, bytes) in [(&paths.customers, customers), (&paths.items, items)] {
        match write_atomic(path, &bytes) {
            Ok(()) => tracing::info!("created {}", path.display()),
            Err(e) => {
                tracing::error!("{e}");
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
    }
    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordermill_aggregate::{build_customer_directory, build_item_catalog};
    use ordermill_core::{ItemLine, LoadedOrder, OrderRecord, PhonePattern};

    fn order(index: usize, name: &str, phone: &str, items: &[(&str, f64)]) -> LoadedOrder {
        LoadedOrder {
            index,
            record: OrderRecord {
                timestamp: None,
                name: name.to_string(),
                phone: phone.to_string(),
                items: items
                    .iter()
                    .map(|(item, price)| ItemLine {
                        name: item.to_string(),
                        price: *price,
                    })
                    .collect(),
                notes: None,
            },
        }
    }

    fn sample_views() -> (CustomerDirectory, ItemCatalog) {
        let orders = vec![
            order(0, "Zoe", "999-555-0001", &[("Samosa", 5.0)]),
            order(1, "Ana", "111-555-0002", &[("Chai", 3.5), ("Dosa", 12.95)]),
        ];
        let (directory, _) = build_customer_directory(&orders, &PhonePattern::default());
        let (catalog, _) = build_item_catalog(&orders);
        (directory, catalog)
    }

    fn config_with(sort_output: bool, indent: usize) -> ResolvedConfig {
        ResolvedConfig {
            sort_output,
            indent,
            ..ResolvedConfig::default()
        }
    }

    #[test]
    fn sorted_output_orders_keys_lexicographically() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let text = std::fs::read_to_string(&paths.customers).unwrap();
        let first = text.find("111-555-0002").unwrap();
        let second = text.find("999-555-0001").unwrap();
        assert!(first < second, "keys were not sorted: {text}");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn unsorted_output_preserves_first_appearance_order() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(false, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let text = std::fs::read_to_string(&paths.items).unwrap();
        let samosa = text.find("Samosa").unwrap();
        let chai = text.find("Chai").unwrap();
        let dosa = text.find("Dosa").unwrap();
        assert!(samosa < chai && chai < dosa, "insertion order lost: {text}");
    }

    #[test]
    fn zero_indent_writes_compact_json() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 0);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        for path in [&paths.customers, &paths.items] {
            let text = std::fs::read_to_string(path).unwrap();
            assert!(!text.contains('\n'), "expected compact output: {text:?}");
        }
    }

    #[test]
    fn indent_width_matches_config() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 2);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let text = std::fs::read_to_string(&paths.customers).unwrap();
        assert!(text.contains("\n  \"111-555-0002\""), "got {text:?}");
    }

    #[test]
    fn empty_views_serialize_to_empty_objects() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(true, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(
            &CustomerDirectory::new(),
            &ItemCatalog::new(),
            &config,
            &paths,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&paths.customers).unwrap(), "{}\n");
        assert_eq!(std::fs::read_to_string(&paths.items).unwrap(), "{}\n");
    }

    #[test]
    fn item_stats_carry_price_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 0);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.items).unwrap()).unwrap();
        assert_eq!(value["Dosa"]["price"], 12.95);
        assert_eq!(value["Dosa"]["orders"], 1);
        assert_eq!(value["Samosa"]["price"], 5.0);
    }

    #[test]
    fn no_temporary_files_remain_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "found {leftovers:?}");
    }

    #[test]
    fn missing_directory_fails_but_attempts_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 4);
        let paths = OutputPaths {
            customers: dir.path().join("missing").join("customers.json"),
            items: dir.path().join("items.json"),
        };

        let err = write_outputs(&directory, &catalog, &config, &paths).unwrap_err();
        match err {
            OutputError::Unwritable { path, .. } => assert_eq!(path, paths.customers),
            other => panic!("expected Unwritable, got {other:?}"),
        }
        assert!(paths.items.exists(), "second output was not attempted");
    }

    #[test]
    fn blocked_destination_keeps_prior_contents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        // A non-empty directory at the destination lets the temporary write
        // succeed while the rename over it fails.
        std::fs::create_dir(&paths.customers).unwrap();
        std::fs::write(paths.customers.join("occupant"), "keep me").unwrap();

        let err = write_outputs(&directory, &catalog, &config, &paths).unwrap_err();
        match err {
            OutputError::Unwritable { path, .. } => assert_eq!(path, paths.customers),
            other => panic!("expected Unwritable, got {other:?}"),
        }
        assert_eq!(
            std::fs::read_to_string(paths.customers.join("occupant")).unwrap(),
            "keep me"
        );
        assert!(
            !dir.path().join("customers.json.tmp").exists(),
            "temporary file was left behind"
        );
        assert!(paths.items.exists(), "second output was not attempted");
    }

    #[test]
    fn rewriting_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let (directory, catalog) = sample_views();
        let config = config_with(true, 4);
        let paths = OutputPaths::resolve(&config, Some(dir.path()));

        std::fs::write(&paths.customers, "stale").unwrap();
        write_outputs(&directory, &catalog, &config, &paths).unwrap();

        let text = std::fs::read_to_string(&paths.customers).unwrap();
        assert!(text.contains("Ana"), "old content survived: {text:?}");
    }
}
