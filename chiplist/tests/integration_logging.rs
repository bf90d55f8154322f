//! Rejected catalog operations leave a WARN line in the log.

use std::io::Write;
use std::sync::{Arc, Mutex};

use chiplist::{Catalog, CatalogConfig, Processor};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn logged(f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn warnings(log: &str) -> Vec<&str> {
    log.lines().filter(|line| line.contains("WARN")).collect()
}

fn cpu(name: &str) -> Processor {
    Processor {
        name: name.to_string(),
        cores: 4,
        threads: 4,
        node_nm: 22,
        base_clock_ghz: 3.2,
        boost_clock_ghz: 3.6,
        tdp_watts: 84,
        integrated_graphics: true,
    }
}

#[test]
fn test_zero_capacity_config_logs_warning() {
    let log = logged(|| {
        let config = CatalogConfig {
            capacity: 0,
            ..CatalogConfig::default()
        };
        assert!(Catalog::open(config).is_err());
    });

    let warnings = warnings(&log);
    assert_eq!(warnings.len(), 1, "log was:\n{log}");
    assert!(warnings[0].contains("rejected catalog config capacity=0"));
}

#[test]
fn test_rejected_record_through_catalog_logs_warning() {
    let temp_dir = tempdir().unwrap();
    let log = logged(|| {
        let mut catalog = Catalog::open(CatalogConfig {
            capacity: 3,
            dump_path: temp_dir.path().join("catalog.txt"),
        })
        .unwrap();

        let mut long_name = cpu("A");
        long_name.name = "X".repeat(20);
        assert!(catalog.append(long_name).is_err());
        assert_eq!(catalog.len().unwrap(), 0);
    });

    let warnings = warnings(&log);
    assert_eq!(warnings.len(), 1, "log was:\n{log}");
    assert!(warnings[0].contains("rejected invalid record"));
}

#[test]
fn test_failed_restore_logs_warning() {
    let temp_dir = tempdir().unwrap();
    let dump_path = temp_dir.path().join("catalog.txt");

    let log = logged(|| {
        let mut catalog = Catalog::open(CatalogConfig {
            capacity: 3,
            dump_path: dump_path.clone(),
        })
        .unwrap();

        // Missing file
        assert!(catalog.restore().is_err());

        // Malformed file
        std::fs::write(&dump_path, "Model 1: A\n  Cores: many\n").unwrap();
        assert!(catalog.restore().is_err());
        assert_eq!(catalog.len().unwrap(), 0);
    });

    let warnings = warnings(&log);
    assert_eq!(warnings.len(), 2, "log was:\n{log}");
    assert!(warnings.iter().all(|line| line.contains("rejected dump restore")));
    assert!(warnings[0].contains("failed to read dump"));
    assert!(warnings[1].contains("invalid Cores value 'many'"));
}
