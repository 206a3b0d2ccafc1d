//! The competitors file shipped in `config/` must always load.

use std::path::Path;

use rivalwatch_core::{load_competitors, TargetType};

#[test]
fn shipped_competitors_file_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/competitors.yaml");
    let file = load_competitors(&path).expect("config/competitors.yaml should load");

    assert!(!file.competitors.is_empty());
    let acme = &file.competitors[0];
    assert_eq!(acme.name, "Acme");
    assert_eq!(acme.targets[0].target_type, TargetType::Blog);
    assert!(acme.targets.iter().any(|t| !t.active));
}
