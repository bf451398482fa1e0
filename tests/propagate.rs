//! End-to-end rewrite scenarios driven through the public API.

use structveil::{
    discover_records, obfuscate_path, obfuscate_source, NameGenerator, ObfuscateOptions,
    Propagator, RenameReport,
};

fn run(source: &str, seed: u64) -> (String, RenameReport) {
    let options = ObfuscateOptions::new().seed(seed);
    obfuscate_source(source, &options).expect("source should parse")
}

#[test]
fn pointer_literal_scenario() {
    // `p := &Point{x: 1, y: 2}` in the source language of the original tool.
    let source = r#"
        struct Point { shield_power: i64, hull_mass: i64 }
        fn build() {
            let p = &Point { shield_power: 1, hull_mass: 2 };
        }
    "#;
    let (out, report) = run(source, 10);
    let record = &report.records[0];
    let type_name = record.opaque_name.as_deref().unwrap();
    let shield = record.fields[0].opaque_name.as_deref().unwrap();
    let hull = record.fields[1].opaque_name.as_deref().unwrap();

    assert!(out.contains(&format!("&{type_name}")));
    assert!(out.contains(&format!("{shield}: 1")));
    assert!(out.contains(&format!("{hull}: 2")));
    assert!(!out.contains("Point"));
    assert!(!out.contains("shield_power"));
    assert!(!out.contains("hull_mass"));
}

#[test]
fn qualified_literal_renames_selector_only() {
    let source = r#"
        struct Point { shield_power: i64 }
        fn build() {
            let mut p;
            p = other::Point { shield_power: 1 };
        }
    "#;
    let (out, report) = run(source, 11);
    let type_name = report.records[0].opaque_name.as_deref().unwrap();
    // The package qualifier survives; only the final segment is opaque.
    assert!(out.contains(&format!("other::{type_name}")));
    assert!(!out.contains("other::Point"));
}

#[test]
fn address_of_qualified_literal_is_rewritten() {
    let source = r#"
        struct Point { shield_power: i64, hull_mass: i64 }
        fn build() {
            let mut p;
            p = &other::Point { shield_power: 1, hull_mass: 2 };
        }
    "#;
    let (out, report) = run(source, 18);
    let record = &report.records[0];
    let type_name = record.opaque_name.as_deref().unwrap();
    let shield = record.fields[0].opaque_name.as_deref().unwrap();
    let hull = record.fields[1].opaque_name.as_deref().unwrap();

    assert!(out.contains(&format!("&other::{type_name}")));
    assert!(out.contains(&format!("{shield}: 1")));
    assert!(out.contains(&format!("{hull}: 2")));
    assert!(!out.contains("Point"));
}

#[test]
fn top_level_initializers_are_rewritten() {
    let source = r#"
        struct Point { shield_power: i64 }
        static ORIGIN: Point = Point { shield_power: 0 };
        const UNIT: Point = Point { shield_power: 1 };
    "#;
    let (out, report) = run(source, 12);
    let record = &report.records[0];
    let type_name = record.opaque_name.as_deref().unwrap();
    let shield = record.fields[0].opaque_name.as_deref().unwrap();

    assert!(!out.contains("Point"));
    assert!(out.contains(&format!("ORIGIN: {type_name}")));
    assert!(out.contains(&format!("UNIT: {type_name}")));
    assert!(out.contains(&format!("{shield}: 0")));
    assert!(out.contains(&format!("{shield}: 1")));
}

#[test]
fn nested_declarations_share_the_top_level_path() {
    let source = r#"
        struct Point { shield_power: i64 }
        fn build() {
            static ORIGIN: Point = Point { shield_power: 0 };
            let q: Point;
        }
    "#;
    let (out, _) = run(source, 13);
    assert!(!out.contains("Point"));
}

#[test]
fn occurrence_before_declaration_is_still_consistent() {
    // Items are order-independent in the host language, so the literal may
    // come first. Type and keys must still be renamed together.
    let source = r#"
        fn build() {
            let p = Point { shield_power: 1 };
        }
        struct Point { shield_power: i64 }
    "#;
    let (out, report) = run(source, 14);
    let shield = report.records[0].fields[0].opaque_name.as_deref().unwrap();
    assert!(!out.contains("Point"));
    assert!(!out.contains("shield_power"));
    assert!(out.contains(&format!("{shield}: 1")));
}

#[test]
fn records_sharing_field_names_do_not_interfere() {
    let source = r#"
        struct Alpha { count: u32 }
        struct Beta { count: u32 }
        fn build() {
            let a = Alpha { count: 1 };
            let b = Beta { count: 2 };
        }
    "#;
    let (out, report) = run(source, 15);
    let alpha_count = report.records[0].fields[0].opaque_name.as_deref().unwrap();
    let beta_count = report.records[1].fields[0].opaque_name.as_deref().unwrap();

    assert_ne!(alpha_count, beta_count);
    assert!(!out.contains("count"));
    assert!(out.contains(&format!("{alpha_count}: 1")));
    assert!(out.contains(&format!("{beta_count}: 2")));
}

#[test]
fn second_propagation_is_a_noop() {
    let mut file: syn::File = syn::parse_file(
        r#"
        struct Point { shield_power: i64 }
        fn build() {
            let p = Point { shield_power: 1 };
        }
    "#,
    )
    .unwrap();
    let mut names = NameGenerator::with_seed(16, 5);
    let mut records = discover_records(&file);

    Propagator::new(&mut records[0], &mut names).run(&mut file);
    let first = prettyplease::unparse(&file);

    Propagator::new(&mut records[0], &mut names).run(&mut file);
    let second = prettyplease::unparse(&file);

    assert_eq!(first, second);
}

#[test]
fn obfuscate_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.rs");
    std::fs::write(&path, "struct Point { shield_power: i64 }\n").unwrap();

    let options = ObfuscateOptions::new().seed(17);
    let (out, report) = obfuscate_path(&path, &options).unwrap();
    assert!(!out.contains("Point"));
    assert_eq!(report.records.len(), 1);

    let missing = dir.path().join("missing.rs");
    assert!(obfuscate_path(&missing, &options).is_err());
}
