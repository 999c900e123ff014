// Integration suite for the find-wallet engine: catalog loading and schema
// validation, matching properties over real and fixture catalogs, and the
// coordinator driven the way the presentation layer drives it.
mod support;

use anyhow::{Context, Result};
use find_wallet::{
    CapabilityKey, CatalogKey, FilterError, FilterMode, FilterState, MatchMode, ViewCoordinator,
    WalletCatalog, WalletId, load_catalog, match_wallets, personas, resolve_catalog_path,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use std::thread;
use support::{bundled_catalog, catalog_document, ids, manifest_path, wallet_json, write_catalog};
use tempfile::TempDir;

#[test]
fn bundled_catalog_loads_in_definition_order() {
    let catalog = bundled_catalog();
    assert_eq!(catalog.key(), &CatalogKey("find_wallet_2022_06".to_string()));
    let order: Vec<&str> = catalog.all().iter().map(|w| w.id.0.as_str()).collect();
    assert_eq!(order, ["metamask", "argent", "rainbow", "ledger", "trezor"]);

    let ledger = catalog
        .wallet(&WalletId("ledger".to_string()))
        .expect("ledger present");
    assert!(ledger.supports(CapabilityKey::Hardware));
    assert_eq!(ledger.display.icon.as_deref(), Some("wallets/ledger.png"));
}

#[test]
fn bundled_catalog_resolves_by_explicit_path() -> Result<()> {
    let path = manifest_path("data/wallet_catalog.json");
    assert_eq!(resolve_catalog_path(Some(path.as_path()))?, path);
    Ok(())
}

// The schema's capability list and the Rust enum must describe the same set.
#[test]
fn schema_capabilities_match_enum() -> Result<()> {
    let schema_path = manifest_path("schema/wallet_catalog.schema.json");
    let schema: Value = serde_json::from_str(&fs::read_to_string(&schema_path)?)?;
    let required: Vec<&str> = schema
        .pointer("/definitions/capabilities/required")
        .and_then(Value::as_array)
        .context("capabilities.required present")?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    let expected: Vec<&str> = CapabilityKey::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(required, expected);

    let properties: BTreeSet<&str> = schema
        .pointer("/definitions/capabilities/properties")
        .and_then(Value::as_object)
        .context("capabilities.properties present")?
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(properties, expected.into_iter().collect::<BTreeSet<_>>());
    Ok(())
}

#[test]
fn catalog_missing_capability_key_fails_at_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut wallet = wallet_json("partial", &[CapabilityKey::Ios]);
    wallet
        .get_mut("capabilities")
        .and_then(Value::as_object_mut)
        .context("capabilities object")?
        .remove("multisig");
    let path = write_catalog(dir.path(), &catalog_document(vec![wallet]))?;

    let err = load_catalog(&path).expect_err("incomplete capability map");
    assert_eq!(err.path, path);
    assert!(err.detail.contains("multisig"), "{}", err.detail);
    assert!(err.to_string().contains("failed to load"));
    Ok(())
}

#[test]
fn catalog_with_unknown_schema_version_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let mut document = catalog_document(vec![wallet_json("a", &[])]);
    document["schema_version"] = Value::String("wallet_catalog_v2".to_string());
    let path = write_catalog(dir.path(), &document)?;

    let err = load_catalog(&path).expect_err("unsupported version");
    assert!(err.detail.contains("wallet_catalog_v2"), "{}", err.detail);
    Ok(())
}

#[test]
fn catalog_with_duplicate_ids_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let document = catalog_document(vec![
        wallet_json("twin", &[CapabilityKey::Ios]),
        wallet_json("twin", &[CapabilityKey::Android]),
    ]);
    let path = write_catalog(dir.path(), &document)?;

    let err = load_catalog(&path).expect_err("duplicate ids");
    assert!(err.detail.contains("duplicate wallet id twin"), "{}", err.detail);
    Ok(())
}

#[test]
fn sibling_schema_directory_takes_precedence() -> Result<()> {
    let dir = TempDir::new()?;
    let mut schema: Value = serde_json::from_str(&fs::read_to_string(manifest_path(
        "schema/wallet_catalog.schema.json",
    ))?)?;
    schema["definitions"]["wallet"]["required"] = serde_json::json!(["id", "name", "url", "capabilities"]);
    fs::create_dir_all(dir.path().join("schema"))?;
    fs::write(
        dir.path().join("schema/wallet_catalog.schema.json"),
        serde_json::to_vec(&schema)?,
    )?;

    let path = write_catalog(dir.path(), &catalog_document(vec![wallet_json("nourl", &[])]))?;
    let err = load_catalog(&path).expect_err("local schema requires url");
    assert!(err.detail.contains("schema validation"), "{}", err.detail);
    Ok(())
}

#[test]
fn fixture_catalog_matches_documented_example() -> Result<()> {
    let document = catalog_document(vec![
        wallet_json("A", &[CapabilityKey::Ios, CapabilityKey::OpenSource]),
        wallet_json("B", &[CapabilityKey::Ios]),
        wallet_json("C", &[CapabilityKey::Android]),
    ]);
    // Uppercase ids would fail the file schema, so skip the file and validate the parsed document.
    let catalog = WalletCatalog::from_file(serde_json::from_value(document)?)?;
    let filters = FilterState::requiring([CapabilityKey::Ios, CapabilityKey::OpenSource]);

    let strict = match_wallets(&catalog, &filters, MatchMode::Strict);
    assert_eq!(ids(&strict), ["A"]);

    let soft = match_wallets(&catalog, &filters, MatchMode::Soft);
    assert_eq!(ids(&soft), ["A", "B", "C"]);
    let ratios: Vec<f64> = soft.iter().map(|r| r.ratio).collect();
    assert_eq!(ratios, [1.0, 0.5, 0.0]);
    Ok(())
}

// Exhaustive over every subset of a handful of keys: strict results are exact,
// soft results are ordered and stable, and empty filters list everything.
#[test]
fn match_properties_hold_over_filter_subsets() {
    let catalog = bundled_catalog();
    let pool = [
        CapabilityKey::Ios,
        CapabilityKey::Hardware,
        CapabilityKey::OpenSource,
        CapabilityKey::Staking,
        CapabilityKey::SocialRecovery,
        CapabilityKey::Firefox,
    ];

    for mask in 0u32..(1 << pool.len()) {
        let filters = FilterState::requiring(
            pool.iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, key)| *key),
        );
        let required: Vec<CapabilityKey> = filters.required().collect();

        let strict = match_wallets(&catalog, &filters, MatchMode::Strict);
        for result in &strict {
            assert_eq!(result.satisfied, required, "mask {mask:#b}");
        }
        let expected_strict: Vec<&str> = catalog
            .all()
            .iter()
            .filter(|w| required.iter().all(|k| w.supports(*k)))
            .map(|w| w.id.0.as_str())
            .collect();
        assert_eq!(ids(&strict), expected_strict, "mask {mask:#b}");

        let soft = match_wallets(&catalog, &filters, MatchMode::Soft);
        assert_eq!(soft.len(), catalog.len());
        for pair in soft.windows(2) {
            assert!(pair[0].ratio >= pair[1].ratio, "mask {mask:#b}");
            if pair[0].ratio == pair[1].ratio {
                assert!(pair[0].position < pair[1].position, "mask {mask:#b}");
            }
        }

        if required.is_empty() {
            for results in [&strict, &soft] {
                let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
                assert_eq!(positions, (0..catalog.len()).collect::<Vec<_>>());
                assert!(results.iter().all(|r| r.ratio == 1.0));
            }
        }
    }
}

#[test]
fn privacy_persona_over_bundled_catalog() {
    let mut view = ViewCoordinator::new(Arc::new(bundled_catalog()));
    view.apply_persona("privacy-focused").expect("known persona");
    assert_eq!(
        ids(view.results()),
        ["metamask", "argent", "rainbow", "trezor", "ledger"]
    );
    assert_eq!(view.results()[4].ratio, 0.5);

    view.select_mode(FilterMode::Feature);
    assert_eq!(ids(view.results()), ["metamask", "argent", "rainbow", "trezor"]);

    view.toggle_capability(CapabilityKey::Hardware).expect("feature tab");
    assert_eq!(ids(view.results()), ["trezor"]);
}

#[test]
fn every_persona_applies_over_bundled_catalog() {
    let mut view = ViewCoordinator::new(Arc::new(bundled_catalog()));
    for persona in personas() {
        view.apply_persona(persona.name).expect("table persona");
        let first = *view.filters();
        view.apply_persona(persona.name).expect("table persona");
        assert_eq!(*view.filters(), first, "{} not idempotent", persona.name);
        assert_eq!(view.filters().required_count(), persona.required.len());
        assert_eq!(view.results().len(), view.catalog().len());
    }
}

#[test]
fn unknown_persona_keeps_prior_state() {
    let mut view = ViewCoordinator::new(Arc::new(bundled_catalog()));
    view.apply_persona("developer").expect("known persona");
    let before = *view.filters();
    let snapshot_before = serde_json::to_value(view.snapshot()).expect("snapshot");

    let err = view.apply_persona("xyz").expect_err("unknown persona");
    assert_eq!(err, FilterError::UnknownPersona("xyz".to_string()));
    assert_eq!(*view.filters(), before);
    assert_eq!(
        serde_json::to_value(view.snapshot()).expect("snapshot"),
        snapshot_before
    );
}

// The catalog is shared read-only across independent views.
#[test]
fn catalog_is_shared_across_threads() {
    let catalog = Arc::new(bundled_catalog());
    let handles: Vec<_> = ["beginner", "investor", "nft-collector"]
        .into_iter()
        .map(|name| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let mut view = ViewCoordinator::new(catalog);
                view.apply_persona(name).expect("known persona");
                view.results()
                    .iter()
                    .map(|r| r.wallet.0.clone())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let order = handle.join().expect("worker finished");
        assert_eq!(order.len(), catalog.len());
    }
}
