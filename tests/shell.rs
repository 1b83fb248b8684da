// Files the browser shell loads at runtime must exist and be copied by trunk.
#![cfg(not(target_arch = "wasm32"))]

use std::path::Path;

use tap_grid::config::{MANIFEST, REWARD_IMAGE, SERVICE_WORKER};

const INDEX_HTML: &str = include_str!("../index.html");
const WORKER_JS: &str = include_str!("../static/service-worker.js");

fn root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn reward_image_ships_in_the_copied_assets_dir() {
    assert!(root().join(REWARD_IMAGE).is_file(), "{REWARD_IMAGE} missing");
    assert!(REWARD_IMAGE.starts_with("assets/"));
    assert!(INDEX_HTML.contains(r#"<link data-trunk rel="copy-dir" href="assets" />"#));
}

#[test]
fn manifest_and_worker_are_copied_to_the_root() {
    for file in [MANIFEST, SERVICE_WORKER] {
        assert!(root().join("static").join(file).is_file(), "{file} missing");
        let link = format!(r#"<link data-trunk rel="copy-file" href="static/{file}" />"#);
        assert!(INDEX_HTML.contains(&link), "index.html does not copy {file}");
    }
    assert!(INDEX_HTML.contains(&format!(r#"<link rel="manifest" href="{MANIFEST}" />"#)));
}

#[test]
fn manifest_icons_and_worker_cache_point_at_shipped_files() {
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root().join("static").join(MANIFEST)).unwrap())
            .unwrap();
    let icons = manifest["icons"].as_array().expect("icons");
    assert!(!icons.is_empty());
    for icon in icons {
        let src = icon["src"].as_str().expect("icon src");
        assert!(root().join(src).is_file(), "{src} missing");
    }
    assert!(WORKER_JS.contains(&format!("'./{REWARD_IMAGE}'")));
}
