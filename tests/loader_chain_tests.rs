//! Loader URL walker tests

use std::sync::Arc;

use memfm::{collect_urls, ClassLoader, OpaqueClassLoader, Url, UrlClassLoader};

fn urls(names: &[&str]) -> Vec<Url> {
    names.iter().map(|n| Url::from(*n)).collect()
}

#[test]
fn test_skips_loader_without_urls() {
    // L0 -> L1 -> L2, L1 exposes nothing
    let l2: Arc<dyn ClassLoader> = Arc::new(UrlClassLoader::new("L2", urls(&["u2"]), None));
    let l1: Arc<dyn ClassLoader> = Arc::new(OpaqueClassLoader::new("L1", Some(l2)));
    let l0 = UrlClassLoader::new("L0", urls(&["u0"]), Some(l1));

    assert_eq!(collect_urls(&l0), urls(&["u0", "u2"]));
}

#[test]
fn test_walk_starts_at_opaque_loader() {
    let parent: Arc<dyn ClassLoader> =
        Arc::new(UrlClassLoader::new("parent", urls(&["a.jar", "b.jar"]), None));
    let start = OpaqueClassLoader::new("custom", Some(parent));

    assert_eq!(collect_urls(&start), urls(&["a.jar", "b.jar"]));
}

#[test]
fn test_empty_url_loader_contributes_nothing() {
    let root: Arc<dyn ClassLoader> = Arc::new(UrlClassLoader::new("root", urls(&["root.jar"]), None));
    let empty: Arc<dyn ClassLoader> = Arc::new(UrlClassLoader::new("empty", vec![], Some(root)));
    let leaf = UrlClassLoader::new("leaf", urls(&["leaf.jar"]), Some(empty));

    assert_eq!(collect_urls(&leaf), urls(&["leaf.jar", "root.jar"]));
}

#[test]
fn test_long_chain_is_walked_to_the_root() {
    let mut loader: Arc<dyn ClassLoader> = Arc::new(OpaqueClassLoader::new("bootstrap", None));
    let mut expected = Vec::new();
    for depth in 0..64 {
        let name = format!("level{depth}.jar");
        expected.insert(0, Url::from(name.as_str()));
        loader = Arc::new(UrlClassLoader::new(
            format!("level{depth}"),
            vec![Url::from(name)],
            Some(loader),
        ));
    }

    assert_eq!(collect_urls(loader.as_ref()), expected);
}
