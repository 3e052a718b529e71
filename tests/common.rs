// Common test utilities
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use memfm::{
    Archive, ArchiveRegistry, ClassLoader, Config, Error, MemoryArchive, OpaqueClassLoader,
    ResolvableHandle, Result, Url, UrlClassLoader, VirtualFileManager,
};

/// Platform library with a couple of java.lang classes
pub fn runtime_archive() -> Arc<MemoryArchive> {
    Arc::new(
        MemoryArchive::new("rt.jar")
            .with_entry("java/lang/Object.class", vec![0xCAu8, 0xFE, 0xBA, 0xBE])
            .with_entry("java/lang/String.class", vec![0xCAu8, 0xFE, 0xBA, 0xBE])
            .with_entry("java/util/List.class", vec![0xCAu8, 0xFE, 0xBA, 0xBE]),
    )
}

/// User library with nested packages and a resource
pub fn app_archive() -> Arc<MemoryArchive> {
    Arc::new(
        MemoryArchive::new("app.jar")
            .with_entry("com/foo/Foo.class", vec![1u8])
            .with_entry("com/foo/Helper.class", vec![2u8])
            .with_entry("com/foo/bar/Bar.class", vec![3u8])
            .with_entry("com/foo/bar/baz/Baz.class", vec![4u8])
            .with_entry("com/foobar/Other.class", vec![5u8])
            .with_entry("com/foo/messages.properties", b"greeting=hi".to_vec()),
    )
}

/// `app` (app.jar) -> `platform` (no URLs) -> `bootstrap` (no URLs)
pub fn app_loader() -> Arc<dyn ClassLoader> {
    let bootstrap: Arc<dyn ClassLoader> = Arc::new(OpaqueClassLoader::new("bootstrap", None));
    let platform: Arc<dyn ClassLoader> =
        Arc::new(OpaqueClassLoader::new("platform", Some(bootstrap)));
    Arc::new(UrlClassLoader::new(
        "app",
        vec![Url::from("app.jar")],
        Some(platform),
    ))
}

pub struct Fixture {
    pub manager: VirtualFileManager,
    pub runtime: Arc<MemoryArchive>,
    pub app: Arc<MemoryArchive>,
}

/// Manager over rt.jar (platform) and app.jar (loader chain)
pub fn fixture() -> Fixture {
    let runtime = runtime_archive();
    let app = app_archive();
    let archives = ArchiveRegistry::new()
        .with_archive(runtime.clone())
        .with_archive(app.clone());
    let config = Config::default().with_platform_class_path("rt.jar");
    Fixture {
        manager: VirtualFileManager::new(config, app_loader(), archives),
        runtime,
        app,
    }
}

pub fn class_names(handles: impl IntoIterator<Item = Result<ResolvableHandle>>) -> Vec<String> {
    handles
        .into_iter()
        .map(|h| h.expect("listing item").class_name().to_string())
        .collect()
}

/// Archive whose release always fails, counting every attempt
#[derive(Debug)]
pub struct FailingArchive {
    url: Url,
    pub opens: AtomicUsize,
    pub releases: AtomicUsize,
}

impl FailingArchive {
    pub fn new(url: &str) -> Self {
        Self {
            url: Url::from(url),
            opens: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    pub fn release_attempts(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl Archive for FailingArchive {
    fn url(&self) -> &Url {
        &self.url
    }

    fn open(&self) -> Result<Vec<ResolvableHandle>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ResolvableHandle::new(
            "broken/Thing.class",
            self.url.as_str(),
            bytes::Bytes::from_static(&[0]),
        )])
    }

    fn release(&self) -> Result<()> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        Err(Error::archive_error(self.url.as_str(), "handle already gone"))
    }
}
