//! End-to-end use of the file manager the way a compiler driver drives it:
//! register sources, resolve types, write class files, shut down, collect.

mod common;

use std::io::Write;

use common::{fixture, Fixture};
use memfm::{FileObject, Kind, Location};

const GREETER_SOURCE: &str = r#"
package com.foo;

import java.util.List;

public class Greeter {
    public String greet(List<String> names) {
        return "hello";
    }
}
"#;

#[test]
fn test_compile_attempt_round_trip() {
    let Fixture { mut manager, runtime, app } = fixture();

    let source_uri = manager.add_source_file(GREETER_SOURCE).unwrap().uri().to_string();
    assert_eq!(source_uri, "string:///com/foo/Greeter.java");

    // Type lookups the driver performs while attributing the source
    let platform = manager
        .list(Location::PlatformClassPath, "java.util", &[Kind::Class], false)
        .unwrap();
    let found: Vec<String> = platform
        .iter()
        .map(|h| manager.infer_binary_name(Location::PlatformClassPath, &h.unwrap()).unwrap())
        .collect();
    assert_eq!(found, vec!["java.util.List"]);

    let user = manager
        .list(Location::ClassPath, "com.foo", &[Kind::Class], false)
        .unwrap();
    assert_eq!(user.iter().count(), 2);
    assert!(manager.has_location(Location::SourcePath));
    let sources = manager
        .list(Location::SourcePath, "com.foo", &[Kind::Source], false)
        .unwrap();
    assert_eq!(sources.iter().count(), 0);

    // Code generation
    let sibling = manager.source_files()[0].clone();
    let mut sink = manager
        .get_java_file_for_output(Location::ClassOutput, "com.foo.Greeter", Kind::Class, Some(&sibling))
        .unwrap();
    assert_eq!(sink.uri(), "com/foo/Greeter.class");
    sink.write_all(&[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34]).unwrap();

    let mut metadata = manager
        .get_file_for_output(Location::ClassOutput, "", "META-INF/spring-configuration-metadata.json", None)
        .unwrap();
    metadata.write_all(b"{\"groups\":[]}").unwrap();
    manager.flush();

    assert_eq!(manager.registered_listings(), 3);
    manager.close().unwrap();
    assert_eq!(runtime.open_handles(), 0);
    assert_eq!(app.open_handles(), 0);

    let classes = manager.compiled_classes();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].class_name(), "com.foo.Greeter");
    assert_eq!(
        classes[0].bytes().to_vec(),
        vec![0xCAu8, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34]
    );
    assert_eq!(classes[0].filename(), "com/foo/Greeter.class");
}

#[test]
fn test_single_output_class_after_shutdown() {
    let Fixture { mut manager, .. } = fixture();
    let mut sink = manager
        .get_java_file_for_output(Location::ClassOutput, "com.foo.Bar", Kind::Class, None)
        .unwrap();
    sink.write_all(b"bytecode").unwrap();
    manager.close().unwrap();

    let classes = manager.compiled_classes();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].class_name(), "com.foo.Bar");
    assert_eq!(classes[0].bytes().to_vec(), b"bytecode".to_vec());
}

#[test]
fn test_nested_classes_keep_request_order() {
    let Fixture { mut manager, .. } = fixture();
    for name in ["com.foo.Outer", "com.foo.Outer$Inner", "com.foo.Outer$1"] {
        let mut sink = manager
            .get_java_file_for_output(Location::ClassOutput, name, Kind::Class, None)
            .unwrap();
        sink.write_all(name.as_bytes()).unwrap();
    }
    manager.close().unwrap();

    let names: Vec<_> = manager
        .compiled_classes()
        .iter()
        .map(|c| c.class_name().to_string())
        .collect();
    assert_eq!(names, vec!["com.foo.Outer", "com.foo.Outer$Inner", "com.foo.Outer$1"]);
}

#[test]
fn test_multiple_sources_are_kept_in_order() {
    let Fixture { mut manager, .. } = fixture();
    manager.add_source_file("package a; class First {}").unwrap();
    manager.add_source_file("package b; interface Second {}").unwrap();
    manager.add_source_file("/* no declarations */").unwrap();

    let uris: Vec<_> = manager.source_files().iter().map(|s| s.uri().to_string()).collect();
    assert_eq!(
        uris,
        vec!["string:///a/First.java", "string:///b/Second.java", "string:///Source2.java"]
    );
    assert_eq!(manager.source_files()[1].char_content(), "package b; interface Second {}");
}
