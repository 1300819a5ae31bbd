//! End-to-end runs: module file on disk → loader → host → sink contents.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use wasmhost::abi::AbiProfile;
use wasmhost::error::HostError;
use wasmhost::host::Host;
use wasmhost::loader;
use wasmhost::sink::OutputSink;

/// Assemble a WAT fixture and write it to a temp file as a binary module.
fn write_module(wat_src: &str) -> NamedTempFile {
    let bytes = wat::parse_str(wat_src).expect("fixture must assemble");
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(&bytes).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn file_to_sink_pipeline() {
    let f = write_module(
        r#"(module
            (import "env" "write_char" (func $wc (param i32)))
            (func (export "start")
                (call $wc (i32.const 72))
                (call $wc (i32.const 73))))"#,
    );

    let image = loader::load(f.path()).unwrap();
    let host = Host::new(AbiProfile::V2).unwrap();
    let (sink, buffer) = OutputSink::memory();
    host.run(image, sink).unwrap();

    assert_eq!(buffer.contents(), "HI");
}

#[test]
fn v1_line_oriented_integers() {
    let f = write_module(
        r#"(module
            (import "env" "write_i32" (func $wi (param i32)))
            (func (export "start")
                (call $wi (i32.const 1))
                (call $wi (i32.const 2))
                (call $wi (i32.const 3))))"#,
    );

    let image = loader::load(f.path()).unwrap();
    let host = Host::new(AbiProfile::V1).unwrap();
    let (sink, buffer) = OutputSink::memory();
    host.run(image, sink).unwrap();

    assert_eq!(buffer.contents(), "1\n2\n3\n");
}

#[test]
fn missing_file_reports_path_and_writes_nothing() {
    let err = loader::load(Path::new("/no/such.wasm")).unwrap_err();
    assert!(matches!(err, HostError::ModuleNotFound(_)));
    assert!(err.to_string().contains("/no/such.wasm"));
}

#[test]
fn same_module_both_profiles() {
    // One integer-only module, run under each revision; the disciplines
    // must not leak into each other.
    let src = r#"(module
        (import "env" "write_i32" (func $wi (param i32)))
        (func (export "start")
            (call $wi (i32.const -42))))"#;

    let f = write_module(src);

    let host = Host::new(AbiProfile::V2).unwrap();
    let (sink, buffer) = OutputSink::memory();
    host.run(loader::load(f.path()).unwrap(), sink).unwrap();
    assert_eq!(buffer.contents(), "-42");

    let host = Host::new(AbiProfile::V1).unwrap();
    let (sink, buffer) = OutputSink::memory();
    host.run(loader::load(f.path()).unwrap(), sink).unwrap();
    assert_eq!(buffer.contents(), "-42\n");
}

#[test]
fn producer_shaped_module_from_disk() {
    // The shape the producing compiler emits: GC structs, tail calls, and a
    // `start` that returns a status nobody reads.
    let f = write_module(
        r#"(module
            (import "env" "write_i32" (func $wi (param i32)))
            (type $box (struct (field i32)))
            (func $finish (result i32)
                (call $wi (struct.get $box 0 (struct.new $box (i32.const 40))))
                (call $wi (struct.get $box 0 (struct.new $box (i32.const 2))))
                (i32.const 0))
            (func (export "start") (result i32)
                (return_call $finish)))"#,
    );

    let image = loader::load(f.path()).unwrap();
    let host = Host::new(AbiProfile::V2).unwrap();
    let (sink, buffer) = OutputSink::memory();
    host.run(image, sink).unwrap();

    assert_eq!(buffer.contents(), "402");
}

#[test]
fn module_without_entry_point_emits_nothing() {
    let f = write_module(
        r#"(module
            (import "env" "write_char" (func $wc (param i32)))
            (func (export "init")
                (call $wc (i32.const 65))))"#,
    );

    let image = loader::load(f.path()).unwrap();
    let host = Host::new(AbiProfile::V2).unwrap();
    let (sink, buffer) = OutputSink::memory();
    let err = host.run(image, sink).unwrap_err();

    assert!(matches!(err, HostError::EntryPointMissing(_)));
    assert!(buffer.is_empty());
}
