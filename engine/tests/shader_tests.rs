//! Shader Validation Tests
//!
//! Parses and validates the playground WGSL offline so shader errors fail in
//! CI instead of at pipeline creation on someone's GPU.

use naga::valid::{Capabilities, ValidationFlags, Validator};

const PLAYGROUND_WGSL: &str = include_str!("../src/render/shaders/playground.wgsl");

#[test]
fn test_playground_shader_parses_and_validates() {
    let module = naga::front::wgsl::parse_str(PLAYGROUND_WGSL)
        .unwrap_or_else(|e| panic!("WGSL parse error: {e}"));

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));
}

#[test]
fn test_playground_shader_entry_points() {
    let module = naga::front::wgsl::parse_str(PLAYGROUND_WGSL).unwrap();

    let names: Vec<&str> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(names.contains(&"vs_main"), "missing vertex entry point");
    assert!(names.contains(&"fs_main"), "missing fragment entry point");
}
