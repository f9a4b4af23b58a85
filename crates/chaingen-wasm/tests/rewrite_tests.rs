//! Rewrite tests over generated fixture modules.

use wasm_encoder::{
    ConstExpr, CustomSection, DataCountSection, DataSection, MemorySection, MemoryType, Module,
};
use wasmparser::{DataKind, Operator, Parser, Payload};

use chaingen_wasm::{rewrite_module, ModuleError, MAX_DATA_SEGMENT};

fn memory() -> MemorySection {
    let mut memories = MemorySection::new();
    memories.memory(MemoryType {
        minimum: 2,
        maximum: None,
        memory64: false,
        shared: false,
        page_size_log2: None,
    });
    memories
}

/// Fixture: memory plus active data segments at the given offsets.
fn module_with_data(segments: &[(i32, &[u8])]) -> Vec<u8> {
    let mut data = DataSection::new();
    for (offset, blob) in segments {
        data.active(0, &ConstExpr::i32_const(*offset), blob.iter().copied());
    }
    let mut module = Module::new();
    module.section(&memory());
    module.section(&data);
    module.finish()
}

/// Active segments of a module as (offset, bytes) pairs.
fn data_segments(bytes: &[u8]) -> Vec<(i32, Vec<u8>)> {
    let mut out = Vec::new();
    for payload in Parser::new(0).parse_all(bytes) {
        if let Payload::DataSection(reader) = payload.unwrap() {
            for entry in reader {
                let entry = entry.unwrap();
                let DataKind::Active { offset_expr, .. } = entry.kind else {
                    panic!("expected active segment");
                };
                let mut ops = offset_expr.get_operators_reader();
                let Operator::I32Const { value } = ops.read().unwrap() else {
                    panic!("expected i32.const offset");
                };
                out.push((value, entry.data.to_vec()));
            }
        }
    }
    out
}

#[test]
fn test_small_segments_pass_through() {
    let blob = vec![0xaa; 100];
    let input = module_with_data(&[(16, &blob), (1024, b"hello")]);
    let out = rewrite_module(&input).unwrap();
    assert_eq!(
        data_segments(&out),
        vec![(16, blob.clone()), (1024, b"hello".to_vec())]
    );
    // A second rewrite changes nothing.
    assert_eq!(rewrite_module(&out).unwrap(), out);
}

#[test]
fn test_oversized_segment_is_chunked() {
    let blob: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let input = module_with_data(&[(64, &blob)]);
    let out = rewrite_module(&input).unwrap();

    let segments = data_segments(&out);
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|(_, d)| d.len() <= MAX_DATA_SEGMENT));

    // Each chunk sits at the base offset plus its position in the blob,
    // so the concatenation reconstructs the original memory image.
    let mut reassembled = Vec::new();
    for (offset, data) in &segments {
        assert_eq!(*offset as usize, 64 + reassembled.len());
        reassembled.extend_from_slice(data);
    }
    assert_eq!(reassembled, blob);
}

#[test]
fn test_exact_ceiling_not_split() {
    let blob = vec![7u8; MAX_DATA_SEGMENT];
    let input = module_with_data(&[(0, &blob)]);
    let segments = data_segments(&rewrite_module(&input).unwrap());
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].1.len(), MAX_DATA_SEGMENT);
}

#[test]
fn test_custom_sections_stripped() {
    let mut module = Module::new();
    module.section(&memory());
    module.section(&CustomSection {
        name: "name".into(),
        data: b"debug junk".as_slice().into(),
    });
    let out = rewrite_module(&module.finish()).unwrap();

    for payload in Parser::new(0).parse_all(&out) {
        assert!(!matches!(payload.unwrap(), Payload::CustomSection(_)));
    }
}

#[test]
fn test_data_count_reflects_split_segments() {
    let blob: Vec<u8> = vec![1; MAX_DATA_SEGMENT * 2 + 10];
    let mut data = DataSection::new();
    data.active(0, &ConstExpr::i32_const(0), blob.iter().copied());
    let mut module = Module::new();
    module.section(&memory());
    module.section(&DataCountSection { count: 1 });
    module.section(&data);

    let out = rewrite_module(&module.finish()).unwrap();
    let mut seen = None;
    for payload in Parser::new(0).parse_all(&out) {
        if let Payload::DataCountSection { count, .. } = payload.unwrap() {
            seen = Some(count);
        }
    }
    assert_eq!(seen, Some(3));
    assert_eq!(data_segments(&out).len(), 3);
}

#[test]
fn test_passive_segment_rejected() {
    let mut data = DataSection::new();
    data.passive([1u8, 2, 3]);
    let mut module = Module::new();
    module.section(&memory());
    module.section(&data);
    assert!(matches!(
        rewrite_module(&module.finish()),
        Err(ModuleError::PassiveSegment)
    ));
}

#[test]
fn test_non_zero_memory_index_rejected() {
    let mut data = DataSection::new();
    data.active(1, &ConstExpr::i32_const(0), [1u8, 2, 3]);
    let mut module = Module::new();
    module.section(&memory());
    module.section(&data);
    assert!(matches!(
        rewrite_module(&module.finish()),
        Err(ModuleError::NonZeroMemoryIndex(1))
    ));
}
