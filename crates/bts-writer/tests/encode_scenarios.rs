//! Header and stream-shape tests for complete encodes.

use bts_writer::{
    encode, encode_to_bytes, BtsError, EncodeOptions, HubReference, Provenance, HEADER_LEN,
};
use test_utils::grid::{SINGLE_COLUMN, SINGLE_POINT, SMALL};
use test_utils::{
    constant_component_field, fixed_timestamp, indexed_field, EXPLICIT_HUB, TEST_TOOL_NAME,
    TEST_TOOL_VERSION,
};
use wind_field::{Component, Locations, SimulationParameters, UvwTensor, WindField};

fn options() -> EncodeOptions {
    EncodeOptions::new(Provenance::new(
        TEST_TOOL_NAME,
        TEST_TOOL_VERSION,
        fixed_timestamp(),
    ))
}

fn i16_at(bytes: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn i32_at(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

// ============================================================================
// Header layout
// ============================================================================

#[test]
fn test_small_grid_header_and_length() {
    let field = indexed_field(&SMALL);
    let mut sink = Vec::new();
    let summary = encode(&field, &mut sink, &options()).unwrap();

    assert_eq!(i16_at(&sink, 0), 8);
    assert_eq!(i32_at(&sink, 2), 3);
    assert_eq!(i32_at(&sink, 6), 2);
    assert_eq!(i32_at(&sink, 10), 0);
    assert_eq!(i32_at(&sink, 14), 4);
    assert_eq!(f32_at(&sink, 18), 10.0);
    assert_eq!(f32_at(&sink, 22), 5.0);
    assert_eq!(f32_at(&sink, 26), 0.1f32);
    assert_eq!(f32_at(&sink, 38), 70.0);

    let l = i32_at(&sink, 66) as usize;
    let description = std::str::from_utf8(&sink[HEADER_LEN..HEADER_LEN + l]).unwrap();
    assert_eq!(description, summary.description);
    assert_eq!(l, description.len());

    assert_eq!(sink.len(), HEADER_LEN + l + 2 * 3 * 2 * 3 * 4);
    assert_eq!(summary.bytes_written, sink.len());
}

#[test]
fn test_description_length_counts_utf8_bytes() {
    let field = indexed_field(&SMALL);
    let provenance = Provenance::new("wïnd-tøøl", "1.0", fixed_timestamp());
    let description = provenance.description();
    assert!(description.len() > description.chars().count());

    let (bytes, _) = encode_to_bytes(&field, &EncodeOptions::new(provenance)).unwrap();
    assert_eq!(i32_at(&bytes, 66) as usize, description.len());
    assert_eq!(
        &bytes[HEADER_LEN..HEADER_LEN + description.len()],
        description.as_bytes()
    );
}

#[test]
fn test_non_periodic_marker() {
    let field = indexed_field(&SMALL);
    let (bytes, summary) = encode_to_bytes(&field, &options().with_periodic(false)).unwrap();
    assert_eq!(i16_at(&bytes, 0), 7);
    assert!(!summary.header.is_periodic());
}

#[test]
fn test_scale_and_offset_fields_match_params() {
    let field = indexed_field(&SMALL);
    let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();
    for (i, p) in summary.params.iter().enumerate() {
        assert_eq!(f32_at(&bytes, 42 + 8 * i), p.scale as f32);
        assert_eq!(f32_at(&bytes, 46 + 8 * i), p.offset as f32);
    }
}

#[test]
fn test_singleton_axes_write_zero_spacing() {
    let field = indexed_field(&SINGLE_POINT);
    let (bytes, _) = encode_to_bytes(&field, &options()).unwrap();
    assert_eq!(f32_at(&bytes, 18), 0.0);
    assert_eq!(f32_at(&bytes, 22), 0.0);

    let field = indexed_field(&SINGLE_COLUMN);
    let (bytes, _) = encode_to_bytes(&field, &options()).unwrap();
    assert_eq!(f32_at(&bytes, 18), 20.0);
    assert_eq!(f32_at(&bytes, 22), 0.0);
}

// ============================================================================
// Hub reference
// ============================================================================

#[test]
fn test_explicit_hub_written_verbatim() {
    let field = indexed_field(&SMALL);
    let (uhub, zhub) = EXPLICIT_HUB;
    let opts = options().with_hub(HubReference::new(uhub, zhub));
    let (bytes, summary) = encode_to_bytes(&field, &opts).unwrap();

    assert_eq!(f32_at(&bytes, 30), 8.3f32);
    assert_eq!(f32_at(&bytes, 34), 90.0f32);
    assert_eq!(summary.hub, HubReference::new(8.3, 90.0));
    assert_ne!(field.umean() as f32, 8.3f32);
}

#[test]
fn test_default_hub_uses_middle_height_and_global_mean() {
    let field = indexed_field(&SMALL);
    let (bytes, _) = encode_to_bytes(&field, &options()).unwrap();
    // z = 70, 80, 90 -> index 3 / 2 = 1
    assert_eq!(f32_at(&bytes, 34), 80.0);
    assert_eq!(f32_at(&bytes, 30), field.umean() as f32);
}

// ============================================================================
// Determinism and degenerate input
// ============================================================================

#[test]
fn test_encoding_is_idempotent() {
    let field = indexed_field(&SMALL);
    let opts = options().with_hub(HubReference::new(8.3, 90.0));
    let (first, _) = encode_to_bytes(&field, &opts).unwrap();
    let (second, _) = encode_to_bytes(&field, &opts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_constant_component_encodes_single_code() {
    let field = constant_component_field(&SMALL, Component::V, 5.0);
    let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();

    assert!(summary.params[1].is_constant());
    assert_eq!(summary.params[1].scale, 1.0);

    let l = summary.description.len();
    let samples: Vec<i16> = bytes[HEADER_LEN + l..]
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    let v_codes: Vec<i16> = samples.iter().skip(1).step_by(3).copied().collect();
    assert_eq!(v_codes.len(), 2 * 3 * 4);
    assert!(v_codes.iter().all(|&c| c == v_codes[0]));
}

#[test]
fn test_non_finite_value_rejected_before_writing() {
    let mut field = indexed_field(&SMALL);
    let mut uvwt = field.uvwt().clone();
    uvwt.set(Component::U, 1, 2, 0, f64::NAN);
    field = WindField::new(field.locations.clone(), field.params, uvwt);

    let mut sink = Vec::new();
    let err = encode(&field, &mut sink, &options()).unwrap_err();
    assert!(matches!(
        err,
        BtsError::NonFiniteValue {
            component: Component::U,
            ..
        }
    ));
    assert!(sink.is_empty());
}

#[test]
fn test_zero_samples_rejected() {
    let locations = Locations::regular(2, 2, 0.0, 0.0, 1.0, 1.0);
    let params = SimulationParameters::new(0, 0.1).unwrap();
    let field = WindField::new(locations, params, UvwTensor::zeros(2, 2, 0));

    let mut sink = Vec::new();
    let err = encode(&field, &mut sink, &options()).unwrap_err();
    assert!(matches!(err, BtsError::EmptyInput(_)));
    assert!(sink.is_empty());
}

#[test]
fn test_no_locations_rejected() {
    let params = SimulationParameters::new(4, 0.1).unwrap();
    let field = WindField::new(Locations::default(), params, UvwTensor::zeros(0, 0, 4));
    let err = encode_to_bytes(&field, &options()).unwrap_err();
    assert!(matches!(err, BtsError::EmptyInput(_)));
}

#[test]
fn test_tensor_shape_must_match_grid() {
    let locations = Locations::regular(2, 3, 0.0, 0.0, 1.0, 1.0);
    let params = SimulationParameters::new(4, 0.1).unwrap();
    let field = WindField::new(locations, params, UvwTensor::zeros(3, 2, 4));

    let err = encode_to_bytes(&field, &options()).unwrap_err();
    match err {
        BtsError::ShapeMismatch { expected, actual } => {
            assert_eq!(expected, [3, 2, 3, 4]);
            assert_eq!(actual, [3, 3, 2, 4]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_tensor_length_must_match_sample_count() {
    let locations = Locations::regular(2, 3, 0.0, 0.0, 1.0, 1.0);
    let params = SimulationParameters::new(5, 0.1).unwrap();
    let field = WindField::new(locations, params, UvwTensor::zeros(2, 3, 4));
    assert!(matches!(
        encode_to_bytes(&field, &options()),
        Err(BtsError::ShapeMismatch { .. })
    ));
}

struct BrokenSink;

impl std::io::Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_reported() {
    let field = indexed_field(&SMALL);
    let err = encode(&field, &mut BrokenSink, &options()).unwrap_err();
    assert!(matches!(err, BtsError::SinkWrite(_)));
    assert!(err.to_string().contains("disk full"));
}
