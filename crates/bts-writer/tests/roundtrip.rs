//! Round-trip tests: encode, parse back, and compare against the source.
//!
//! These pin the sample-matrix axis order: component fastest, then y,
//! then z, with time slowest.

use bts_writer::{encode_to_bytes, quantize_field, BtsFile, EncodeOptions, Provenance, HEADER_LEN};
use test_utils::grid::{ROTOR, SINGLE_COLUMN, SMALL};
use test_utils::{
    assert_approx_eq, fixed_timestamp, indexed_field, sinusoidal_field, TEST_TOOL_NAME,
    TEST_TOOL_VERSION,
};
use wind_field::Component;

fn options() -> EncodeOptions {
    EncodeOptions::new(Provenance::new(
        TEST_TOOL_NAME,
        TEST_TOOL_VERSION,
        fixed_timestamp(),
    ))
}

#[test]
fn test_stream_position_of_every_sample() {
    let s = SMALL;
    let field = indexed_field(&s);
    let quantized = quantize_field(field.uvwt()).unwrap();
    let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();
    let data = &bytes[HEADER_LEN + summary.description.len()..];

    for it in 0..s.nt {
        for iz in 0..s.nz {
            for iy in 0..s.ny {
                for c in Component::ALL {
                    let pos = (((it * s.nz + iz) * s.ny + iy) * 3 + c.index()) * 2;
                    let code = i16::from_le_bytes([data[pos], data[pos + 1]]);
                    assert_eq!(
                        Some(code),
                        quantized.get(c, iy, iz, it),
                        "component {} at y={}, z={}, t={}",
                        c,
                        iy,
                        iz,
                        it
                    );
                }
            }
        }
    }
}

#[test]
fn test_parse_recovers_codes_and_header() {
    let field = indexed_field(&SMALL);
    let quantized = quantize_field(field.uvwt()).unwrap();
    let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();

    let file = BtsFile::parse(&bytes).unwrap();
    assert_eq!(file.header, summary.header);
    assert_eq!(file.description, summary.description);
    assert_eq!(file.codes(), quantized.codes());
    assert_eq!(file.z_axis(), vec![70.0, 80.0, 90.0]);
}

#[test]
fn test_decoded_values_within_one_quantization_step() {
    for s in [SMALL, SINGLE_COLUMN, ROTOR] {
        let field = sinusoidal_field(&s, 11.4);
        let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();
        let decoded = BtsFile::parse(&bytes).unwrap().to_tensor();

        for c in Component::ALL {
            // header stores f32 scale/offset, allow one extra step for that rounding
            let tolerance = 2.0 / summary.params[c.index()].scale;
            let original = field.uvwt().component(c);
            let recovered = decoded.component(c);
            assert_eq!(original.len(), recovered.len());
            for (o, r) in original.iter().zip(recovered) {
                assert_approx_eq!(*r, *o, tolerance);
            }
        }
    }
}

#[test]
fn test_each_component_spans_full_code_range() {
    let field = sinusoidal_field(&ROTOR, 9.0);
    let quantized = quantize_field(field.uvwt()).unwrap();
    for c in Component::ALL {
        let codes = quantized.component(c);
        assert_eq!(codes.iter().min(), Some(&i16::MIN));
        assert_eq!(codes.iter().max(), Some(&i16::MAX));
    }
}

#[test]
fn test_sample_count_matches_grid() {
    for s in [SMALL, SINGLE_COLUMN, ROTOR] {
        let field = indexed_field(&s);
        let (bytes, summary) = encode_to_bytes(&field, &options()).unwrap();
        let sample_bytes = bytes.len() - HEADER_LEN - summary.description.len();
        assert_eq!(sample_bytes / 2, s.ny * s.nz * s.nt * 3);
        assert_eq!(sample_bytes % 2, 0);
    }
}
