use crate::test_support::{assert_approx, Buf};
use crate::{StreamedClip, StreamedCurveKey, UnityVersion};
use byteorder::{ByteOrder, LittleEndian};

const V5_6: UnityVersion = UnityVersion::new(5, 6, 0, 0);

struct FrameSpec {
    time: f32,
    keys: Vec<(i32, [f32; 4])>,
}

fn frame(time: f32, keys: &[(i32, [f32; 4])]) -> FrameSpec {
    FrameSpec {
        time,
        keys: keys.to_vec(),
    }
}

/// Serializes frames into the flat `u32` buffer a StreamedClip owns.
fn clip_from_frames(frames: &[FrameSpec]) -> StreamedClip {
    let mut buf = Buf::new();
    for f in frames {
        buf.f32(f.time).i32(f.keys.len() as i32);
        for (index, coeff) in &f.keys {
            buf.i32(*index).f32s(coeff);
        }
    }
    assert_eq!(buf.bytes.len() % 4, 0);
    let mut data = vec![0u32; buf.bytes.len() / 4];
    LittleEndian::read_u32_into(&buf.bytes, &mut data);
    StreamedClip {
        data,
        curve_count: 1,
    }
}

#[test]
fn streamed_clip_record_decode() {
    let mut buf = Buf::new();
    buf.i32(2).u32(0x11111111).u32(0x22222222).u32(9);
    let mut reader = buf.reader(V5_6);
    let clip = StreamedClip::read(&mut reader).unwrap();
    assert_eq!(clip.data, vec![0x11111111, 0x22222222]);
    assert_eq!(clip.curve_count, 9);
}

#[test]
fn frame_parse_extracts_value_and_out_slope_positionally() {
    let clip = clip_from_frames(&[frame(0.5, &[(3, [9.0, 8.0, 7.0, 6.0])])]);
    let frames = clip.read_frames().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].time, 0.5);
    let key = &frames[0].keys[0];
    assert_eq!(key.index, 3);
    assert_eq!(key.value, 6.0);
    assert_eq!(key.out_slope, 7.0);
    assert_eq!(key.in_slope, 0.0);
}

#[test]
fn empty_buffer_yields_no_frames() {
    let clip = StreamedClip {
        data: Vec::new(),
        curve_count: 0,
    };
    assert!(clip.read_frames().unwrap().is_empty());
}

#[test]
fn stepped_predecessor_yields_infinite_in_slope() {
    let stepped = StreamedCurveKey {
        index: 5,
        coeff: [0.0, 0.0, 0.0, 2.0],
        value: 2.0,
        out_slope: 0.0,
        in_slope: 0.0,
    };
    let next = StreamedCurveKey {
        index: 5,
        coeff: [0.0, 0.0, 0.0, 4.0],
        value: 4.0,
        out_slope: 0.0,
        in_slope: 0.0,
    };
    assert_eq!(stepped.next_in_slope(1.0, &next), f32::INFINITY);
}

#[test]
fn backward_scan_matches_hand_computed_tangent() {
    // Four frames so that frame 2 sits inside the reconstruction window
    // (frames 0, 1 and the last keep their stored boundary tangents).
    let pre_coeff = [1.0f32, 2.0, 0.5, 1.0];
    let clip = clip_from_frames(&[
        frame(0.0, &[(5, [0.0, 0.0, 1.0, 0.0])]),
        frame(1.0, &[(5, pre_coeff)]),
        frame(2.5, &[(5, [0.0, 0.0, 0.25, 2.0])]),
        frame(3.0, &[(5, [0.0, 0.0, 0.0, 2.0])]),
    ]);
    let frames = clip.read_frames().unwrap();
    assert_eq!(frames.len(), 4);

    // Formula from the encoder's spline math, applied to the predecessor
    // at t=1.0: dx=1.5, dy=2-1, d1=out_slope*dx, length=1/dx^2.
    let dx = 1.5f32;
    let dy = 2.0f32 - 1.0;
    let length = 1.0 / (dx * dx);
    let d1 = pre_coeff[2] * dx;
    let expected = (dy + dy + dy - d1 - d1 - pre_coeff[1] / length) / dx;
    assert_approx(expected, -2.0, 1.0e-6, "hand-computed reference");

    assert_approx(
        frames[2].keys[0].in_slope,
        expected,
        1.0e-6,
        "reconstructed in_slope at frame 2",
    );

    // Boundary frames stay untouched.
    assert_eq!(frames[0].keys[0].in_slope, 0.0);
    assert_eq!(frames[1].keys[0].in_slope, 0.0);
    assert_eq!(frames[3].keys[0].in_slope, 0.0);
}

#[test]
fn backward_scan_stops_at_nearest_match_and_skips_other_curves() {
    // Frame 2's key for curve 5 must pair with frame 1 (nearest), never
    // frame 0; curve 9 in frame 2 must reach back past frame 1 to frame 0.
    let clip = clip_from_frames(&[
        frame(0.0, &[(5, [0.0, 0.0, 0.0, 10.0]), (9, [1.0, 0.0, 1.0, 1.0])]),
        frame(1.0, &[(5, [1.0, 0.0, 1.0, 1.0])]),
        frame(2.0, &[(5, [0.0, 0.0, 0.0, 3.0]), (9, [0.0, 0.0, 0.0, 5.0])]),
        frame(3.0, &[(5, [0.0, 0.0, 0.0, 3.0])]),
    ]);
    let frames = clip.read_frames().unwrap();

    // Curve 5 against frame 1: dx=1, dy=3-1=2, out_slope=1, coeff[1]=0:
    // (3*2 - 2*1 - 0) / 1 = 4.
    let key5 = frames[2].keys.iter().find(|k| k.index == 5).unwrap();
    assert_approx(key5.in_slope, 4.0, 1.0e-6, "curve 5 vs frame 1");

    // Curve 9 against frame 0: dx=2, dy=5-1=4, out_slope=1, coeff[1]=0:
    // (3*4 - 2*2 - 0) / 2 = 4.
    let key9 = frames[2].keys.iter().find(|k| k.index == 9).unwrap();
    assert_approx(key9.in_slope, 4.0, 1.0e-6, "curve 9 vs frame 0");
}

#[test]
fn tiny_dx_is_floored() {
    let pre = StreamedCurveKey {
        index: 0,
        coeff: [0.0, 0.0, 1.0, 0.0],
        value: 0.0,
        out_slope: 1.0,
        in_slope: 0.0,
    };
    let next = StreamedCurveKey {
        index: 0,
        coeff: [0.0, 0.0, 0.0, 1.0],
        value: 1.0,
        out_slope: 0.0,
        in_slope: 0.0,
    };
    // dx collapses to the 1e-4 floor; the result must match the floored
    // evaluation, not explode further.
    let dx = 0.0001f32;
    let expected = (3.0 * 1.0 - 2.0 * (1.0 * dx)) / dx;
    assert_approx(pre.next_in_slope(0.0, &next), expected, expected.abs() * 1.0e-5, "floored dx");
}
