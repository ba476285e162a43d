// The screamer: a fixed vector figure drawn over the particles every frame.
// Control points were authored for an 812 px tall canvas and are scaled from there.

use crate::render::Renderer;
use crate::types::{Canvas, Rgb};

const BODY: Rgb = Rgb::new(76, 63, 55);
const HAND: Rgb = Rgb::new(211, 164, 103);
const FACE: Rgb = Rgb::new(163, 144, 105);
const DETAIL: Rgb = Rgb::new(216, 181, 117);

/// Samples per curve segment; plenty for shapes a few hundred pixels tall.
const CURVE_STEPS: usize = 12;
const ELLIPSE_SEGMENTS: usize = 32;

// Body outline between the two bottom-edge anchors.
const BODY_POINTS: [(f32, f32); 12] = [
    (202.0, 752.0), (206.0, 692.0), (188.0, 651.0), (209.0, 593.0),
    (222.0, 533.0), (271.0, 509.0), (249.0, 434.0), (300.0, 387.0),
    (365.0, 427.0), (345.0, 520.0), (374.0, 610.0), (305.0, 738.0),
];

const HAND_POINTS: [(f32, f32); 13] = [
    (246.0, 567.0), (271.0, 509.0), (249.0, 434.0), (300.0, 387.0),
    (365.0, 427.0), (345.0, 520.0), (374.0, 610.0), (353.0, 617.0),
    (318.0, 542.0), (340.0, 450.0), (285.0, 457.0), (296.0, 505.0),
    (263.0, 587.0),
];

const FACE_POINTS: [(f32, f32); 8] = [
    (295.0, 514.0), (284.0, 484.0), (263.0, 447.0), (293.0, 389.0),
    (351.0, 422.0), (342.0, 469.0), (329.0, 492.0), (313.0, 513.0),
];

// (centre x, centre y, width, height): two eyes and the mouth.
const FEATURES: [(f32, f32, f32, f32); 3] = [
    (290.0, 440.0, 20.0, 30.0),
    (325.0, 440.0, 20.0, 30.0),
    (308.0, 490.0, 15.0, 30.0),
];

/// Draw the whole figure for the current canvas size.
pub fn draw<R: Renderer + ?Sized>(out: &mut R, canvas: Canvas) {
    let s = canvas.scale();
    let scaled = |pts: &[(f32, f32)]| pts.iter().map(|&(x, y)| (x * s, y * s)).collect::<Vec<_>>();

    // The body is anchored to the bottom edge at both ends.
    let h = canvas.height as f32;
    let mut body = Vec::with_capacity(BODY_POINTS.len() + 2);
    body.push((canvas.width as f32 / 3.0, h));
    body.extend(scaled(&BODY_POINTS));
    body.push((320.0 * s, h));
    out.fill_path(&curve_outline(&body, CURVE_STEPS), BODY);

    out.fill_path(&curve_outline(&scaled(&HAND_POINTS), CURVE_STEPS), HAND);
    out.fill_path(&curve_outline(&scaled(&FACE_POINTS), CURVE_STEPS), FACE);

    for &(cx, cy, ew, eh) in &FEATURES {
        out.fill_path(&ellipse_outline(cx * s, cy * s, ew * s, eh * s, ELLIPSE_SEGMENTS), DETAIL);
    }
}

/// Uniform Catmull-Rom spline through `ctrl[1..n-1]`; the first and last
/// points only shape the ends. Fewer than four points yields them as-is.
pub fn curve_outline(ctrl: &[(f32, f32)], steps: usize) -> Vec<(f32, f32)> {
    if ctrl.len() < 4 || steps == 0 {
        return ctrl.to_vec();
    }
    let mut out = Vec::with_capacity((ctrl.len() - 3) * steps + 1);
    for w in ctrl.windows(4) {
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            out.push(catmull_rom(w[0], w[1], w[2], w[3], t));
        }
    }
    out.push(ctrl[ctrl.len() - 2]);
    out
}

#[inline]
fn catmull_rom(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), t: f32) -> (f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * (2.0 * b
            + (c - a) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (3.0 * b - a - 3.0 * c + d) * t3)
    };
    (axis(p0.0, p1.0, p2.0, p3.0), axis(p0.1, p1.1, p2.1, p3.1))
}

/// Polygon approximating the ellipse with centre (cx, cy) and diameters (w, h).
pub fn ellipse_outline(cx: f32, cy: f32, w: f32, h: f32, segments: usize) -> Vec<(f32, f32)> {
    (0..segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * std::f32::consts::TAU;
            (cx + 0.5 * w * a.cos(), cy + 0.5 * h * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{Op, Recorder};
    use crate::types::FrameBuffer;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn curve_passes_through_inner_control_points() {
        let ctrl = [(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 0.0), (40.0, 0.0)];
        let out = curve_outline(&ctrl, 8);
        assert_eq!(out.len(), 2 * 8 + 1);
        assert!(close(out[0], ctrl[1]));
        assert!(close(out[8], ctrl[2]));
        assert!(close(out[16], ctrl[3]));
    }

    #[test]
    fn short_outlines_are_passed_through() {
        let ctrl = [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)];
        assert_eq!(curve_outline(&ctrl, 8), ctrl.to_vec());
    }

    #[test]
    fn ellipse_touches_its_extremes() {
        let pts = ellipse_outline(10.0, 20.0, 8.0, 4.0, 4);
        assert!(close(pts[0], (14.0, 20.0)));
        assert!(close(pts[1], (10.0, 22.0)));
        assert!(close(pts[2], (6.0, 20.0)));
        assert!(close(pts[3], (10.0, 18.0)));
    }

    #[test]
    fn figure_is_six_opaque_shapes_in_layer_order() {
        let mut out = Recorder::default();
        draw(&mut out, Canvas::new(1218, 812));
        let colours: Vec<Rgb> = out
            .ops
            .iter()
            .map(|op| match op {
                Op::Path { colour, .. } => *colour,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(colours, vec![BODY, HAND, FACE, DETAIL, DETAIL, DETAIL]);
    }

    #[test]
    fn face_lands_where_it_was_authored_at_any_scale() {
        for (w, h) in [(1218, 812), (609, 406)] {
            let mut fb = FrameBuffer::new(w, h);
            draw(&mut fb, Canvas::new(w as u32, h as u32));
            let s = h as f32 / 812.0;
            // Centre of the left eye.
            let (x, y) = ((290.0 * s) as usize, (440.0 * s) as usize);
            assert_eq!(Rgb::unpack(fb.pixels[y * w + x]), DETAIL);
            // Far right of the canvas is untouched.
            assert_eq!(fb.pixels[y * w + (w - 1)], 0);
        }
    }
}
