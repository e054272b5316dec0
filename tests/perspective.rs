use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nalgebra::{Vector2, Vector3, Vector4};

use softraster::{Coordinate, Dimensions, Fragment, Model, PipelineBuilder, Rasterizer, RenderBuffer, VaryingLayout};

const SIZE: u32 = 64;

type Samples = Arc<Mutex<HashMap<Coordinate, (Vector3<f32>, Vector3<f32>, Vector3<f32>)>>>;

/// Draws a triangle given in view space, recording the interpolated view position of every fragment
/// along with its screen-space derivatives.
fn draw_view_space(view: &[Vector3<f32>; 3]) -> HashMap<Coordinate, (Vector3<f32>, Vector3<f32>, Vector3<f32>)> {
    let mut layout = VaryingLayout::new();
    let position = layout.add::<Vector3<f32>>("view_position");

    let samples: Samples = Arc::new(Mutex::new(HashMap::new()));
    let recorded = samples.clone();

    let pipeline = PipelineBuilder::new(move |v, out| {
        let p = v.vertex_vector::<3>(0);
        let w = -p.z;

        out.position = Vector4::new(p.x, p.y, (w - 1.0) * 0.25, w);
        out.set(position, p);
    }, move |_, fragment, _| {
        let value = fragment.interpolate(position);
        let dx = fragment.derivative_x(position);
        let dy = fragment.derivative_y(position);

        recorded.lock().unwrap().insert(fragment.pixel(), (value, dx, dy));

        Fragment::Keep
    }).varyings(layout).build_shared();

    let flat: Vec<f32> = view.iter().flat_map(|v| v.iter().cloned().collect::<Vec<f32>>()).collect();
    let model = Model::from_f32(&flat, 3, vec![0, 1, 2]).with_pipeline(pipeline);

    let mut image = RenderBuffer::new(SIZE, SIZE).unwrap();
    Rasterizer::new().draw(&model, &mut image);

    let result = samples.lock().unwrap().clone();
    result
}

fn view_triangle() -> [Vector3<f32>; 3] {
    [Vector3::new(-1.0, -1.0, -2.0), Vector3::new(1.5, -0.5, -4.0), Vector3::new(-0.5, 1.2, -3.0)]
}

/// Intersection of the view ray through a pixel center with the triangle's plane
fn reproject(view: &[Vector3<f32>; 3], pixel: Coordinate) -> Vector3<f64> {
    let v: Vec<Vector3<f64>> = view.iter().map(|p| p.cast::<f64>()).collect();

    let (cx, cy) = pixel.center();
    let dimensions = Dimensions::new(SIZE, SIZE);

    let ndc = Vector2::new(cx as f64 / dimensions.width as f64 * 2.0 - 1.0,
                           cy as f64 / dimensions.height as f64 * 2.0 - 1.0);

    let ray = Vector3::new(ndc.x, ndc.y, -1.0);
    let normal = (v[1] - v[0]).cross(&(v[2] - v[0]));

    ray * (normal.dot(&v[0]) / normal.dot(&ray))
}

#[test]
fn test_interpolation_is_perspective_correct() {
    let view = view_triangle();
    let samples = draw_view_space(&view);

    assert!(samples.len() > 100, "only {} fragments", samples.len());

    for (pixel, (value, _, _)) in samples.iter() {
        let expected = reproject(&view, *pixel);
        let error = (value.cast::<f64>() - expected).amax();

        assert!(error < 1e-4, "{:?}: {} vs {} ({})", pixel, value, expected, error);
    }
}

#[test]
fn test_derivatives_match_neighbors() {
    let samples = draw_view_space(&view_triangle());

    let mut checked = 0;

    for (pixel, (value, dx, dy)) in samples.iter() {
        if let Some((right, _, _)) = samples.get(&Coordinate::new(pixel.x + 1, pixel.y)) {
            assert!((dx - (right - value)).amax() < 1e-5, "{:?}", pixel);
            checked += 1;
        }

        if let Some((above, _, _)) = samples.get(&Coordinate::new(pixel.x, pixel.y + 1)) {
            assert!((dy - (above - value)).amax() < 1e-5, "{:?}", pixel);
            checked += 1;
        }
    }

    assert!(checked > 100);
}

#[test]
fn test_derivatives_fall_back_to_negative_neighbor() {
    let samples = draw_view_space(&view_triangle());

    let mut checked = 0;

    for (pixel, (value, dx, _)) in samples.iter() {
        let right = samples.get(&Coordinate::new(pixel.x + 1, pixel.y));
        let left = pixel.x.checked_sub(1).and_then(|x| samples.get(&Coordinate::new(x, pixel.y)));

        match (right, left) {
            (None, Some((left, _, _))) => {
                assert!((dx - (value - left)).amax() < 1e-5, "{:?}", pixel);
                checked += 1;
            }
            (None, None) => assert_eq!(*dx, Vector3::zeros(), "{:?}", pixel),
            _ => {}
        }
    }

    assert!(checked > 10);
}

#[test]
fn test_affine_derivatives_are_constant() {
    // With equal W everywhere, a varying holding the raster position changes by exactly one pixel per step
    let mut layout = VaryingLayout::new();
    let raster = layout.add::<Vector2<f32>>("raster");

    let derivatives = Arc::new(Mutex::new(Vec::new()));
    let recorded = derivatives.clone();

    let pipeline = PipelineBuilder::new(move |v, out| {
        let p = v.vertex_vector::<2>(0);

        out.position = Vector4::new(p.x / 32.0 - 1.0, p.y / 32.0 - 1.0, 0.5, 1.0);
        out.set(raster, p);
    }, move |_, fragment, _| {
        recorded.lock().unwrap().push((fragment.derivative_x(raster), fragment.derivative_y(raster)));
        Fragment::Keep
    }).varyings(layout).build_shared();

    let model = Model::from_f32(&[4.0, 4.0, 60.0, 8.0, 20.0, 58.0], 2, vec![0, 1, 2]).with_pipeline(pipeline);

    let mut image = RenderBuffer::new(SIZE, SIZE).unwrap();
    Rasterizer::new().draw(&model, &mut image);

    let derivatives = derivatives.lock().unwrap();

    assert!(derivatives.len() > 500);

    for (dx, dy) in derivatives.iter() {
        assert!(*dx == Vector2::zeros() || (dx - Vector2::new(1.0, 0.0)).amax() < 1e-3, "{}", dx);
        assert!(*dy == Vector2::zeros() || (dy - Vector2::new(0.0, 1.0)).amax() < 1e-3, "{}", dy);
    }
}
