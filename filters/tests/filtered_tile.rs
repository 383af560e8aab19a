//! Splatting through the reconstruction filters.

use float_cmp::approx_eq;
use helios_core::film::FilteredTile;
use helios_core::filter::Filter;
use helios_core::geometry::{Bounds2i, Point2f, Point2i, Vector2f};
use helios_core::math::Float;
use helios_filters::{BoxFilter, GaussianFilter, TriangleFilter};
use std::sync::Arc;

#[test]
fn box_filter_splat_lands_in_a_single_pixel() {
    let mut tile = FilteredTile::new(16, 16, 3, Arc::new(BoxFilter::new(Vector2f::new(0.5, 0.5))));
    tile.add(&Point2f::new(7.5, 9.5), &[0.25, 0.5, 1.0]);

    let p = tile.pixel(7, 9);
    assert_eq!(p, &[0.25, 0.5, 1.0, 1.0]);

    // The box support of radius 0.5 covers exactly one pixel.
    assert_eq!(tile.pixel(6, 9)[3], 0.0);
    assert_eq!(tile.pixel(8, 9)[3], 0.0);
    assert_eq!(tile.pixel(7, 8)[3], 0.0);
    assert_eq!(tile.pixel(7, 10)[3], 0.0);
}

#[test]
fn center_splat_weight_equals_filter_peak() {
    let filter = Arc::new(GaussianFilter::new(Vector2f::new(2.0, 2.0), 2.0));
    let peak = filter.evaluate(&Point2f::new(0.0, 0.0));

    let mut tile = FilteredTile::new(8, 8, 1, filter);
    tile.add(&Point2f::new(4.5, 4.5), &[3.0]);

    let p = tile.pixel(4, 4);
    assert!(approx_eq!(Float, p[1], peak, epsilon = 1e-6));
    assert!(approx_eq!(Float, p[0], 3.0 * peak, epsilon = 1e-6));
}

#[test]
fn zero_valued_sample_still_accumulates_weight() {
    let filter = Arc::new(TriangleFilter::new(Vector2f::new(1.0, 1.0)));
    let peak = filter.evaluate(&Point2f::new(0.0, 0.0));

    let mut tile = FilteredTile::new(4, 4, 2, filter);
    tile.clear();
    tile.add(&Point2f::new(1.5, 1.5), &[0.0, 0.0]);

    let p = tile.pixel(1, 1);
    assert_eq!(p[0], 0.0);
    assert_eq!(p[1], 0.0);
    assert!(approx_eq!(Float, p[2], peak, epsilon = 1e-6));
}

#[test]
fn splats_outside_the_crop_window_are_no_ops() {
    let crop = Bounds2i::new(Point2i::new(4, 4), Point2i::new(11, 11));
    let mut tile = FilteredTile::new_with_crop_window(
        16,
        16,
        1,
        crop,
        Arc::new(TriangleFilter::new(Vector2f::new(2.0, 2.0))),
    );

    tile.add(&Point2f::new(0.5, 0.5), &[1.0]);
    tile.add(&Point2f::new(15.5, 15.5), &[1.0]);

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(tile.pixel(x, y)[1], 0.0, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn normalized_triangle_splats_reconstruct_a_constant() {
    let mut tile = FilteredTile::new(8, 8, 1, Arc::new(TriangleFilter::new(Vector2f::new(1.5, 1.5))));
    for i in 0..32 {
        for j in 0..32 {
            let x = 2.0 + i as Float / 8.0;
            let y = 2.0 + j as Float / 8.0;
            tile.add(&Point2f::new(x, y), &[0.75]);
        }
    }

    let p = tile.pixel(4, 4);
    assert!(p[1] > 0.0);
    assert!(approx_eq!(Float, p[0] / p[1], 0.75, epsilon = 1e-4));
}
