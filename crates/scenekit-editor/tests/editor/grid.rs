use proptest::prelude::*;
use scenekit_editor::{GridLines, GridSize, Point, Rect};

proptest! {
    #[test]
    fn snapped_point_is_nearest_multiple(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        cell_x in 1.0f64..200.0,
        cell_y in 1.0f64..200.0,
    ) {
        let grid = GridSize::new(cell_x, cell_y).unwrap();
        let snapped = grid.snap(Point::new(x, y));

        let kx = snapped.x / cell_x;
        let ky = snapped.y / cell_y;
        prop_assert!((kx - kx.round()).abs() < 1e-9);
        prop_assert!((ky - ky.round()).abs() < 1e-9);
        prop_assert!((snapped.x - x).abs() <= cell_x / 2.0 + 1e-9);
        prop_assert!((snapped.y - y).abs() <= cell_y / 2.0 + 1e-9);
    }

    #[test]
    fn snap_is_idempotent(x in -5000.0f64..5000.0, y in -5000.0f64..5000.0) {
        let grid = GridSize::default();
        let once = grid.snap(Point::new(x, y));
        prop_assert_eq!(grid.snap(once), once);
    }
}

#[test]
fn test_rejects_non_positive_sizes() {
    assert!(GridSize::new(0.0, 10.0).is_err());
    assert!(GridSize::new(10.0, -1.0).is_err());
    assert!(GridSize::new(f64::NAN, 10.0).is_err());
    assert!(GridSize::new(f64::INFINITY, 10.0).is_err());
    assert!(GridSize::new(0.5, 0.5).is_ok());
}

#[test]
fn test_lines_align_to_cells() {
    let lines = GridLines::compute(
        Rect::new(-30.0, 10.0, 100.0, 60.0),
        GridSize::default(),
        1.0,
    );
    let xs: Vec<f64> = lines.vertical.iter().map(|l| l.start.x).collect();
    let ys: Vec<f64> = lines.horizontal.iter().map(|l| l.start.y).collect();
    assert_eq!(xs, vec![-50.0, 0.0, 50.0, 100.0]);
    assert_eq!(ys, vec![0.0, 50.0, 100.0]);
}
