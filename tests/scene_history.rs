use std::collections::BTreeSet;

use drawkit::{Geometry, Point, Rgba, Scene};

fn init() {
  let _ = env_logger::builder().is_test(true).try_init();
}

fn pixel_set(scene: &Scene) -> BTreeSet<(i32, i32, u64)> {
  scene
    .flatten()
    .iter()
    .map(|p| (p.x, p.y, p.id.0))
    .collect()
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Geometry {
  Geometry::Line {
    p0: Point::new(x1, y1),
    p1: Point::new(x2, y2),
  }
}

#[test]
fn undo_redo_reproduces_states_across_mixed_operations() {
  init();
  let mut scene = Scene::new();
  let mut states = vec![pixel_set(&scene)];

  let a = scene.add(line(0.0, 0.0, 10.0, 0.0), Rgba::RED, 1).unwrap();
  states.push(pixel_set(&scene));

  scene
    .add(
      Geometry::Rectangle {
        p0: Point::new(2.0, 2.0),
        p1: Point::new(8.0, 6.0),
      },
      Rgba::BLACK,
      2,
    )
    .unwrap();
  states.push(pixel_set(&scene));

  scene.translate(a, 3.0, 1.0);
  states.push(pixel_set(&scene));

  scene.remove(a);
  states.push(pixel_set(&scene));

  // Walk all the way back
  for expected in states.iter().rev().skip(1) {
    scene.undo();
    assert_eq!(&pixel_set(&scene), expected);
  }
  // And all the way forward again
  for expected in states.iter().skip(1) {
    scene.redo();
    assert_eq!(&pixel_set(&scene), expected);
  }
}

#[test]
fn undo_restores_shape_removed_by_clip() {
  init();
  let mut scene = Scene::new();
  let id = scene
    .add(
      Geometry::Polygon {
        points: vec![
          Point::new(50.0, 50.0),
          Point::new(60.0, 50.0),
          Point::new(55.0, 60.0),
        ],
        closed: true,
      },
      Rgba::RED,
      1,
    )
    .unwrap();
  let before = pixel_set(&scene);

  assert!(scene.clip(id, 0.0, 0.0, 10.0, 10.0));
  assert!(scene.get(id).is_none());

  scene.undo();
  assert_eq!(pixel_set(&scene), before);
  // Redo re-deletes it
  scene.redo();
  assert!(scene.get(id).is_none());
}

#[test]
fn batched_drag_is_one_step_and_redoable() {
  init();
  let mut scene = Scene::new();
  let id = scene.add(line(0.0, 0.0, 5.0, 0.0), Rgba::RED, 1).unwrap();
  let start = pixel_set(&scene);

  scene.begin_batch();
  for step in 1..=10 {
    scene.translate(id, 1.0, if step % 2 == 0 { 1.0 } else { 0.0 });
  }
  scene.end_batch();
  let dragged = pixel_set(&scene);
  assert_ne!(dragged, start);

  scene.undo();
  assert_eq!(pixel_set(&scene), start);
  scene.redo();
  assert_eq!(pixel_set(&scene), dragged);
}

#[test]
fn operations_after_batch_snapshot_normally() {
  init();
  let mut scene = Scene::new();
  let id = scene.add(line(0.0, 0.0, 5.0, 0.0), Rgba::RED, 1).unwrap();

  scene.begin_batch();
  scene.translate(id, 1.0, 0.0);
  scene.end_batch();
  let after_drag = pixel_set(&scene);

  scene.translate(id, 0.0, 1.0);
  scene.undo();
  assert_eq!(
    pixel_set(&scene),
    after_drag,
    "post-batch translate must undo on its own"
  );
}

#[test]
fn translate_round_trip_restores_pixels_exactly() {
  init();
  let mut scene = Scene::new();
  let id = scene
    .add(
      Geometry::Circle {
        p0: Point::new(30.0, 10.0),
        p1: Point::new(10.0, 30.0),
        p2: Point::new(-10.0, 10.0),
      },
      Rgba::RED,
      1,
    )
    .unwrap();
  let before = pixel_set(&scene);
  scene.translate(id, 7.0, -3.0);
  scene.translate(id, -7.0, 3.0);
  assert_eq!(pixel_set(&scene), before);
}

#[test]
fn clear_and_undo_round_trip() {
  init();
  let mut scene = Scene::new();
  scene.add(line(0.0, 0.0, 5.0, 5.0), Rgba::RED, 1).unwrap();
  scene.add(line(5.0, 0.0, 0.0, 5.0), Rgba::BLACK, 1).unwrap();
  let full = pixel_set(&scene);

  scene.clear();
  assert!(scene.flatten().is_empty());

  scene.undo();
  assert_eq!(pixel_set(&scene), full);
}
