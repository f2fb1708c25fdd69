//! Shape-outside exclusion scenarios: reference boxes, basic shapes, and
//! image alpha shapes driving band queries.

use floatband::alpha::AlphaPixels;
use floatband::frame::{FloatFrame, FloatStyle, FrameId};
use floatband::geometry::{Au, Margin, Point, Rect, Size, AU_MAX};
use floatband::layout::float_shape::{PolygonShape, ShapeInfo};
use floatband::layout::{BandInfoType, FloatManager, FlowArea, LogicalRect, ShapeType};
use floatband::style::{
  BasicShape, BorderRadii, CornerRadii, Direction, Float, ReferenceBox, ShapeImage, ShapeOutside,
  ShapePosition, ShapeRadius, WritingMode,
};

const WM: WritingMode = WritingMode::HorizontalTb;
const DIR: Direction = Direction::Ltr;
const CONTAINER: Size = Size::new(1000, 1000);

fn shaped_frame(id: u64, float: Float, shape_outside: ShapeOutside) -> FloatFrame {
  let mut style = FloatStyle::simple(float);
  style.shape_outside = shape_outside;
  FloatFrame::new(FrameId(id), style, Rect::from_xywh(0, 0, 200, 200))
}

fn manager_with_frame(frame: &FloatFrame, margin_rect: LogicalRect) -> FloatManager {
  let mut manager = FloatManager::new(WM, DIR);
  manager.add_float(frame, &margin_rect, WM, DIR, CONTAINER);
  manager
}

fn shape_query(manager: &FloatManager, b_coord: Au, b_size: Au) -> FlowArea {
  manager.get_flow_area(
    WM,
    DIR,
    b_coord,
    b_size,
    BandInfoType::BandFromPoint,
    ShapeType::ShapeOutside,
    &LogicalRect::new(0, 0, 1000, AU_MAX),
    None,
    CONTAINER,
  )
}

#[test]
fn polygon_triangle_follows_hypotenuse() {
  // A triangle filling the top-left of the 200×200 margin box.
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Polygon {
      vertices: vec![Point::new(0, 0), Point::new(200, 0), Point::new(0, 200)],
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Left, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  // The hypotenuse at y=155 sits at x = 200·(1 − 155/200) = 45.
  let area = shape_query(&manager, 155, 10);
  assert_eq!(area.i_start, 45);
  assert!(area.has_floats);

  let higher = shape_query(&manager, 150, 10);
  assert_eq!(higher.i_start, 50);

  // The margin box still rules the Margin-only view.
  let margin_only = manager.get_flow_area(
    WM,
    DIR,
    155,
    10,
    BandInfoType::BandFromPoint,
    ShapeType::Margin,
    &LogicalRect::new(0, 0, 1000, AU_MAX),
    None,
    CONTAINER,
  );
  assert_eq!(margin_only.i_start, 200);
}

#[test]
fn polygon_is_clipped_to_margin_box() {
  // Vertices reaching outside the margin box must not push content past it.
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Polygon {
      vertices: vec![
        Point::new(-100, 0),
        Point::new(300, 0),
        Point::new(300, 200),
        Point::new(-100, 200),
      ],
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Left, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  let area = shape_query(&manager, 100, 10);
  assert_eq!(area.i_start, 200);
}

#[test]
fn circle_closest_side_narrows_toward_poles() {
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Circle {
      radius: ShapeRadius::ClosestSide,
      position: ShapePosition::center(),
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Left, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  // Widest at the equator.
  assert_eq!(shape_query(&manager, 100, 1).i_start, 200);
  // At the very top only the center column is excluded.
  assert_eq!(shape_query(&manager, 0, 1).i_start, 100);
  // Partway down the lower arc: x = 100 + 100·√(1 − 0.8²) ≈ 160.
  let arc = shape_query(&manager, 180, 1).i_start;
  assert!((159..=160).contains(&arc), "arc={arc}");
}

#[test]
fn explicit_ellipse_radii() {
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Ellipse {
      radius_x: ShapeRadius::Length(80),
      radius_y: ShapeRadius::Length(50),
      position: ShapePosition::center(),
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Left, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  assert_eq!(shape_query(&manager, 100, 1).i_start, 180);
  // Above the ellipse the float excludes nothing.
  let above = shape_query(&manager, 10, 1);
  assert_eq!(above.i_start, 0);
  assert!(!above.has_floats);
}

#[test]
fn inset_shrinks_the_exclusion() {
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Inset {
      top: 10,
      right: 10,
      bottom: 10,
      left: 10,
      radii: None,
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Left, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  assert_eq!(shape_query(&manager, 50, 10).i_start, 190);
  // Above the inset rect nothing excludes.
  assert!(!shape_query(&manager, 0, 5).has_floats);
}

#[test]
fn shape_box_with_border_radii() {
  let mut style = FloatStyle::simple(Float::Left);
  style.shape_outside = ShapeOutside::Box(ReferenceBox::MarginBox);
  style.border_radii = Some(BorderRadii {
    top_left: CornerRadii::new(50, 50),
    top_right: CornerRadii::new(50, 50),
    bottom_right: CornerRadii::new(50, 50),
    bottom_left: CornerRadii::new(50, 50),
  });
  let frame = FloatFrame::new(FrameId(1), style, Rect::from_xywh(0, 0, 200, 200));
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  // At the top edge the rounded corner pulls the edge in by its radius.
  assert_eq!(shape_query(&manager, 0, 0).i_start, 150);
  // The straight middle of the side is unaffected.
  assert_eq!(shape_query(&manager, 100, 10).i_start, 200);
}

#[test]
fn content_box_reference_deflates_through_box_model() {
  let mut style = FloatStyle::simple(Float::Left);
  style.shape_outside = ShapeOutside::Box(ReferenceBox::ContentBox);
  style.margin = Margin::all(10);
  style.border = Margin::all(10);
  style.padding = Margin::all(10);
  let frame = FloatFrame::new(FrameId(1), style, Rect::from_xywh(10, 10, 180, 180));
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  // Content box spans 30..170; exclusion ends there.
  assert_eq!(shape_query(&manager, 50, 10).i_start, 170);
  assert!(!shape_query(&manager, 10, 5).has_floats);
}

#[test]
fn image_shape_excludes_opaque_columns() {
  // 4×4 surface, columns 0..2 opaque everywhere: at 60 app units per device
  // pixel the exclusion reaches x=120 inside a 240×240 content box.
  let mut data = vec![0u8; 16];
  for row in 0..4 {
    data[row * 4] = 255;
    data[row * 4 + 1] = 255;
  }
  let pixels = AlphaPixels::from_luma_buffer(&data, 4, 4, 4).unwrap();

  let mut style = FloatStyle::simple(Float::Left);
  style.shape_outside = ShapeOutside::Image(ShapeImage::ready(pixels, 60));
  style.shape_image_threshold = 0.5;
  let frame = FloatFrame::new(FrameId(1), style, Rect::from_xywh(0, 0, 240, 240));
  let manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 240, 240));

  assert_eq!(shape_query(&manager, 60, 10).i_start, 120);

  let margin_only = manager.get_flow_area(
    WM,
    DIR,
    60,
    10,
    BandInfoType::BandFromPoint,
    ShapeType::Margin,
    &LogicalRect::new(0, 0, 1000, AU_MAX),
    None,
    CONTAINER,
  );
  assert_eq!(margin_only.i_start, 240);
}

#[test]
fn pending_image_falls_back_to_margin_box() {
  let mut style = FloatStyle::simple(Float::Left);
  style.shape_outside = ShapeOutside::Image(ShapeImage::pending());
  let frame = FloatFrame::new(FrameId(1), style, Rect::from_xywh(0, 0, 200, 200));
  let mut manager = manager_with_frame(&frame, LogicalRect::new(0, 0, 200, 200));

  // No shape was produced: the margin box is the exclusion.
  assert_eq!(shape_query(&manager, 50, 10).i_start, 200);
  assert!(!manager.snapshot().floats[0].has_shape);

  // A later reflow re-adds the float once the image decoded; the same call
  // now produces the shape.
  let mut data = vec![0u8; 4];
  data[0] = 255;
  data[2] = 255;
  let pixels = AlphaPixels::from_luma_buffer(&data, 2, 2, 2).unwrap();
  let mut ready_frame = frame.clone();
  ready_frame.style.shape_outside = ShapeOutside::Image(ShapeImage::ready(pixels, 100));
  ready_frame.style.shape_image_threshold = 0.5;
  ready_frame.content_rect = Rect::from_xywh(0, 0, 200, 200);

  manager = FloatManager::new(WM, DIR);
  manager.add_float(
    &ready_frame,
    &LogicalRect::new(0, 0, 200, 200),
    WM,
    DIR,
    CONTAINER,
  );
  assert!(manager.snapshot().floats[0].has_shape);
  assert_eq!(shape_query(&manager, 50, 10).i_start, 100);
}

#[test]
fn right_float_shapes_constrain_from_the_right() {
  // Triangle hugging the top-right corner of a right float at 800..1000.
  let shape = ShapeOutside::Shape(
    Box::new(BasicShape::Polygon {
      vertices: vec![Point::new(200, 0), Point::new(200, 200), Point::new(0, 0)],
    }),
    None,
  );
  let frame = shaped_frame(1, Float::Right, shape);
  let manager = manager_with_frame(&frame, LogicalRect::new(800, 0, 200, 200));

  // At y=100 the slanted edge sits at x = 800 + 100.
  let area = shape_query(&manager, 100, 1);
  assert_eq!(area.i_start, 0);
  assert_eq!(area.i_size, 900);
  assert!(area.has_floats);
}

#[test]
fn vertical_rl_band_queries() {
  let mut manager = FloatManager::new(WritingMode::VerticalRl, Direction::Ltr);
  let frame = FloatFrame::new(
    FrameId(1),
    FloatStyle::simple(Float::Left),
    Rect::from_xywh(0, 0, 0, 0),
  );
  manager.add_float(
    &frame,
    &LogicalRect::new(0, 0, 200, 100),
    WritingMode::VerticalRl,
    Direction::Ltr,
    CONTAINER,
  );

  let area = manager.get_flow_area(
    WritingMode::VerticalRl,
    Direction::Ltr,
    20,
    30,
    BandInfoType::WidthWithinHeight,
    ShapeType::Margin,
    &LogicalRect::new(0, 0, 1000, AU_MAX),
    None,
    CONTAINER,
  );
  assert_eq!(area.i_start, 200);
  assert_eq!(area.i_size, 800);
  assert!(area.has_floats);
}

#[test]
fn shape_edges_stay_ordered_within_bands() {
  let shape = ShapeInfo::Polygon(PolygonShape::new(vec![
    Point::new(40, 0),
    Point::new(200, 90),
    Point::new(120, 200),
    Point::new(0, 130),
  ]));
  for (b_start, b_end) in [(0, 10), (0, 200), (40, 90), (130, 200), (95, 95)] {
    let left = shape.line_left(b_start, b_end);
    let right = shape.line_right(b_start, b_end);
    assert!(
      left <= right,
      "line_left {left} exceeds line_right {right} for band {b_start}..{b_end}"
    );
  }
}
