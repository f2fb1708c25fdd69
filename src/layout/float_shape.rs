//! Exclusion shapes for `shape-outside`
//!
//! Converts `shape-outside` values into per-shape geometry that answers one
//! question for the band queries: the line-left-most / line-right-most inline
//! coordinate where the shape intersects a block-axis band. All shapes are
//! built in the flow-relative frame at insertion time and then translated by
//! the manager origin; queries never re-derive them.
//!
//! A shape's float area is clipped to the float's margin box, so the caller
//! (`FloatInfo`) always combines these edges with the margin-box rect.

use crate::alpha::AlphaPixels;
use crate::frame::FloatFrame;
use crate::geometry::{Au, Point, Rect, Size, AU_MAX, AU_MIN};
use crate::layout::logical::{
  flow_relative_point, flow_relative_radii, LogicalMargin, LogicalRect,
};
use crate::style::{
  block_axis_is_horizontal, block_axis_positive, BasicShape, BorderRadii, Direction, ReferenceBox,
  ShapeImage, ShapeOutside, ShapePosition, ShapeRadius, WritingMode,
};

/// Geometry of one float's exclusion shape, in flow-relative coordinates.
///
/// The variants mirror the values `shape-outside` can take: a rounded
/// reference box (also covering `inset()`), an ellipse (also covering
/// `circle()`), a polygon, and an image alpha scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeInfo {
  RoundedBox(RoundedBoxShape),
  Ellipse(EllipseShape),
  Polygon(PolygonShape),
  Image(ImageShape),
}

impl ShapeInfo {
  /// The line-left-most inline coordinate where the shape intersects the
  /// band `[b_start, b_end]`.
  pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
    match self {
      ShapeInfo::RoundedBox(shape) => shape.line_left(b_start, b_end),
      ShapeInfo::Ellipse(shape) => shape.line_left(b_start, b_end),
      ShapeInfo::Polygon(shape) => shape.line_intercept(b_start, b_end, true),
      ShapeInfo::Image(shape) => shape.line_edge(b_start, b_end, true),
    }
  }

  /// The line-right-most inline coordinate where the shape intersects the
  /// band `[b_start, b_end]`.
  pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
    match self {
      ShapeInfo::RoundedBox(shape) => shape.line_right(b_start, b_end),
      ShapeInfo::Ellipse(shape) => shape.line_right(b_start, b_end),
      ShapeInfo::Polygon(shape) => shape.line_intercept(b_start, b_end, false),
      ShapeInfo::Image(shape) => shape.line_edge(b_start, b_end, false),
    }
  }

  pub fn b_start(&self) -> Au {
    match self {
      ShapeInfo::RoundedBox(shape) => shape.rect.y(),
      ShapeInfo::Ellipse(shape) => shape.center.y - shape.radii.height,
      ShapeInfo::Polygon(shape) => shape.b_start,
      ShapeInfo::Image(shape) => shape.b_start,
    }
  }

  pub fn b_end(&self) -> Au {
    match self {
      ShapeInfo::RoundedBox(shape) => shape.rect.max_y(),
      ShapeInfo::Ellipse(shape) => shape.center.y + shape.radii.height,
      ShapeInfo::Polygon(shape) => shape.b_end,
      ShapeInfo::Image(shape) => shape.b_end,
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      ShapeInfo::RoundedBox(shape) => shape.rect.is_empty(),
      ShapeInfo::Ellipse(shape) => shape.radii.is_empty(),
      ShapeInfo::Polygon(shape) => shape.empty,
      ShapeInfo::Image(shape) => shape.intervals.is_empty(),
    }
  }

  /// Shifts the shape by the manager origin.
  pub fn translate(&mut self, d_line_left: Au, d_block_start: Au) {
    match self {
      ShapeInfo::RoundedBox(shape) => {
        shape.rect = shape.rect.translate(d_line_left, d_block_start);
      }
      ShapeInfo::Ellipse(shape) => {
        shape.center = shape.center.translate(d_line_left, d_block_start);
      }
      ShapeInfo::Polygon(shape) => {
        for vertex in &mut shape.vertices {
          *vertex = vertex.translate(d_line_left, d_block_start);
        }
        shape.b_start += d_block_start;
        shape.b_end += d_block_start;
      }
      ShapeInfo::Image(shape) => {
        for interval in &mut shape.intervals {
          *interval = interval.translate(d_line_left, d_block_start);
        }
        shape.b_start += d_block_start;
        shape.b_end += d_block_start;
      }
    }
  }

  /// Builds the shape for a float, or `None` when `shape-outside` is `none`
  /// or the shape's image has not been decoded yet.
  ///
  /// `margin_rect` is the float's logical margin rect before origin
  /// translation; the caller translates the result together with the rect.
  pub(crate) fn build(
    frame: &FloatFrame,
    margin_rect: &LogicalRect,
    wm: WritingMode,
    dir: Direction,
    container: Size,
  ) -> Option<ShapeInfo> {
    match &frame.style.shape_outside {
      ShapeOutside::None => None,
      ShapeOutside::Box(reference) => {
        let shape_box = shape_box_rect(frame, margin_rect, *reference, wm, dir);
        Some(create_shape_box(frame, &shape_box, wm, dir, container))
      }
      ShapeOutside::Shape(basic, reference) => {
        let reference = (*reference).unwrap_or(ReferenceBox::MarginBox);
        let shape_box = shape_box_rect(frame, margin_rect, reference, wm, dir);
        Some(create_basic_shape(basic, &shape_box, wm, dir, container))
      }
      ShapeOutside::Image(image) => create_image_shape(image, frame, wm, container),
    }
  }
}

/// `shape-outside: <shape-box>` and `shape-outside: inset()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedBoxShape {
  /// Flow-relative rect of the reference box.
  rect: Rect,
  /// Flow-relative half radii; `None` for a sharp-cornered box.
  radii: Option<BorderRadii>,
}

impl RoundedBoxShape {
  pub fn new(rect: Rect, radii: Option<BorderRadii>) -> Self {
    Self { rect, radii }
  }

  fn line_left(&self, b_start: Au, b_end: Au) -> Au {
    let Some(radii) = &self.radii else {
      return self.rect.x();
    };
    let diff = ellipse_line_intercept_diff(
      self.rect.y(),
      self.rect.max_y(),
      radii.top_left.x,
      radii.top_left.y,
      radii.bottom_left.x,
      radii.bottom_left.y,
      b_start,
      b_end,
    );
    self.rect.x() + diff
  }

  fn line_right(&self, b_start: Au, b_end: Au) -> Au {
    let Some(radii) = &self.radii else {
      return self.rect.max_x();
    };
    let diff = ellipse_line_intercept_diff(
      self.rect.y(),
      self.rect.max_y(),
      radii.top_right.x,
      radii.top_right.y,
      radii.bottom_right.x,
      radii.bottom_right.y,
      b_start,
      b_end,
    );
    self.rect.max_x() - diff
  }
}

/// `shape-outside: circle()` and `shape-outside: ellipse()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
  /// Flow-relative center.
  center: Point,
  /// Line-axis radius in `width`, block-axis radius in `height`.
  radii: Size,
}

impl EllipseShape {
  pub fn new(center: Point, radii: Size) -> Self {
    Self { center, radii }
  }

  fn line_left(&self, b_start: Au, b_end: Au) -> Au {
    let diff = ellipse_line_intercept_diff(
      self.center.y - self.radii.height,
      self.center.y + self.radii.height,
      self.radii.width,
      self.radii.height,
      self.radii.width,
      self.radii.height,
      b_start,
      b_end,
    );
    self.center.x - self.radii.width + diff
  }

  fn line_right(&self, b_start: Au, b_end: Au) -> Au {
    let diff = ellipse_line_intercept_diff(
      self.center.y - self.radii.height,
      self.center.y + self.radii.height,
      self.radii.width,
      self.radii.height,
      self.radii.width,
      self.radii.height,
      b_start,
      b_end,
    );
    self.center.x + self.radii.width - diff
  }
}

/// `shape-outside: polygon()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
  /// Flow-relative vertices.
  vertices: Vec<Point>,
  /// True when the polygon encloses no area.
  empty: bool,
  b_start: Au,
  b_end: Au,
}

impl PolygonShape {
  pub fn new(vertices: Vec<Point>) -> Self {
    // Polygons with fewer than three vertices enclose no area.
    // https://drafts.csswg.org/css-shapes/#funcdef-polygon
    if vertices.len() < 3 {
      return Self {
        vertices,
        empty: true,
        b_start: AU_MAX,
        b_end: AU_MIN,
      };
    }

    // A polygon whose vertices are all collinear encloses no area either.
    // Nonzero determinant of [p2-p0, p1-p0] means p0, p1, p2 are
    // non-collinear.
    let determinant = |a: Point, b: Point| a.x as i64 * b.y as i64 - a.y as i64 * b.x as i64;
    let delta = |p: Point, q: Point| Point::new(p.x - q.x, p.y - q.y);
    let p0 = vertices[0];
    let p1 = vertices[1];
    let entirely_collinear = vertices[2..]
      .iter()
      .all(|&p2| determinant(delta(p2, p0), delta(p1, p0)) == 0);
    if entirely_collinear {
      return Self {
        vertices,
        empty: true,
        b_start: AU_MAX,
        b_end: AU_MIN,
      };
    }

    let b_start = vertices.iter().map(|v| v.y).min().unwrap_or(AU_MAX);
    let b_end = vertices.iter().map(|v| v.y).max().unwrap_or(AU_MIN);
    Self {
      vertices,
      empty: false,
      b_start,
      b_end,
    }
  }

  /// The most extreme inline coordinate where the band crosses an edge of
  /// the polygon: the minimum over all edges when `leftmost`, the maximum
  /// otherwise.
  fn line_intercept(&self, b_start: Au, b_end: Au, leftmost: bool) -> Au {
    debug_assert!(!self.empty, "queried an empty polygon");
    debug_assert!(b_start <= b_end);

    let len = self.vertices.len();
    let mut intercept = if leftmost { AU_MAX } else { AU_MIN };

    for i in 0..len {
      let mut small = self.vertices[i];
      let mut big = self.vertices[(i + 1) % len];
      if small.y > big.y {
        std::mem::swap(&mut small, &mut big);
      }

      // Skip edges the band misses entirely and horizontal edges. A
      // horizontal edge's endpoints each participate in another edge, so
      // its extremes are still considered.
      if b_start >= big.y || b_end <= small.y || small.y == big.y {
        continue;
      }

      let at_start = if b_start <= small.y {
        small.x
      } else {
        x_intercept_at_y(b_start, small, big)
      };
      let at_end = if b_end >= big.y {
        big.x
      } else {
        x_intercept_at_y(b_end, small, big)
      };

      intercept = if leftmost {
        intercept.min(at_start).min(at_end)
      } else {
        intercept.max(at_start).max(at_end)
      };
    }

    intercept
  }
}

/// Solves x for the intersection of the horizontal line at `y` with the
/// non-horizontal segment `(p, q)`, `p.y <= y <= q.y`.
fn x_intercept_at_y(y: Au, p: Point, q: Point) -> Au {
  debug_assert!(p.y <= y && y <= q.y);
  debug_assert!(p.y != q.y);
  let numerator = (y - p.y) as i64 * (q.x - p.x) as i64;
  p.x + (numerator / (q.y - p.y) as i64) as Au
}

/// `shape-outside: <image>`.
///
/// The float area is the set of pixels whose alpha exceeds the
/// `shape-image-threshold`, stored as one interval per device-pixel row (or
/// column, in vertical writing modes): a rect one device pixel thick on the
/// block axis spanning the opaque inline range.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
  /// Sorted ascending on the block axis.
  intervals: Vec<Rect>,
  b_start: Au,
  b_end: Au,
}

impl ImageShape {
  /// Scans an alpha surface into intervals.
  ///
  /// The surface covers `content_rect` (physical) at
  /// `app_units_per_dev_pixel` resolution. Horizontal writing modes scan
  /// row by row top-to-bottom; vertical modes scan column by column
  /// left-to-right, reversing afterwards when the block axis runs
  /// right-to-left so the intervals stay sorted.
  pub fn from_alpha(
    pixels: &AlphaPixels,
    threshold: f32,
    app_units_per_dev_pixel: Au,
    content_rect: Rect,
    wm: WritingMode,
    container: Size,
  ) -> Self {
    debug_assert!(app_units_per_dev_pixel > 0);
    let threshold = (threshold.clamp(0.0, 1.0) * 255.0).floor() as u8;
    let aupd = app_units_per_dev_pixel;
    let vertical = block_axis_is_horizontal(wm);
    let block_reversed = !block_axis_positive(wm);

    let w = pixels.width() as i32;
    let h = pixels.height() as i32;
    let (b_size, i_size) = if vertical { (w, h) } else { (h, w) };

    let mut intervals = Vec::new();
    for b in 0..b_size {
      let mut i_min = -1;
      let mut i_max = -1;
      for i in 0..i_size {
        let (col, row) = if vertical { (b, i) } else { (i, b) };
        if pixels.alpha_at(col as u32, row as u32) > threshold {
          if i_min < 0 {
            i_min = i;
          }
          i_max = i;
        }
      }
      if i_min < 0 {
        continue;
      }

      // One block-axis device pixel thick, spanning the far edge of the
      // last opaque inline pixel.
      let size = Size::new((i_max + 1 - i_min) * aupd, aupd);
      let origin = flow_relative_point(wm, content_rect.top_left(), container);
      let origin = if block_reversed {
        // vertical-rl / sideways-rl: columns advance toward block-start,
        // so each interval steps in the negative block direction and the
        // array gets reversed below.
        origin.translate(i_min * aupd, -(b + 1) * aupd)
      } else if wm == WritingMode::SidewaysLr {
        // sideways-lr: rows advance in the negative inline direction.
        origin.translate(-(i_max + 1) * aupd, b * aupd)
      } else {
        origin.translate(i_min * aupd, b * aupd)
      };
      intervals.push(Rect::new(origin, size));
    }

    if block_reversed {
      intervals.reverse();
    }

    let (b_start, b_end) = match (intervals.first(), intervals.last()) {
      (Some(first), Some(last)) => (first.y(), last.max_y()),
      _ => (AU_MAX, AU_MIN),
    };
    Self {
      intervals,
      b_start,
      b_end,
    }
  }

  /// Index of the first interval containing `target`, or of the first
  /// interval past it.
  fn min_interval_index_containing_y(&self, target: Au) -> usize {
    let mut start = 0;
    let mut end = self.intervals.len();
    while start < end {
      let mid = start + (end - start) / 2;
      if self.intervals[mid].contains_y(target) {
        return mid;
      }
      if self.intervals[mid].y() < target {
        start = mid + 1;
      } else {
        end = mid;
      }
    }
    end
  }

  /// The most constraining inline edge among intervals overlapping the
  /// band. Returns the identity (`AU_MAX` for left, `AU_MIN` for right)
  /// when nothing overlaps, which the margin-box clip collapses to a no-op.
  fn line_edge(&self, b_start: Au, b_end: Au, left: bool) -> Au {
    debug_assert!(b_start <= b_end);
    let mut edge = if left { AU_MAX } else { AU_MIN };
    for interval in &self.intervals[self.min_interval_index_containing_y(b_start)..] {
      if interval.y() > b_end {
        break;
      }
      edge = if left {
        edge.min(interval.x())
      } else {
        edge.max(interval.max_x())
      };
    }
    edge
  }
}

/// The reference rect for a shape, deflated from the margin rect through the
/// box model.
fn shape_box_rect(
  frame: &FloatFrame,
  margin_rect: &LogicalRect,
  reference: ReferenceBox,
  wm: WritingMode,
  dir: Direction,
) -> LogicalRect {
  let logical = |physical| LogicalMargin::from_physical(wm, dir, physical);
  match reference {
    ReferenceBox::MarginBox => *margin_rect,
    ReferenceBox::BorderBox => margin_rect.deflate(logical(frame.style.margin)),
    ReferenceBox::PaddingBox => margin_rect
      .deflate(logical(frame.style.margin))
      .deflate(logical(frame.style.border)),
    ReferenceBox::ContentBox => margin_rect
      .deflate(logical(frame.style.margin))
      .deflate(logical(frame.style.border))
      .deflate(logical(frame.style.padding)),
  }
}

fn create_shape_box(
  frame: &FloatFrame,
  shape_box: &LogicalRect,
  wm: WritingMode,
  dir: Direction,
  container: Size,
) -> ShapeInfo {
  let rect = shape_box.to_flow_relative(wm, dir, container);
  let radii = frame
    .style
    .border_radii
    .filter(|radii| !radii.is_zero())
    .map(|radii| flow_relative_radii(&radii, wm));
  ShapeInfo::RoundedBox(RoundedBoxShape::new(rect, radii))
}

fn create_basic_shape(
  basic: &BasicShape,
  shape_box: &LogicalRect,
  wm: WritingMode,
  dir: Direction,
  container: Size,
) -> ShapeInfo {
  match basic {
    BasicShape::Inset {
      top,
      right,
      bottom,
      left,
      radii,
    } => create_inset(
      *top, *right, *bottom, *left, *radii, shape_box, wm, dir, container,
    ),
    BasicShape::Circle { radius, position } => {
      create_circle_or_ellipse(Some(*radius), None, position, shape_box, wm, dir, container)
    }
    BasicShape::Ellipse {
      radius_x,
      radius_y,
      position,
    } => create_circle_or_ellipse(
      None,
      Some((*radius_x, *radius_y)),
      position,
      shape_box,
      wm,
      dir,
      container,
    ),
    BasicShape::Polygon { vertices } => create_polygon(vertices, shape_box, wm, dir, container),
  }
}

/// `inset()` computes in physical space because its offsets are physical.
/// https://drafts.csswg.org/css-shapes-1/#funcdef-inset
#[allow(clippy::too_many_arguments)]
fn create_inset(
  top: Au,
  right: Au,
  bottom: Au,
  left: Au,
  radii: Option<BorderRadii>,
  shape_box: &LogicalRect,
  wm: WritingMode,
  dir: Direction,
  container: Size,
) -> ShapeInfo {
  let physical_box = shape_box.to_physical(wm, dir, container);
  let inset_rect = physical_box.deflate(crate::geometry::Margin::new(top, right, bottom, left));
  let flow_rect =
    LogicalRect::from_physical(wm, dir, inset_rect, container).to_flow_relative(wm, dir, container);
  let radii = radii
    .map(|radii| normalize_radii(radii, inset_rect.size))
    .filter(|radii| !radii.is_zero())
    .map(|radii| flow_relative_radii(&radii, wm));
  ShapeInfo::RoundedBox(RoundedBoxShape::new(flow_rect, radii))
}

/// The center and radii of `circle()`/`ellipse()` resolve in physical space
/// because `<position>` keywords are physical.
/// https://drafts.csswg.org/css-shapes-1/#funcdef-ellipse
fn create_circle_or_ellipse(
  circle_radius: Option<ShapeRadius>,
  ellipse_radii: Option<(ShapeRadius, ShapeRadius)>,
  position: &ShapePosition,
  shape_box: &LogicalRect,
  wm: WritingMode,
  dir: Direction,
  container: Size,
) -> ShapeInfo {
  let physical_box = shape_box.to_physical(wm, dir, container);
  let center = shape_position_point(position, physical_box);

  let (rx, ry) = if let Some(radius) = circle_radius {
    let r = resolve_circle_radius(radius, center, physical_box);
    (r, r)
  } else {
    let (radius_x, radius_y) = ellipse_radii.expect("circle or ellipse radii");
    (
      resolve_shape_radius(radius_x, center.x, physical_box.x(), physical_box.max_x()),
      resolve_shape_radius(radius_y, center.y, physical_box.y(), physical_box.max_y()),
    )
  };

  let flow_center = flow_relative_point(wm, center, container);
  let flow_radii = if block_axis_is_horizontal(wm) {
    Size::new(ry, rx)
  } else {
    Size::new(rx, ry)
  };
  ShapeInfo::Ellipse(EllipseShape::new(flow_center, flow_radii))
}

/// Polygon vertices resolve in physical space because CSS specifies them
/// physically.
/// https://drafts.csswg.org/css-shapes-1/#funcdef-polygon
fn create_polygon(
  vertices: &[Point],
  shape_box: &LogicalRect,
  wm: WritingMode,
  dir: Direction,
  container: Size,
) -> ShapeInfo {
  let physical_box = shape_box.to_physical(wm, dir, container);
  let flow_vertices = vertices
    .iter()
    .map(|vertex| {
      let physical = physical_box.top_left().translate(vertex.x, vertex.y);
      flow_relative_point(wm, physical, container)
    })
    .collect();
  ShapeInfo::Polygon(PolygonShape::new(flow_vertices))
}

fn create_image_shape(
  image: &ShapeImage,
  frame: &FloatFrame,
  wm: WritingMode,
  container: Size,
) -> Option<ShapeInfo> {
  // Not decoded yet: the float stays shapeless until a later reflow re-adds
  // it with the pixels present.
  let pixels = image.pixels()?;
  Some(ShapeInfo::Image(ImageShape::from_alpha(
    pixels,
    frame.style.shape_image_threshold,
    image.app_units_per_dev_pixel(),
    frame.content_rect,
    wm,
    container,
  )))
}

fn shape_position_point(position: &ShapePosition, rect: Rect) -> Point {
  let along = |component: &crate::style::ShapePositionComponent, start: Au, size: Au| {
    start + (component.alignment as f64 * size as f64) as Au + component.offset
  };
  Point::new(
    along(&position.x, rect.x(), rect.width()),
    along(&position.y, rect.y(), rect.height()),
  )
}

fn resolve_shape_radius(radius: ShapeRadius, center: Au, edge_min: Au, edge_max: Au) -> Au {
  let near = (center - edge_min).abs();
  let far = (edge_max - center).abs();
  match radius {
    ShapeRadius::Length(length) => length.max(0),
    ShapeRadius::ClosestSide => near.min(far),
    ShapeRadius::FarthestSide => near.max(far),
  }
}

fn resolve_circle_radius(radius: ShapeRadius, center: Point, rect: Rect) -> Au {
  match radius {
    ShapeRadius::Length(length) => length.max(0),
    keyword => {
      let horizontal = resolve_shape_radius(keyword, center.x, rect.x(), rect.max_x());
      let vertical = resolve_shape_radius(keyword, center.y, rect.y(), rect.max_y());
      if keyword == ShapeRadius::FarthestSide {
        horizontal.max(vertical)
      } else {
        horizontal.min(vertical)
      }
    }
  }
}

/// Scales corner radii down so adjacent corners never overlap along a side.
fn normalize_radii(radii: BorderRadii, size: Size) -> BorderRadii {
  let sides = [
    (size.width, radii.top_left.x, radii.top_right.x),
    (size.height, radii.top_right.y, radii.bottom_right.y),
    (size.width, radii.bottom_left.x, radii.bottom_right.x),
    (size.height, radii.top_left.y, radii.bottom_left.y),
  ];
  let mut ratio = 1.0f64;
  for (side, r1, r2) in sides {
    let sum = r1 as i64 + r2 as i64;
    if sum > side as i64 && sum > 0 {
      ratio = ratio.min(side as f64 / sum as f64);
    }
  }
  if ratio >= 1.0 {
    return radii;
  }
  let scale = |c: crate::style::CornerRadii| {
    crate::style::CornerRadii::new(
      (c.x as f64 * ratio) as Au,
      (c.y as f64 * ratio) as Au,
    )
  };
  BorderRadii {
    top_left: scale(radii.top_left),
    top_right: scale(radii.top_right),
    bottom_right: scale(radii.bottom_right),
    bottom_left: scale(radii.bottom_left),
  }
}

/// The inline intrusion depth of a rounded corner within a band.
///
/// Zero when the band only spans the straight middle of the side. When the
/// band ends inside the block-start corner arc, the intrusion is the arc
/// solved at the band's end; symmetrically for the block-end corner at the
/// band's start. `_l`/`_b` are the line-axis and block-axis radii.
#[allow(clippy::too_many_arguments)]
fn ellipse_line_intercept_diff(
  shape_box_b_start: Au,
  shape_box_b_end: Au,
  b_start_corner_radius_l: Au,
  b_start_corner_radius_b: Au,
  b_end_corner_radius_l: Au,
  b_end_corner_radius_b: Au,
  band_b_start: Au,
  band_b_end: Au,
) -> Au {
  debug_assert!(shape_box_b_start <= shape_box_b_end);
  debug_assert!(band_b_start <= band_b_end);

  // A band that reaches past both corner arcs intersects the straight
  // middle, so neither branch applies and the diff stays zero.
  if b_start_corner_radius_b > 0
    && band_b_end >= shape_box_b_start
    && band_b_end <= shape_box_b_start + b_start_corner_radius_b
  {
    let b = b_start_corner_radius_b - (band_b_end - shape_box_b_start);
    let intercept = ellipse_x_intercept_at_y(b, b_start_corner_radius_l, b_start_corner_radius_b);
    b_start_corner_radius_l - intercept
  } else if b_end_corner_radius_b > 0
    && band_b_start >= shape_box_b_end - b_end_corner_radius_b
    && band_b_start <= shape_box_b_end
  {
    let b = b_end_corner_radius_b - (shape_box_b_end - band_b_start);
    let intercept = ellipse_x_intercept_at_y(b, b_end_corner_radius_l, b_end_corner_radius_b);
    b_end_corner_radius_l - intercept
  } else {
    0
  }
}

/// Solves x in the ellipse equation (x/rx)² + (y/ry)² = 1.
fn ellipse_x_intercept_at_y(y: Au, radius_x: Au, radius_y: Au) -> Au {
  debug_assert!(radius_y > 0);
  let ratio = y as f64 / radius_y as f64;
  (radius_x as f64 * (1.0 - ratio * ratio).max(0.0).sqrt()) as Au
}
