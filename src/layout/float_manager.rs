//! Float registry and band queries
//!
//! The [`FloatManager`] is the arbiter of float placement within one block
//! formatting context. The reflow driver appends floats as it discovers
//! them, queries the inline space left over for each line, computes
//! clearance, and checkpoints the whole state around speculative reflows.
//!
//! Floats are stored in a flow-relative frame: line-left × block-start, in
//! app units, with the manager's origin already applied. The registry is an
//! append-only log; each entry carries the running maximum block-end per
//! side, which lets queries walk the log tail-first and stop as soon as no
//! earlier float can reach the band.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::frame::{FloatFrame, FrameId};
use crate::geometry::{Au, Margin, Rect, Size, AU_MAX, AU_MIN};
use crate::layout::damage::FloatDamage;
use crate::layout::float_shape::ShapeInfo;
use crate::layout::logical::{LogicalMargin, LogicalRect, LogicalSize};
use crate::style::{
  block_axis_is_horizontal, block_axis_positive, line_axis_positive, Clear, Direction, FloatSide,
  WritingMode,
};

/// How [`FloatManager::get_flow_area`] interprets the requested band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandInfoType {
  /// Starting at the given block coordinate, find the largest band that is
  /// uniform: no float edge crosses its interior. The returned block size
  /// may be smaller than requested.
  BandFromPoint,
  /// The caller fixes the band's block extent; return the narrowest inline
  /// extent that accommodates every float anywhere within it.
  WidthWithinHeight,
}

/// Which geometry a query holds floats to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
  /// The float's margin box only.
  Margin,
  /// The float's `shape-outside`, clipped to its margin box.
  ShapeOutside,
}

/// Result of a flow-area query, in the caller's logical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowArea {
  pub i_start: Au,
  pub b_start: Au,
  pub i_size: Au,
  pub b_size: Au,
  /// True only when a float's exclusion actually intruded on the content
  /// area's inline span, not merely because a float exists at this band.
  pub has_floats: bool,
}

/// Options for [`FloatManager::clear_floats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearFlags {
  /// Compute clearance from the registered floats even when a float was
  /// pushed or split past a break on the cleared side.
  pub dont_clear_pushed_floats: bool,
}

/// A checkpoint of the manager's origin, break flags, and registry length.
///
/// Restoring truncates the registry back to the recorded length; the damage
/// sink is deliberately not captured.
#[derive(Debug, Clone)]
pub struct SavedState {
  line_left: Au,
  block_start: Au,
  pushed_left_float_past_break: bool,
  pushed_right_float_past_break: bool,
  split_left_float_across_break: bool,
  split_right_float_across_break: bool,
  float_count: usize,
}

/// One registered float.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatInfo {
  frame: FrameId,
  side: FloatSide,
  /// Margin rect in the flow-relative frame, origin already applied.
  rect: Rect,
  /// Exclusion shape, already origin-translated; absent means the margin
  /// box is the exclusion.
  shape: Option<ShapeInfo>,
  /// Running max block-end over all left floats up to and including this
  /// entry. Monotone non-decreasing with index.
  left_b_end: Au,
  /// Same for right floats.
  right_b_end: Au,
}

impl FloatInfo {
  fn new(
    frame: &FloatFrame,
    line_left: Au,
    block_start: Au,
    margin_rect: &LogicalRect,
    wm: WritingMode,
    dir: Direction,
    container: Size,
  ) -> Self {
    let rect = margin_rect
      .to_flow_relative(wm, dir, container)
      .translate(line_left, block_start);

    // A shape's float area is clipped to the margin box, so an empty margin
    // box never grows a shape.
    // https://drafts.csswg.org/css-shapes/#relation-to-box-model-and-float-behavior
    let shape = if rect.is_empty() {
      None
    } else {
      ShapeInfo::build(frame, margin_rect, wm, dir, container).map(|mut shape| {
        shape.translate(line_left, block_start);
        shape
      })
    };

    Self {
      frame: frame.id,
      side: frame.style.float.physical(dir),
      rect,
      shape,
      left_b_end: AU_MIN,
      right_b_end: AU_MIN,
    }
  }

  pub fn frame(&self) -> FrameId {
    self.frame
  }

  pub fn side(&self) -> FloatSide {
    self.side
  }

  /// The margin rect in the manager's flow-relative frame.
  pub fn rect(&self) -> Rect {
    self.rect
  }

  pub fn has_shape(&self) -> bool {
    self.shape.is_some()
  }

  pub(crate) fn left_b_end(&self) -> Au {
    self.left_b_end
  }

  pub(crate) fn right_b_end(&self) -> Au {
    self.right_b_end
  }

  /// Line-left edge of the exclusion within a band. The margin box caps the
  /// shape from the line-left side.
  fn line_left(&self, shape_type: ShapeType, b_start: Au, b_end: Au) -> Au {
    match (shape_type, &self.shape) {
      (ShapeType::Margin, _) | (ShapeType::ShapeOutside, None) => self.rect.x(),
      (ShapeType::ShapeOutside, Some(shape)) => self.rect.x().max(shape.line_left(b_start, b_end)),
    }
  }

  fn line_right(&self, shape_type: ShapeType, b_start: Au, b_end: Au) -> Au {
    match (shape_type, &self.shape) {
      (ShapeType::Margin, _) | (ShapeType::ShapeOutside, None) => self.rect.max_x(),
      (ShapeType::ShapeOutside, Some(shape)) => {
        self.rect.max_x().min(shape.line_right(b_start, b_end))
      }
    }
  }

  fn b_start(&self, shape_type: ShapeType) -> Au {
    match (shape_type, &self.shape) {
      (ShapeType::Margin, _) | (ShapeType::ShapeOutside, None) => self.rect.y(),
      (ShapeType::ShapeOutside, Some(shape)) => self.rect.y().max(shape.b_start()),
    }
  }

  fn b_end(&self, shape_type: ShapeType) -> Au {
    match (shape_type, &self.shape) {
      (ShapeType::Margin, _) | (ShapeType::ShapeOutside, None) => self.rect.max_y(),
      (ShapeType::ShapeOutside, Some(shape)) => self.rect.max_y().min(shape.b_end()),
    }
  }

  fn is_empty(&self, shape_type: ShapeType) -> bool {
    match (shape_type, &self.shape) {
      (ShapeType::Margin, _) | (ShapeType::ShapeOutside, None) => self.rect.is_empty(),
      (ShapeType::ShapeOutside, Some(shape)) => shape.is_empty(),
    }
  }
}

/// Tracks the floats of one block formatting context.
#[derive(Debug)]
pub struct FloatManager {
  wm: WritingMode,
  dir: Direction,
  /// Origin applied to new floats and query inputs; stored floats already
  /// include the origin current at their insertion.
  line_left: Au,
  block_start: Au,
  floats: Vec<FloatInfo>,
  damage: FloatDamage,
  pushed_left_float_past_break: bool,
  pushed_right_float_past_break: bool,
  split_left_float_across_break: bool,
  split_right_float_across_break: bool,
}

impl FloatManager {
  pub fn new(wm: WritingMode, dir: Direction) -> Self {
    Self {
      wm,
      dir,
      line_left: 0,
      block_start: 0,
      floats: Vec::new(),
      damage: FloatDamage::new(),
      pushed_left_float_past_break: false,
      pushed_right_float_past_break: false,
      split_left_float_across_break: false,
      split_right_float_across_break: false,
    }
  }

  /// Like [`FloatManager::new`] but reuses storage from a recently
  /// discarded manager when available. Managers are created and thrown away
  /// densely during reflow; recycling their allocations is invisible apart
  /// from speed.
  pub fn recycled(wm: WritingMode, dir: Direction) -> Self {
    let mut manager = Self::new(wm, dir);
    if let Some(storage) = MANAGER_CACHE.lock().storages.pop() {
      manager.floats = storage.floats;
      manager.damage = FloatDamage::from_storage(storage.damage);
    }
    manager
  }

  /// Returns this manager's storage to the instance cache, unless the cache
  /// is full or has been shut down.
  pub fn discard(self) {
    let mut cache = MANAGER_CACHE.lock();
    if cache.shut_down || cache.storages.len() >= FLOAT_MANAGER_CACHE_SIZE {
      return;
    }
    let mut floats = self.floats;
    floats.clear();
    cache.storages.push(ManagerStorage {
      floats,
      damage: self.damage.take_storage(),
    });
  }

  pub fn writing_mode(&self) -> WritingMode {
    self.wm
  }

  pub fn direction(&self) -> Direction {
    self.dir
  }

  /// Moves the origin. Stored floats keep the coordinates they were
  /// inserted with; only later insertions and queries see the new origin.
  pub fn translate(&mut self, d_line_left: Au, d_block_start: Au) {
    self.line_left += d_line_left;
    self.block_start += d_block_start;
  }

  pub fn origin(&self) -> (Au, Au) {
    (self.line_left, self.block_start)
  }

  pub fn has_any_floats(&self) -> bool {
    !self.floats.is_empty()
  }

  pub fn float_count(&self) -> usize {
    self.floats.len()
  }

  pub(crate) fn float_infos(&self) -> &[FloatInfo] {
    &self.floats
  }

  /// Registers a float. `margin_rect` is the float's margin box in the
  /// caller's logical frame, relative to the current origin.
  pub fn add_float(
    &mut self,
    frame: &FloatFrame,
    margin_rect: &LogicalRect,
    wm: WritingMode,
    dir: Direction,
    container: Size,
  ) {
    self.check_writing_mode(wm);
    debug_assert!(margin_rect.i_size >= 0, "negative inline size");
    debug_assert!(margin_rect.b_size >= 0, "negative block size");

    let mut info = FloatInfo::new(
      frame,
      self.line_left,
      self.block_start,
      margin_rect,
      wm,
      dir,
      container,
    );

    if let Some(tail) = self.floats.last() {
      info.left_b_end = tail.left_b_end;
      info.right_b_end = tail.right_b_end;
    }
    let this_b_end = info.rect.max_y();
    let side_b_end = match info.side {
      FloatSide::Left => &mut info.left_b_end,
      FloatSide::Right => &mut info.right_b_end,
    };
    *side_b_end = (*side_b_end).max(this_b_end);

    self.floats.push(info);
  }

  /// Answers the inline region available to content within a block band.
  ///
  /// `b_coord` and the result are relative to the current origin.
  /// `content_area` is the containing block's span in the caller's logical
  /// frame. With `saved_state`, only floats registered before the
  /// checkpoint are considered.
  #[allow(clippy::too_many_arguments)]
  pub fn get_flow_area(
    &self,
    wm: WritingMode,
    dir: Direction,
    b_coord: Au,
    b_size: Au,
    band_info: BandInfoType,
    shape_type: ShapeType,
    content_area: &LogicalRect,
    saved_state: Option<&SavedState>,
    container: Size,
  ) -> FlowArea {
    self.check_writing_mode(wm);
    debug_assert!(b_size >= 0, "unexpected max block size");
    debug_assert!(
      content_area.i_size >= 0,
      "unexpected content area inline size"
    );

    let block_start = b_coord.saturating_add(self.block_start);

    let float_count = match saved_state {
      Some(state) => {
        debug_assert!(state.float_count <= self.floats.len(), "bad state");
        state.float_count
      }
      None => self.floats.len(),
    };
    let floats = &self.floats[..float_count];

    // No floats at all, or the band is past the last one on both sides.
    let all_past = floats
      .last()
      .map_or(true, |tail| {
        tail.left_b_end <= block_start && tail.right_b_end <= block_start
      });
    if all_past {
      return FlowArea {
        i_start: content_area.i_start,
        b_start: b_coord,
        i_size: content_area.i_size,
        b_size,
        has_floats: false,
      };
    }

    let mut block_end = if b_size == AU_MAX {
      debug_assert!(
        band_info == BandInfoType::BandFromPoint,
        "unbounded b_size needs BandFromPoint"
      );
      AU_MAX
    } else {
      block_start.saturating_add(b_size)
    };

    let mut line_left = self.line_left + content_area.line_left(wm, dir, container);
    let mut line_right = self.line_left + content_area.line_right(wm, dir, container);
    if line_right < line_left {
      line_right = line_left;
    }

    // Walk backwards until the cumulative summaries show nothing earlier
    // can intersect the band.
    let mut has_floats = false;
    for fi in floats.iter().rev() {
      if fi.left_b_end <= block_start && fi.right_b_end <= block_start {
        break;
      }
      if fi.is_empty(shape_type) {
        continue;
      }

      let float_b_start = fi.b_start(shape_type);
      let float_b_end = fi.b_end(shape_type);
      if block_start < float_b_start && band_info == BandInfoType::BandFromPoint {
        // The float is below this band; the uniform band ends where the
        // float begins.
        if float_b_start < block_end {
          block_end = float_b_start;
        }
      } else if block_start < float_b_end
        && (float_b_start < block_end || (float_b_start == block_end && block_start == block_end))
      {
        // In the zero-height WidthWithinHeight case, floats starting
        // exactly at the band are included so the result is never wider
        // than a BandFromPoint query at the same coordinate.

        // BandFromPoint considers only the band's start coordinate when
        // asking the shape for its edge.
        let band_block_end = if band_info == BandInfoType::BandFromPoint {
          block_start
        } else {
          block_end
        };
        match fi.side {
          FloatSide::Left => {
            let edge = fi.line_right(shape_type, block_start, band_block_end);
            if edge > line_left {
              line_left = edge;
              has_floats = true;
            }
          }
          FloatSide::Right => {
            let edge = fi.line_left(shape_type, block_start, band_block_end);
            if edge < line_right {
              line_right = edge;
              has_floats = true;
            }
          }
        }

        if float_b_end < block_end && band_info == BandInfoType::BandFromPoint {
          block_end = float_b_end;
        }
      }
    }

    let b_size_out = if block_end == AU_MAX {
      AU_MAX
    } else {
      block_end - block_start
    };
    let i_start = match dir {
      Direction::Ltr => line_left - self.line_left,
      Direction::Rtl => {
        self.line_left - line_right + LogicalSize::from_physical(wm, container).i_size
      }
    };

    FlowArea {
      i_start,
      b_start: block_start - self.block_start,
      i_size: line_right - line_left,
      b_size: b_size_out,
      has_floats,
    }
  }

  /// The block coordinate content must move to in order to clear floats of
  /// the given side, relative to the current origin.
  ///
  /// Returns `AU_MAX` when a float on a cleared side was pushed or split
  /// past a break: clearance cannot resolve within this fragment.
  pub fn clear_floats(&self, b_coord: Au, break_type: Clear, flags: ClearFlags) -> Au {
    if !flags.dont_clear_pushed_floats && self.clear_continues(break_type) {
      return AU_MAX;
    }
    if !self.has_any_floats() {
      return b_coord;
    }

    let mut block_end = b_coord.saturating_add(self.block_start);
    let tail = &self.floats[self.floats.len() - 1];
    match break_type {
      Clear::Both => {
        block_end = block_end.max(tail.left_b_end).max(tail.right_b_end);
      }
      Clear::Left => {
        block_end = block_end.max(tail.left_b_end);
      }
      Clear::Right => {
        block_end = block_end.max(tail.right_b_end);
      }
      Clear::None => {}
    }

    block_end - self.block_start
  }

  /// Whether clearance on the given side is blocked by a float carried
  /// across a break.
  pub fn clear_continues(&self, break_type: Clear) -> bool {
    let clears_left = matches!(break_type, Clear::Left | Clear::Both);
    let clears_right = matches!(break_type, Clear::Right | Clear::Both);
    ((self.pushed_left_float_past_break || self.split_left_float_across_break) && clears_left)
      || ((self.pushed_right_float_past_break || self.split_right_float_across_break)
        && clears_right)
  }

  /// Block-start of the most recently added float, relative to the current
  /// origin. `AU_MAX` when a float was pushed past a break (no progress is
  /// provable), `AU_MIN` when the registry is empty.
  pub fn get_lowest_float_top(&self) -> Au {
    if self.pushed_left_float_past_break || self.pushed_right_float_past_break {
      return AU_MAX;
    }
    match self.floats.last() {
      Some(tail) => tail.rect.y() - self.block_start,
      None => AU_MIN,
    }
  }

  /// Drops trailing entries whose frame is in `frames`, stopping at the
  /// first trailing entry that is not. Entries before that boundary stay
  /// even if listed: removing interior entries would invalidate the
  /// cumulative summaries.
  pub fn remove_trailing_regions<I>(&mut self, frames: I)
  where
    I: IntoIterator<Item = FrameId>,
  {
    let frame_set: FxHashSet<FrameId> = frames.into_iter().collect();
    if frame_set.is_empty() {
      return;
    }

    let mut new_len = self.floats.len();
    while new_len > 0 && frame_set.contains(&self.floats[new_len - 1].frame) {
      new_len -= 1;
    }
    self.floats.truncate(new_len);

    debug_assert!(
      self.floats.iter().all(|fi| !frame_set.contains(&fi.frame)),
      "float region removal was requested for a non-trailing entry"
    );
  }

  /// Captures the origin, the break flags, and the registry length. The
  /// damage sink is intentionally left out; see [`crate::layout::damage`].
  pub fn push_state(&self) -> SavedState {
    SavedState {
      line_left: self.line_left,
      block_start: self.block_start,
      pushed_left_float_past_break: self.pushed_left_float_past_break,
      pushed_right_float_past_break: self.pushed_right_float_past_break,
      split_left_float_across_break: self.split_left_float_across_break,
      split_right_float_across_break: self.split_right_float_across_break,
      float_count: self.floats.len(),
    }
  }

  /// Restores a checkpoint, truncating floats added since.
  pub fn pop_state(&mut self, state: &SavedState) {
    self.line_left = state.line_left;
    self.block_start = state.block_start;
    self.pushed_left_float_past_break = state.pushed_left_float_past_break;
    self.pushed_right_float_past_break = state.pushed_right_float_past_break;
    self.split_left_float_across_break = state.split_left_float_across_break;
    self.split_right_float_across_break = state.split_right_float_across_break;

    debug_assert!(
      state.float_count <= self.floats.len(),
      "somebody misused push_state/pop_state"
    );
    self.floats.truncate(state.float_count);
  }

  pub fn set_pushed_float_past_break(&mut self, side: FloatSide) {
    match side {
      FloatSide::Left => self.pushed_left_float_past_break = true,
      FloatSide::Right => self.pushed_right_float_past_break = true,
    }
  }

  pub fn pushed_float_past_break(&self, side: FloatSide) -> bool {
    match side {
      FloatSide::Left => self.pushed_left_float_past_break,
      FloatSide::Right => self.pushed_right_float_past_break,
    }
  }

  pub fn set_split_float_across_break(&mut self, side: FloatSide) {
    match side {
      FloatSide::Left => self.split_left_float_across_break = true,
      FloatSide::Right => self.split_right_float_across_break = true,
    }
  }

  pub fn split_float_across_break(&self, side: FloatSide) -> bool {
    match side {
      FloatSide::Left => self.split_left_float_across_break,
      FloatSide::Right => self.split_right_float_across_break,
    }
  }

  pub fn damage(&self) -> &FloatDamage {
    &self.damage
  }

  pub fn damage_mut(&mut self) -> &mut FloatDamage {
    &mut self.damage
  }

  /// The float's region: its rect at the normal position, inflated by its
  /// margins, with negative sizes collapsed while preserving the edge that
  /// matters for the float's side.
  pub fn calculate_region_for(
    wm: WritingMode,
    dir: Direction,
    frame: &FloatFrame,
    margin: LogicalMargin,
    container: Size,
  ) -> LogicalRect {
    let rect = Rect::new(frame.normal_position, frame.rect.size);
    let mut region = LogicalRect::from_physical(wm, dir, rect, container).inflate(margin);

    if region.i_size < 0 {
      // Keep the inline-end margin edge for floats hugging line-left and
      // the inline-start edge for the others.
      let side = frame.style.float.physical(dir);
      if (side == FloatSide::Left) == (dir == Direction::Ltr) {
        region.i_start = region.i_end();
      }
      region.i_size = 0;
    }
    if region.b_size < 0 {
      region.b_size = 0;
    }
    region
  }

  /// Reads the float's stored region: its current rect plus the margin
  /// correction recorded by [`FloatManager::store_region_for`].
  pub fn get_region_for(
    wm: WritingMode,
    dir: Direction,
    frame: &FloatFrame,
    container: Size,
  ) -> LogicalRect {
    let mut region = LogicalRect::from_physical(wm, dir, frame.rect, container);
    if let Some(margin) = frame.region_margin {
      region = region.inflate(LogicalMargin::from_physical(wm, dir, margin));
    }
    region
  }

  /// Records the difference between `region` and the frame's rect on the
  /// frame, so the region survives frame-tree round trips.
  pub fn store_region_for(
    wm: WritingMode,
    dir: Direction,
    frame: &mut FloatFrame,
    region: &LogicalRect,
    container: Size,
  ) {
    let physical = region.to_physical(wm, dir, container);
    if physical == frame.rect {
      frame.region_margin = None;
    } else {
      frame.region_margin = Some(Margin::new(
        frame.rect.y() - physical.y(),
        physical.max_x() - frame.rect.max_x(),
        physical.max_y() - frame.rect.max_y(),
        frame.rect.x() - physical.x(),
      ));
    }
  }

  fn check_writing_mode(&self, wm: WritingMode) {
    debug_assert!(
      block_axis_is_horizontal(wm) == block_axis_is_horizontal(self.wm)
        && block_axis_positive(wm) == block_axis_positive(self.wm)
        && line_axis_positive(wm) == line_axis_positive(self.wm),
      "incompatible writing modes"
    );
    let _ = wm;
  }
}

const FLOAT_MANAGER_CACHE_SIZE: usize = 4;

struct ManagerStorage {
  floats: Vec<FloatInfo>,
  damage: Vec<(Au, Au)>,
}

struct ManagerCache {
  storages: Vec<ManagerStorage>,
  shut_down: bool,
}

static MANAGER_CACHE: Mutex<ManagerCache> = Mutex::new(ManagerCache {
  storages: Vec::new(),
  shut_down: false,
});

/// Drains the manager-instance cache and refuses further caching. Called at
/// module shutdown.
pub fn shutdown_cache() {
  let mut cache = MANAGER_CACHE.lock();
  cache.storages.clear();
  cache.shut_down = true;
}
