//! The 2D drawing capability particles render through.
//!
//! The simulation never talks to the GPU directly. It issues canvas-style
//! path commands to a [`Surface`]:
//!
//! ```ignore
//! surface.begin_path();
//! surface.move_to(trail[0]);
//! surface.line_to(trail[1]);
//! surface.set_stroke_style(color);
//! surface.stroke();
//! ```
//!
//! Two implementations ship with the crate:
//!
//! - [`LineBatch`] tessellates stroked paths into colored triangles that the
//!   GPU renderer uploads once per frame.
//! - [`CommandRecorder`] keeps the raw command stream, which is what tests
//!   assert against.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// A canvas-like 2D drawing target.
pub trait Surface {
    /// Erase everything drawn so far this frame.
    fn clear(&mut self);
    /// Start a new, empty path.
    fn begin_path(&mut self);
    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: Vec2);
    /// Extend the current subpath to `point`.
    fn line_to(&mut self, point: Vec2);
    /// Draw the current path with the current stroke style and width.
    fn stroke(&mut self);
    /// Set the color used by subsequent strokes.
    fn set_stroke_style(&mut self, color: Vec4);
    /// Set the width used by subsequent strokes.
    fn set_line_width(&mut self, width: f32);
}

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Stroke,
    StrokeStyle(Vec4),
    LineWidth(f32),
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `Stroke` commands recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_stroke_style(&mut self, color: Vec4) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }
}

/// Vertex layout shared with the trail shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Surface coordinates (pixels, y down).
    pub position: [f32; 2],
    /// RGBA, 0.0-1.0.
    pub color: [f32; 4],
}

/// Vertices emitted per stroked segment (two triangles).
pub const VERTICES_PER_SEGMENT: usize = 6;

/// Longest miter allowed, as a multiple of the line width (canvas default).
const MITER_LIMIT: f32 = 10.0;

/// Surface that turns stroked paths into triangle-list vertices.
///
/// Each segment of a stroked path becomes a quad `line_width` units wide,
/// centered on the segment. Neighbouring quads share mitered corners, so
/// trails bend without notches. Repeated points are skipped.
#[derive(Debug)]
pub struct LineBatch {
    vertices: Vec<LineVertex>,
    subpaths: Vec<Vec<Vec2>>,
    stroke_style: Vec4,
    line_width: f32,
}

impl Default for LineBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            subpaths: Vec::new(),
            stroke_style: Vec4::ONE,
            line_width: 1.0,
        }
    }
}

impl LineBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices stroked since the last clear.
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Current stroke color.
    pub fn stroke_style(&self) -> Vec4 {
        self.stroke_style
    }

    /// Current stroke width.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    fn push_polyline(&mut self, points: &[Vec2]) {
        let mut path: Vec<Vec2> = Vec::with_capacity(points.len());
        for point in points {
            if path.last() != Some(point) {
                path.push(*point);
            }
        }
        if path.len() < 2 {
            return;
        }

        let half_width = self.line_width * 0.5;
        let normals: Vec<Vec2> = path
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).normalize_or_zero().perp())
            .collect();
        let last = normals.len() - 1;
        let offsets: Vec<Vec2> = (0..path.len())
            .map(|i| miter_offset(normals[i.saturating_sub(1)], normals[i.min(last)], half_width))
            .collect();

        let color = self.stroke_style.to_array();
        for i in 0..normals.len() {
            let (a, b) = (path[i], path[i + 1]);
            let (oa, ob) = (offsets[i], offsets[i + 1]);
            let corners = [a + oa, a - oa, b + ob, b + ob, a - oa, b - ob];
            self.vertices.extend(corners.iter().map(|p| LineVertex {
                position: p.to_array(),
                color,
            }));
        }
    }
}

/// Offset from a path point to its left edge, joining the segments with
/// normals `before` and `after`.
fn miter_offset(before: Vec2, after: Vec2, half_width: f32) -> Vec2 {
    let miter = (before + after).normalize_or_zero();
    if miter == Vec2::ZERO {
        // Path doubles back on itself.
        return before * half_width;
    }
    let cos_half = miter.dot(before);
    if cos_half < 1.0 / MITER_LIMIT {
        miter * half_width
    } else {
        miter * (half_width / cos_half)
    }
}

impl Surface for LineBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.subpaths.clear();
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Vec2) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Vec2) {
        // A line_to with no open subpath behaves like move_to.
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn stroke(&mut self) {
        let subpaths = std::mem::take(&mut self.subpaths);
        for subpath in &subpaths {
            self.push_polyline(subpath);
        }
        // Stroking does not consume the path.
        self.subpaths = subpaths;
    }

    fn set_stroke_style(&mut self, color: Vec4) {
        self.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }
}
