//! Frame renderer - draws one complete frame of the voxel animation.
//!
//! Every call starts from a blank canvas and the immutable base colors, so
//! frames can be rendered in any order and re-rendered without side effects.

use glam::{Vec2, Vec3};
use image::RgbaImage;

use super::{
    Camera, Canvas, ColorArray, TextAlign, Viewport, VoxelGrid, box_corners, frame_colors,
    measure_text, z_position,
};
use crate::schema::{AnimationConfig, ConfigError, Rgba, SceneConfig};

/// Gap between the cube and its tick labels, in pixels.
const TICK_PAD: f32 = 14.0;

/// Text scale for tick labels and axis titles.
const LABEL_SCALE: u32 = 1;

/// Text scale for the figure title.
const TITLE_SCALE: u32 = 2;

/// Brightness range used for face shading.
const MIN_SHADE: f32 = 0.55;

/// Fraction of the image reserved for the cube: (left, top, width, height).
const PLOT_AREA: (f32, f32, f32, f32) = (0.29, 0.20, 0.42, 0.56);

/// Errors produced while rendering frames.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Frame index {index} out of range (frame count {count})")]
    FrameOutOfRange { index: usize, count: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// One rendered animation frame.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Position of the frame in the animation.
    pub index: usize,
    /// Height of the marker cell in this frame.
    pub z: usize,
    /// Per-cell colors used for this frame.
    pub colors: ColorArray,
    /// Opaque RGBA raster of the frame.
    pub image: RgbaImage,
}

/// A single quad of a voxel surface, in grid coordinates.
#[derive(Debug, Clone, Copy)]
struct Face {
    corners: [Vec3; 4],
    normal: Vec3,
    color: Rgba,
}

impl Face {
    fn centroid(&self) -> Vec3 {
        (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) * 0.25
    }
}

/// The six face directions as (axis, sign).
const FACE_DIRECTIONS: [(usize, i32); 6] = [(0, -1), (0, 1), (1, -1), (1, 1), (2, -1), (2, 1)];

/// Renders frames of the voxel animation.
pub struct FrameRenderer {
    scene: SceneConfig,
    animation: AnimationConfig,
    grid: VoxelGrid,
    base_colors: ColorArray,
    camera: Camera,
    viewport: Viewport,
    light: Vec3,
}

impl FrameRenderer {
    /// Create a renderer for a validated configuration.
    pub fn new(scene: SceneConfig, animation: AnimationConfig) -> Result<Self, RenderError> {
        scene.validate()?;
        animation.validate(scene.depth)?;

        let extent = [scene.width, scene.height, scene.depth];
        let grid = VoxelGrid::filled(scene.width, scene.height, scene.depth);
        let base_colors =
            ColorArray::uniform(scene.width, scene.height, scene.depth, scene.base_color);
        let camera = Camera::from_presentation(&scene.presentation, extent);

        let projected: Vec<Vec2> = box_corners(extent)
            .iter()
            .map(|&c| camera.project(c))
            .collect();
        let (w, h) = (animation.image_width as f32, animation.image_height as f32);
        let viewport = Viewport::fit(
            &projected,
            (
                PLOT_AREA.0 * w,
                PLOT_AREA.1 * h,
                PLOT_AREA.2 * w,
                PLOT_AREA.3 * h,
            ),
        );

        log::debug!(
            "Renderer ready: {}x{}x{} grid, {}x{} px, {} frames",
            scene.width,
            scene.height,
            scene.depth,
            animation.image_width,
            animation.image_height,
            animation.frame_count
        );

        Ok(Self {
            scene,
            animation,
            grid,
            base_colors,
            camera,
            viewport,
            light: Vec3::new(-1.0, 1.0, 2.0).normalize(),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.animation.frame_count
    }

    pub fn base_colors(&self) -> &ColorArray {
        &self.base_colors
    }

    /// Grid-space point to pixel coordinates.
    #[inline]
    pub fn to_pixel(&self, p: Vec3) -> Vec2 {
        self.viewport.to_pixel(self.camera.project(p))
    }

    fn check_index(&self, frame_index: usize) -> Result<(), RenderError> {
        if frame_index >= self.animation.frame_count {
            return Err(RenderError::FrameOutOfRange {
                index: frame_index,
                count: self.animation.frame_count,
            });
        }
        Ok(())
    }

    /// Color state for a frame: the base colors with the marker cell recolored.
    pub fn frame_colors(&self, frame_index: usize) -> Result<ColorArray, RenderError> {
        self.check_index(frame_index)?;
        let z = z_position(frame_index, self.scene.depth);
        Ok(frame_colors(
            &self.base_colors,
            self.scene.highlight_column,
            z,
            self.scene.highlight_color,
        ))
    }

    /// Render one frame.
    pub fn render_frame(&self, frame_index: usize) -> Result<RenderedFrame, RenderError> {
        let colors = self.frame_colors(frame_index)?;
        let z = z_position(frame_index, self.scene.depth);

        let mut canvas = Canvas::new(
            self.animation.image_width,
            self.animation.image_height,
            self.scene.presentation.background,
        );

        self.draw_voxels(&mut canvas, &colors);
        self.draw_annotations(&mut canvas);

        log::debug!("Rendered frame {} (marker z = {})", frame_index, z);

        Ok(RenderedFrame {
            index: frame_index,
            z,
            colors,
            image: canvas.into_image(),
        })
    }

    /// Render every frame in order.
    pub fn frames(&self) -> impl Iterator<Item = Result<RenderedFrame, RenderError>> + '_ {
        (0..self.frame_count()).map(move |i| self.render_frame(i))
    }

    fn draw_voxels(&self, canvas: &mut Canvas, colors: &ColorArray) {
        let mut faces = visible_faces(&self.grid, colors);

        // Painter's algorithm: farthest faces first.
        faces.sort_by(|a, b| {
            self.camera
                .depth(a.centroid())
                .total_cmp(&self.camera.depth(b.centroid()))
        });

        for face in &faces {
            let points = face.corners.map(|c| self.to_pixel(c));
            let n = self.camera.direction(face.normal);
            let shade = MIN_SHADE + (1.0 - MIN_SHADE) * n.dot(self.light).abs();
            canvas.fill_polygon(&points, face.color.shaded(shade));
            canvas.draw_outline(&points, self.scene.edge_color);
        }
    }

    fn draw_annotations(&self, canvas: &mut Canvas) {
        let p = &self.scene.presentation;
        let (w, h) = (self.scene.width as f32, self.scene.height as f32);
        let d = self.scene.depth as f32;
        let eye = self.camera.eye;

        // Axes run along the bottom edges nearest the viewer.
        let y_edge = if eye.y >= 0.0 { h } else { 0.0 };
        let x_edge = if eye.x >= 0.0 { w } else { 0.0 };
        let center = self.to_pixel(Vec3::new(w * 0.5, h * 0.5, 0.0));

        let x_ticks: Vec<Vec3> = (0..self.scene.width)
            .map(|i| Vec3::new(i as f32 + 0.5, y_edge, 0.0))
            .collect();
        self.draw_axis(
            canvas,
            &x_ticks,
            &p.x_labels,
            &p.x_axis_label,
            Vec3::new(w * 0.5, y_edge, 0.0),
            |tick| (tick - center).normalize_or_zero(),
        );

        let y_ticks: Vec<Vec3> = (0..self.scene.height)
            .map(|i| Vec3::new(x_edge, i as f32 + 0.5, 0.0))
            .collect();
        self.draw_axis(
            canvas,
            &y_ticks,
            &p.y_labels,
            &p.y_axis_label,
            Vec3::new(x_edge, h * 0.5, 0.0),
            |tick| (tick - center).normalize_or_zero(),
        );

        // The vertical axis sits on the silhouette edge farthest to the right.
        let (zx, zy) = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .into_iter()
            .max_by(|a, b| {
                let pa = self.to_pixel(Vec3::new(a.0, a.1, 0.0)).x;
                let pb = self.to_pixel(Vec3::new(b.0, b.1, 0.0)).x;
                pa.total_cmp(&pb)
            })
            .unwrap_or((w, h));
        let z_ticks: Vec<Vec3> = (0..self.scene.depth)
            .map(|i| Vec3::new(zx, zy, i as f32 + 0.5))
            .collect();
        self.draw_axis(
            canvas,
            &z_ticks,
            &p.z_labels,
            &p.z_axis_label,
            Vec3::new(zx, zy, d * 0.5),
            |_| Vec2::X,
        );

        canvas.draw_text(
            &p.title,
            Vec2::new(canvas.width() as f32 * 0.5, canvas.height() as f32 * 0.07),
            TITLE_SCALE,
            TextAlign::Center,
            p.text_color,
        );
    }

    /// Draw tick labels at `ticks` and the axis title beyond them.
    fn draw_axis(
        &self,
        canvas: &mut Canvas,
        ticks: &[Vec3],
        labels: &[String],
        title: &str,
        title_at: Vec3,
        outward: impl Fn(Vec2) -> Vec2,
    ) {
        let color = self.scene.presentation.text_color;

        let mut widest = 0u32;
        for (tick, label) in ticks.iter().zip(labels) {
            let px = self.to_pixel(*tick);
            let dir = outward(px);
            let align = align_for(dir);
            let (tw, th) = measure_text(label, LABEL_SCALE);
            widest = widest.max(tw);

            let anchor = clamp_anchor(px + dir * TICK_PAD, tw, th, align, canvas);
            canvas.draw_text(label, anchor, LABEL_SCALE, align, color);
        }

        let px = self.to_pixel(title_at);
        let dir = outward(px);
        let align = align_for(dir);
        let (tw, th) = measure_text(title, LABEL_SCALE);
        let reach = 2.0 * TICK_PAD + widest as f32 * dir.x.abs() + 2.0 * th as f32 * dir.y.abs();
        let anchor = clamp_anchor(px + dir * reach, tw, th, align, canvas);
        canvas.draw_text(title, anchor, LABEL_SCALE, align, color);
    }
}

/// Faces of the voxel surfaces that are drawn for a color state.
///
/// A face is emitted when the cell across it is empty or lies outside the
/// grid. Between two occupied cells of different colors the shared face is
/// emitted once, in the color of the more opaque cell (lower index on ties).
fn visible_faces(grid: &VoxelGrid, colors: &ColorArray) -> Vec<Face> {
    let mut faces = Vec::new();

    for (x, y, z) in grid.occupied_cells() {
        let here = grid.index(x, y, z);
        let color = colors.at(here);
        let cell = [x as i32, y as i32, z as i32];

        for (axis, sign) in FACE_DIRECTIONS {
            let mut n = cell;
            n[axis] += sign;

            let draw = match grid.checked_index(n[0], n[1], n[2]) {
                Some(other) if grid.is_occupied(n[0], n[1], n[2]) => {
                    let other_color = colors.at(other);
                    other_color != color
                        && (color.a > other_color.a
                            || (color.a == other_color.a && here < other))
                }
                _ => true,
            };
            if draw {
                faces.push(make_face(cell, axis, sign, color));
            }
        }
    }

    faces
}

fn make_face(cell: [i32; 3], axis: usize, sign: i32, color: Rgba) -> Face {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    let mut base = Vec3::new(cell[0] as f32, cell[1] as f32, cell[2] as f32);
    if sign > 0 {
        base[axis] += 1.0;
    }

    let corner = |du: f32, dv: f32| {
        let mut c = base;
        c[u] += du;
        c[v] += dv;
        c
    };

    let mut normal = Vec3::ZERO;
    normal[axis] = sign as f32;

    Face {
        corners: [
            corner(0.0, 0.0),
            corner(1.0, 0.0),
            corner(1.0, 1.0),
            corner(0.0, 1.0),
        ],
        normal,
        color,
    }
}

fn align_for(dir: Vec2) -> TextAlign {
    if dir.x > 0.25 {
        TextAlign::Left
    } else if dir.x < -0.25 {
        TextAlign::Right
    } else {
        TextAlign::Center
    }
}

/// Shift a text anchor so the whole run stays on the canvas when it fits.
fn clamp_anchor(anchor: Vec2, width: u32, height: u32, align: TextAlign, canvas: &Canvas) -> Vec2 {
    let (cw, ch) = (canvas.width() as f32, canvas.height() as f32);
    let (tw, th) = (width as f32, height as f32);

    let left = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - tw * 0.5,
        TextAlign::Right => anchor.x - tw,
    };
    let shift_x = if tw >= cw {
        0.0
    } else if left < 0.0 {
        -left
    } else if left + tw > cw {
        cw - (left + tw)
    } else {
        0.0
    };

    let y = anchor.y.clamp(th * 0.5, (ch - th * 0.5).max(th * 0.5));
    Vec2::new(anchor.x + shift_x, y)
}
