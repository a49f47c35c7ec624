//! Procedural drawing of the reference glyph set.
//!
//! Every digit is a centre stem plus one to three arms. Arms are drawn once
//! in the units orientation (top-right) and mirrored into the other three
//! quadrants: horizontally for tens, vertically for hundreds, both ways for
//! thousands. The stem is symmetric under both mirrors, so it lands on the
//! same pixels in every glyph of the set.

use crate::numeral::PlaceValue;
use crate::raster::Raster;
use crate::raster::geometry::CellGeometry;

/// One arm of the notation, in units orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Horizontal bar level with the top of the stem.
    TopBar,
    /// Horizontal bar one unit below the top.
    SecondBar,
    /// Diagonal from the stem top down to the outer corner.
    Falling,
    /// Diagonal from one unit down on the stem up to the outer corner.
    Rising,
    /// Vertical post at the outer edge.
    Post,
}

/// Arms for digits 1-9.
pub const DIGIT_STROKES: [&[Stroke]; 9] = [
    &[Stroke::TopBar],
    &[Stroke::SecondBar],
    &[Stroke::Falling],
    &[Stroke::Rising],
    &[Stroke::TopBar, Stroke::Rising],
    &[Stroke::Post],
    &[Stroke::TopBar, Stroke::Post],
    &[Stroke::SecondBar, Stroke::Post],
    &[Stroke::TopBar, Stroke::SecondBar, Stroke::Post],
];

/// Pen metrics derived from a cell geometry.
///
/// For the standard 150x200 cell: stem at x=75 from y=25, arm unit 50,
/// pen 4 pixels wide.
#[derive(Debug, Clone, Copy)]
struct Pen {
    origin_x: i32,
    origin_y: i32,
    unit: i32,
    thickness: i32,
}

impl Pen {
    fn for_geometry(g: &CellGeometry) -> Self {
        let thickness = ((g.width / 37).max(2) & !1) as i32;
        Self {
            origin_x: (g.width / 2) as i32,
            origin_y: (g.height / 8) as i32,
            unit: (g.width / 3) as i32,
            thickness,
        }
    }

    fn endpoints(&self, stroke: Stroke) -> ((i32, i32), (i32, i32)) {
        let (x, y, u) = (self.origin_x, self.origin_y, self.unit);
        match stroke {
            Stroke::TopBar => ((x, y), (x + u, y)),
            Stroke::SecondBar => ((x, y + u), (x + u, y + u)),
            Stroke::Falling => ((x, y), (x + u, y + u)),
            Stroke::Rising => ((x, y + u), (x + u, y)),
            Stroke::Post => ((x + u, y), (x + u, y + u)),
        }
    }
}

/// Integer points on the segment from `a` to `b` (Bresenham).
fn line_points(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut y) = a;
    let dx = (b.0 - a.0).abs();
    let dy = -(b.1 - a.1).abs();
    let sx = if a.0 < b.0 { 1 } else { -1 };
    let sy = if a.1 < b.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut points = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        points.push((x, y));
        if (x, y) == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Ink every pixel of a square pen centred on `(cx, cy)` that falls inside
/// the half-open box `[x0, x1) x [y0, y1)`.
fn stamp(raster: &mut Raster, (cx, cy): (i32, i32), half: i32, bounds: (i32, i32, i32, i32)) {
    let (x0, y0, x1, y1) = bounds;
    for y in (cy - half).max(y0)..(cy + half).min(y1) {
        for x in (cx - half).max(x0)..(cx + half).min(x1) {
            raster.set(x as u32, y as u32, false);
        }
    }
}

/// The bare centre stem.
pub fn stem(geometry: &CellGeometry) -> Raster {
    let pen = Pen::for_geometry(geometry);
    let mut raster = Raster::blank(geometry.width, geometry.height);
    let half = pen.thickness / 2;
    let top = pen.origin_y;
    let bottom = geometry.height as i32 - pen.origin_y;
    for y in top..bottom {
        for x in pen.origin_x - half..pen.origin_x + half {
            raster.set(x as u32, y as u32, false);
        }
    }
    raster
}

/// Digit 1-9 in units orientation: stem plus that digit's arms, with arms
/// clipped to the area right of the stem and above the horizontal split.
pub fn units_glyph(geometry: &CellGeometry, digit: u8) -> Raster {
    debug_assert!((1..=9).contains(&digit));
    let pen = Pen::for_geometry(geometry);
    let half = pen.thickness / 2;
    let mut raster = stem(geometry);

    let arm_left = (pen.origin_x + half).max(geometry.split_x() as i32);
    let bounds = (
        arm_left,
        0,
        geometry.width as i32,
        geometry.split_y() as i32,
    );
    for &stroke in DIGIT_STROKES[(digit - 1) as usize] {
        let (a, b) = pen.endpoints(stroke);
        for point in line_points(a, b) {
            stamp(&mut raster, point, half, bounds);
        }
    }
    raster
}

/// Digit 1-9 drawn for a given place.
pub fn place_glyph(geometry: &CellGeometry, place: PlaceValue, digit: u8) -> Raster {
    let units = units_glyph(geometry, digit);
    match place {
        PlaceValue::Units => units,
        PlaceValue::Tens => units.flip_horizontal(),
        PlaceValue::Hundreds => units.flip_vertical(),
        PlaceValue::Thousands => units.flip_horizontal().flip_vertical(),
    }
}

/// The full 37-entry set in library index order.
pub fn build_entries(geometry: &CellGeometry) -> Vec<Raster> {
    let mut entries = Vec::with_capacity(super::library::LIBRARY_LEN);
    for place in PlaceValue::ALL {
        for digit in 1..=9 {
            entries.push(place_glyph(geometry, place, digit));
        }
    }
    entries.push(Raster::blank(geometry.width, geometry.height));
    entries
}
