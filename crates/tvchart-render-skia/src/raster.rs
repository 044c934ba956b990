// File: crates/tvchart-render-skia/src/raster.rs
// Summary: Headless PNG rendering of a scene using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tvchart_core::options::{CandlestickOptions, HistogramOptions, LineOptions};
use tvchart_core::{Bar, LinePoint, Marker, MarkerPosition, MarkerShape, SeriesData, Time, VolumePoint};

use crate::color::{color_or, Rgba};
use crate::layout::{linspace, Insets, PlotLayout};
use crate::scene::{Scene, SceneSeries, SeriesStyle};

const DEFAULT_BACKGROUND: Rgba = Rgba::opaque(255, 255, 255);
const DEFAULT_TEXT: Rgba = Rgba::opaque(25, 25, 25);
const DEFAULT_GRID: Rgba = Rgba::new(197, 203, 206, 128);
const DEFAULT_UP: Rgba = Rgba::opaque(38, 166, 154);
const DEFAULT_DOWN: Rgba = Rgba::opaque(239, 83, 80);
const DEFAULT_LINE: Rgba = Rgba::opaque(33, 150, 243);
const MARKER_SIZE: f32 = 6.0;

pub struct RenderOptions {
    pub insets: Insets,
    /// Legend rows and marker captions; off for pixel-exact snapshots.
    pub draw_labels: bool,
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { insets: Insets::default(), draw_labels: true, font_size: 12.0 }
    }
}

fn sk(c: Rgba) -> skia::Color {
    let (a, r, g, b) = c.argb();
    skia::Color::from_argb(a, r, g, b)
}

fn fill(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk(c));
    paint
}

fn stroke(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = fill(c);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

/// Paint `scene` at its current size and return the encoded PNG.
pub fn render_png_bytes(scene: &Scene, opts: &RenderOptions) -> Result<Vec<u8>> {
    let (w, h) = scene.size();
    let mut surface = skia::surfaces::raster_n32_premul((w as i32, h as i32))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();

    let o = &scene.options;
    canvas.clear(sk(color_or(o.background_color.as_deref(), DEFAULT_BACKGROUND)));

    let layout = PlotLayout::fit(scene, &opts.insets);
    draw_grid(canvas, &layout, color_or(o.grid_color.as_deref(), DEFAULT_GRID));
    draw_border(canvas, &layout, color_or(o.border_color.as_deref(), DEFAULT_GRID));

    // Volume sits underneath prices.
    for s in scene.volume_series() {
        draw_series(canvas, &layout, s);
    }
    for s in scene.price_series() {
        draw_series(canvas, &layout, s);
    }
    for s in &scene.series {
        draw_markers(canvas, &layout, s, opts);
    }

    if opts.draw_labels {
        draw_legends(canvas, scene, &layout, opts, color_or(o.text_color.as_deref(), DEFAULT_TEXT));
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render to a PNG file at `path`, creating parent directories.
pub fn render_png(scene: &Scene, opts: &RenderOptions, path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_png_bytes(scene, opts)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, l: &PlotLayout, colour: Rgba) {
    let paint = stroke(colour, 1.0);
    for x in linspace(l.left, l.right, 10) {
        canvas.draw_line((x, l.top), (x, l.bottom), &paint);
    }
    for y in linspace(l.top, l.bottom, 6) {
        canvas.draw_line((l.left, y), (l.right, y), &paint);
    }
}

fn draw_border(canvas: &skia::Canvas, l: &PlotLayout, colour: Rgba) {
    let paint = stroke(colour, 1.0);
    canvas.draw_line((l.right, l.top), (l.right, l.bottom), &paint);
    canvas.draw_line((l.left, l.bottom), (l.right, l.bottom), &paint);
}

fn draw_series(canvas: &skia::Canvas, l: &PlotLayout, s: &SceneSeries) {
    match (&s.style, &s.data) {
        (SeriesStyle::Candlestick(o), Some(SeriesData::Candlestick(bars))) => draw_candles(canvas, l, o, bars),
        (SeriesStyle::Line(o), Some(SeriesData::Line(points))) => draw_line(canvas, l, o, points),
        (SeriesStyle::Histogram(o), Some(SeriesData::Volume(points))) => draw_volume(canvas, l, o, points),
        _ => {}
    }
}

fn draw_candles(canvas: &skia::Canvas, l: &PlotLayout, o: &CandlestickOptions, bars: &[Bar]) {
    let up = color_or(o.up_color.as_deref(), DEFAULT_UP);
    let down = color_or(o.down_color.as_deref(), DEFAULT_DOWN);
    let wick_up = color_or(o.wick_up_color.as_deref(), up);
    let wick_down = color_or(o.wick_down_color.as_deref(), down);
    let half = l.time.bar_width(bars.len()) * 0.5;

    for b in bars {
        let x = l.time.to_px(b.time.sort_key());
        let (body, wick) = if b.close >= b.open { (up, wick_up) } else { (down, wick_down) };
        canvas.draw_line((x, l.price.to_px(b.high)), (x, l.price.to_px(b.low)), &stroke(wick, 1.0));

        let y_o = l.price.to_px(b.open);
        let y_c = l.price.to_px(b.close);
        let top = y_o.min(y_c);
        let bot = y_o.max(y_c).max(top + 1.0);
        canvas.draw_rect(skia::Rect::from_ltrb(x - half, top, x + half, bot), &fill(body));
    }
}

fn draw_line(canvas: &skia::Canvas, l: &PlotLayout, o: &LineOptions, points: &[LinePoint]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut path = skia::Path::new();
    path.move_to((l.time.to_px(first.time.sort_key()), l.price.to_px(first.value)));
    for p in rest {
        path.line_to((l.time.to_px(p.time.sort_key()), l.price.to_px(p.value)));
    }
    let colour = color_or(o.color.as_deref(), DEFAULT_LINE);
    canvas.draw_path(&path, &stroke(colour, o.line_width));
}

fn draw_volume(canvas: &skia::Canvas, l: &PlotLayout, o: &HistogramOptions, points: &[VolumePoint]) {
    let default = color_or(o.color.as_deref(), DEFAULT_UP);
    let half = l.time.bar_width(points.len()) * 0.5;
    for p in points {
        let x = l.time.to_px(p.time.sort_key());
        let top = l.volume.to_px(p.value);
        let rect = skia::Rect::from_ltrb(x - half, top, x + half, l.volume.bottom_px);
        canvas.draw_rect(rect, &fill(color_or(p.color.as_deref(), default)));
    }
}

/// Price extent `(high, low)` of a series at `time`, used to place markers.
/// Business days and timestamps naming the same midnight match.
fn extent_at(data: &SeriesData, time: Time) -> Option<(f64, f64)> {
    let key = time.sort_key();
    match data {
        SeriesData::Candlestick(bars) => bars.iter().find(|b| b.time.sort_key() == key).map(|b| (b.high, b.low)),
        SeriesData::Line(points) => points.iter().find(|p| p.time.sort_key() == key).map(|p| (p.value, p.value)),
        SeriesData::Volume(_) => None,
    }
}

fn draw_markers(canvas: &skia::Canvas, l: &PlotLayout, s: &SceneSeries, opts: &RenderOptions) {
    let Some(data) = &s.data else {
        return;
    };
    for m in &s.markers {
        let Some((high, low)) = extent_at(data, m.time) else {
            continue;
        };
        let x = l.time.to_px(m.time.sort_key());
        let y = match m.position {
            MarkerPosition::AboveBar => l.price.to_px(high) - MARKER_SIZE * 2.0,
            MarkerPosition::BelowBar => l.price.to_px(low) + MARKER_SIZE * 2.0,
            MarkerPosition::InBar => l.price.to_px((high + low) * 0.5),
        };
        draw_marker(canvas, m, x, y, opts);
    }
}

fn draw_marker(canvas: &skia::Canvas, m: &Marker, x: f32, y: f32, opts: &RenderOptions) {
    let paint = fill(color_or(Some(&m.color), Rgba::opaque(0, 0, 0)));
    let r = MARKER_SIZE;
    match m.shape {
        MarkerShape::Circle => {
            canvas.draw_circle((x, y), r * 0.6, &paint);
        }
        MarkerShape::Square => {
            canvas.draw_rect(skia::Rect::from_ltrb(x - r * 0.5, y - r * 0.5, x + r * 0.5, y + r * 0.5), &paint);
        }
        MarkerShape::ArrowUp | MarkerShape::ArrowDown => {
            let dir = if m.shape == MarkerShape::ArrowUp { -1.0 } else { 1.0 };
            let mut path = skia::Path::new();
            path.move_to((x, y + dir * r * 0.6));
            path.line_to((x - r * 0.6, y - dir * r * 0.6));
            path.line_to((x + r * 0.6, y - dir * r * 0.6));
            path.close();
            canvas.draw_path(&path, &paint);
        }
    }

    if opts.draw_labels && !m.text.is_empty() {
        let mut font = skia::Font::default();
        font.set_size(opts.font_size * 0.9);
        let dy = match m.position {
            MarkerPosition::BelowBar => r + opts.font_size,
            _ => -r - 2.0,
        };
        canvas.draw_str(&m.text, (x - r, y + dy), &font, &paint);
    }
}

fn draw_legends(canvas: &skia::Canvas, scene: &Scene, l: &PlotLayout, opts: &RenderOptions, text: Rgba) {
    let mut font = skia::Font::default();
    font.set_size(opts.font_size);
    for legend in &scene.legends {
        let Some(t) = &legend.text else {
            continue;
        };
        let baseline = l.top + (legend.top_em as f32 + 1.0) * opts.font_size;
        let name_paint = fill(color_or(t.name_colour.as_deref(), text));
        let value_paint = fill(color_or(t.value_colour.as_deref(), text));

        let x = l.left + 4.0;
        canvas.draw_str(&t.name, (x, baseline), &font, &name_paint);
        let (advance, _) = font.measure_str(format!("{} ", t.name), None);
        canvas.draw_str(&t.value, (x + advance, baseline), &font, &value_paint);
    }
}
