// File: crates/tvchart-render-skia/tests/snapshot.rs
// Purpose: Golden PNG snapshot of a rasterised scene with bless flow.
// Behavior:
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note and checks the render is repeatable and non-empty.
#![cfg(feature = "raster")]

use tvchart_core::{generate_bars_seeded, BusinessDay, Figure, GeneratorOptions, LineSpec, Period, Renderer, Theme};
use tvchart_core::{rolling_mean, CandlestickSpec, ChartPayload};
use tvchart_render_skia::{render_png_bytes, RenderOptions, SceneBackend};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn render_bytes() -> Vec<u8> {
    let opts = GeneratorOptions {
        period: Period::new(BusinessDay::new(2018, 1, 1), BusinessDay::new(2018, 3, 1)),
        ..GeneratorOptions::default()
    };
    let bars = generate_bars_seeded(5, &opts).expect("bars");
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let mut fig = Figure::new("snapshot", Theme::dark());
    fig.add_bars(bars, CandlestickSpec::default()).expect("candles");
    fig.add_line(&rolling_mean(&closes, 5), LineSpec::named("SMA 5")).expect("sma");

    let payload = ChartPayload::decode(&fig.to_payload().expect("payload")).expect("decode");
    let mut renderer = Renderer::new(SceneBackend::new(), "chart".to_string(), payload.layout.clone()).expect("chart");
    renderer.render(&payload);

    let mut ropts = RenderOptions::default();
    ropts.draw_labels = false; // avoid font variance
    render_png_bytes(renderer.backend().scene(), &ropts).expect("render")
}

#[test]
fn png_has_scene_size() {
    let bytes = render_bytes();
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (600, 400));
    // Dark background in the top-left corner.
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn golden_generated_chart() {
    let bytes = render_bytes();
    let snap_path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/generated_chart.png");

    if bless_mode() {
        if let Some(parent) = snap_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
        // Without a golden file the render must still be repeatable and draw something.
        let got = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let again = image::load_from_memory(&render_bytes()).expect("decode again").to_rgba8();
        assert_eq!(got.as_raw(), again.as_raw(), "rendering is not deterministic");
        let background = got.get_pixel(0, 0).0;
        let drawn = got.pixels().filter(|p| p.0 != background).count();
        assert!(drawn > 1000, "only {drawn} pixels differ from the background");
    }
}
