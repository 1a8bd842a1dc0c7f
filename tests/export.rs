use csvchart::data::export::*;
use csvchart::ExportError;

#[test]
fn empty_capture_is_rejected() {
    assert!(matches!(rgba_from_pixels(0, 10, Vec::new()), Err(ExportError::EmptyCapture)));
}

#[test]
fn short_buffer_is_rejected() {
    assert!(matches!(
        rgba_from_pixels(2, 2, vec![0; 4]),
        Err(ExportError::SizeMismatch { width: 2, height: 2 })
    ));
}

#[test]
fn capture_is_scaled_to_export_size() {
    let capture = rgba_from_pixels(4, 3, vec![255; 4 * 3 * 4]).unwrap();
    let out = scale_to_export(&capture, &ExportSettings::default());
    assert_eq!(out.dimensions(), (800, 600));
}

#[test]
fn saved_file_is_a_png_of_the_configured_size() {
    let path = std::env::temp_dir().join(format!("csvchart-export-{}.png", std::process::id()));
    let capture = rgba_from_pixels(10, 10, vec![128; 10 * 10 * 4]).unwrap();
    let settings = ExportSettings {
        width: 40,
        height: 30,
    };
    save_png(&path, &capture, &settings).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (40, 30));
    let _ = std::fs::remove_file(path);
}

#[test]
fn default_name_uses_the_tab_stem() {
    let name = default_export_name(Some("sales.csv"));
    assert!(name.starts_with("sales_") && name.ends_with(".png"), "{}", name);
    assert!(default_export_name(None).starts_with("chart_"));
}
