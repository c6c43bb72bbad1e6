use ripplenav::Viewer;

const DEFAULT_FONT: &str = "assets/fonts/nav.typeface.json";

fn main() {
    env_logger::init();

    let font_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FONT.to_owned());

    if !std::path::Path::new(&font_path).exists() {
        // The viewer still opens; a missing font just leaves the header
        // inert, matching the embedded fail-quiet behavior.
        log::warn!("font file {font_path} not found, header will be empty");
    }

    let viewer = Viewer::builder().with_font_path(font_path).build();

    if let Err(e) = viewer.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
