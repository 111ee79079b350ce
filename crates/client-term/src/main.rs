use anyhow::Result;

mod api;
mod app;
mod local;
mod ui;

fn main() -> Result<()> {
    tui_logger::init_logger(log::LevelFilter::Debug).unwrap();
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let base = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ONAM_SERVER").ok())
        .unwrap_or_else(|| "http://127.0.0.1:9002".to_owned());

    let app = app::App::new(base);
    app.run()
}
