use clap::Parser;
use winit::event_loop::EventLoop;

use gallery_frame::app::App;
use gallery_frame::cli::Cli;
use gallery_frame::config::GalleryConfig;
use gallery_frame::scene::create_gallery_scene;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };
    if let Some(wall) = &cli.wall {
        config.wall.texture = Some(wall.clone());
    }

    let scene = create_gallery_scene(&config)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli.clone(), config, scene);

    if !cli.no_ui {
        println!("Gallery Frame - Controls: drag to orbit, right-drag to pan, wheel to zoom, R to reset, Escape to quit");
        println!("Drop an image on the window or type its path in the Picture panel");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
