use clap::Parser;
use winit::{
    event::*,
    event_loop::EventLoop,
    window::WindowBuilder,
};

use graph_core::{FrameClock, GraphEngine, PhaseChange};

mod cli;
mod controls;
mod gpu;
mod mesh;

use cli::Cli;
use controls::Control;
use gpu::WgpuBackend;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = cli.graph_config();
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(&config.function.to_string()))
        .build(&event_loop)?;

    let backend = pollster::block_on(WgpuBackend::new(&window))?;
    let mut engine = GraphEngine::initialize(backend, &config, cli.seed)?;
    log::info!(
        "resolution {} | function {} | mode {} | {}s + {}s transitions",
        config.resolution,
        config.function,
        config.transition_mode,
        config.function_duration,
        config.transition_duration
    );
    let mut clock = FrameClock::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => engine.backend_mut().resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event: key, .. },
            ..
        } if key.state == ElementState::Pressed => {
            match controls::control_for_key(&key.logical_key) {
                Some(Control::Quit) => elwt.exit(),
                Some(control) => {
                    controls::apply(control, &mut config, engine.backend_mut().camera_mut())
                }
                None => {}
            }
        }
        Event::AboutToWait => match engine.backend_mut().begin_frame() {
            Ok(()) => {
                let report = engine.frame(clock.tick(), &mut config);
                engine.backend_mut().end_frame();
                if let Some(PhaseChange::Started { to, .. }) = report.phase_change {
                    engine.backend().window().set_title(&window_title(&to.to_string()));
                }
                engine.backend().window().request_redraw();
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.backend_mut().reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("skipping frame: {e}"),
        },
        _ => {}
    })?;
    Ok(())
}

fn window_title(function: &str) -> String {
    format!("GPU Function Graph ({function})")
}
