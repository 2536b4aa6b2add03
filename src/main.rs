use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

use michelson_sim::app::App;
use michelson_sim::config::SimulationConfig;
use michelson_sim::simulation::units::m_to_nm;
use michelson_sim::view::ViewSync;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimulationConfig::default();
    let sync = ViewSync::new(&config).context("invalid simulator configuration")?;

    let model = sync.model();
    log::info!(
        "Wave: A = {}, λ = {:.1} nm, {} grid points (observation index {})",
        model.constants().amplitude,
        m_to_nm(model.constants().wavelength),
        model.grid().len(),
        model.center_index()
    );
    log::info!(
        "Intensity curve: {} samples over [{}, {}] nm, peak {:.3}",
        sync.profile().len(),
        config.displacement_min_nm,
        config.displacement_max_nm,
        sync.profile().peak()
    );

    let event_loop = EventLoop::new()?;
    // Redraw only when the displacement or the window changes
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(sync);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_error() {
        anyhow::bail!("renderer initialisation failed: {}", e);
    }

    log::info!("Goodbye");
    Ok(())
}
