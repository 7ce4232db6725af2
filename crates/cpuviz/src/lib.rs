use anyhow::Result;

pub mod term;

pub use term::Terminal;

use cpuviz_core::Pacing;

pub enum FrontendType {
    Terminal,
    Sdl2,
}

pub fn run(frontend: FrontendType, pacing: Pacing) -> Result<()> {
    match frontend {
        FrontendType::Terminal => {
            run_terminal(pacing)?;
        }
        FrontendType::Sdl2 => {
            run_sdl2(pacing)?;
        }
    }
    Ok(())
}

pub fn run_terminal(pacing: Pacing) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut terminal = Terminal::new(stdin.lock(), stdout.lock(), pacing);
    terminal.run()
}

#[cfg(feature = "sdl2")]
pub fn run_sdl2(pacing: Pacing) -> Result<()> {
    use cpuviz_sdl2::{App, SdlContext, SdlInitInfo};

    let app = cpuviz_core::VisualizerApp::new(pacing);
    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)?;
    Ok(())
}

#[cfg(not(feature = "sdl2"))]
pub fn run_sdl2(_pacing: Pacing) -> Result<()> {
    anyhow::bail!("this build has no SDL2 frontend; rebuild with `--features sdl2`")
}
