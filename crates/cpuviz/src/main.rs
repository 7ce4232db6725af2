use cpuviz::FrontendType;
use cpuviz_core::Pacing;

fn main() {
    env_logger::init();

    let mut frontend_name = None;
    let mut instant = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--instant" => instant = true,
            _ if frontend_name.is_none() => frontend_name = Some(arg.clone()),
            other => {
                eprintln!("Unexpected argument '{}'", other);
                std::process::exit(1);
            }
        }
    }

    let frontend = match frontend_name.as_deref().unwrap_or("term") {
        "term" | "terminal" | "tty" => FrontendType::Terminal,
        "sdl" | "sdl2" | "window" => FrontendType::Sdl2,
        other => {
            eprintln!(
                "Unknown frontend '{}'. Usage: cpuviz [term|sdl2] [--instant]",
                other
            );
            std::process::exit(1);
        }
    };

    let pacing = if instant {
        log::info!("Narration pacing disabled");
        Pacing::instant()
    } else {
        Pacing::default()
    };

    if let Err(err) = cpuviz::run(frontend, pacing) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
