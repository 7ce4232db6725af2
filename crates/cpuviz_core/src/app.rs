use std::time::Duration;

use cpuviz_common::app::App;
use cpuviz_common::color::Color;
use cpuviz_common::font::{Canvas, GLYPH_ADVANCE, LINE_HEIGHT};
use cpuviz_common::key::Key;

use crate::cpu::{address_label, CpuState, Register};
use crate::cycle::{Cycle, Pacing, Phase};
use crate::instruction::Instruction;
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Time that passes per `update`, i.e. one frame at 60 Hz.
pub const FRAME_DURATION: Duration = Duration::from_micros(16_667);

const MARGIN: usize = 2;
const RIGHT_COLUMN: usize = SCREEN_WIDTH / 2;
const STATE_TOP: usize = 10;
const LOWER_TOP: usize = 42;

const BACKGROUND: Color = Color::BLACK;
const LABEL: Color = Color::GRAY;
const VALUE: Color = Color::WHITE;
const HIGHLIGHT: Color = Color::YELLOW;
const ACTIVE_PHASE: Color = Color::CYAN;
const RESULT: Color = Color::GREEN;

/// Pixel frontend for the visualizer.
///
/// Implements the shared `App` trait so the SDL2 frontend can drive it one
/// frame at a time.
#[derive(Default)]
pub struct VisualizerApp {
    should_exit: bool,
    pub state: CpuState,
    selected: Instruction,
    cycle: Option<Cycle>,
    pacing: Pacing,
}

impl VisualizerApp {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Instruction {
        self.selected
    }

    pub fn cycle(&self) -> Option<&Cycle> {
        self.cycle.as_ref()
    }

    fn is_running(&self) -> bool {
        self.cycle.as_ref().is_some_and(|c| !c.is_done())
    }

    fn select_offset(&mut self, offset: isize) {
        let n = Instruction::ALL.len() as isize;
        let i = (self.selected.index() as isize + offset).rem_euclid(n);
        self.selected = Instruction::ALL[i as usize];
    }

    fn run_selected(&mut self) {
        if self.is_running() {
            log::debug!("{} ignored, cycle still running", self.selected);
            return;
        }
        self.cycle = Some(Cycle::start(self.selected, &self.state, self.pacing));
    }

    fn nudge(&mut self, reg: Register, delta: i64) {
        if self.is_running() {
            return;
        }
        let value = self.state.register(reg).wrapping_add(delta);
        self.state.set_register(reg, value);
    }

    fn render(&self, screen: &mut [u8]) {
        let mut canvas = Canvas::new(screen, SCREEN_WIDTH, SCREEN_HEIGHT);
        canvas.clear(BACKGROUND);

        let x = canvas.draw_text(MARGIN, MARGIN, "PC ", LABEL);
        canvas.draw_text(x, MARGIN, &self.state.program_counter().to_string(), VALUE);

        for (row, (reg, value)) in self.state.registers.iter().enumerate() {
            let y = STATE_TOP + row * LINE_HEIGHT;
            let x = canvas.draw_text(MARGIN, y, &format!("{} ", reg), LABEL);
            canvas.draw_text(x, y, &value.to_string(), VALUE);
        }

        for (row, (addr, value)) in self.state.memory.iter().enumerate() {
            let y = STATE_TOP + row * LINE_HEIGHT;
            let x = canvas.draw_text(RIGHT_COLUMN, y, &format!("{} ", address_label(addr)), LABEL);
            canvas.draw_text(x, y, &value.to_string(), VALUE);
        }

        for (row, ins) in Instruction::ALL.into_iter().enumerate() {
            let y = LOWER_TOP + row * LINE_HEIGHT;
            if ins == self.selected {
                canvas.draw_text(MARGIN, y, ">", HIGHLIGHT);
                canvas.draw_text(MARGIN + 2 * GLYPH_ADVANCE, y, ins.mnemonic(), HIGHLIGHT);
            } else {
                canvas.draw_text(MARGIN + 2 * GLYPH_ADVANCE, y, ins.mnemonic(), LABEL);
            }
        }

        let Some(cycle) = &self.cycle else {
            return;
        };
        canvas.draw_text(RIGHT_COLUMN, LOWER_TOP, cycle.listing(), VALUE);
        for (row, phase) in Phase::ALL.into_iter().enumerate() {
            let y = LOWER_TOP + (row + 1) * LINE_HEIGHT;
            let color = if phase == cycle.phase() {
                ACTIVE_PHASE
            } else {
                LABEL
            };
            canvas.draw_text(RIGHT_COLUMN, y, phase.name(), color);
        }
        if let Some(outcome) = cycle.outcome() {
            let y = LOWER_TOP + 5 * LINE_HEIGHT;
            canvas.draw_text(
                RIGHT_COLUMN,
                y,
                outcome.description.unwrap_or("NO CHANGE"),
                RESULT,
            );
        }
    }
}

impl App for VisualizerApp {
    fn init(&mut self) {
        log::info!("Visualizer init");
    }

    fn update(&mut self, screen: &mut [u8]) {
        if let Some(cycle) = &mut self.cycle {
            cycle.tick(FRAME_DURATION, &mut self.state);
        }
        self.render(screen);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if !is_down {
            return;
        }
        if let Some(slot) = key.number_slot() {
            self.selected = Instruction::ALL[slot];
            return;
        }
        match key {
            Key::Up => self.select_offset(-1),
            Key::Down => self.select_offset(1),
            Key::Enter => self.run_selected(),
            Key::Q => self.nudge(Register::Ax, 1),
            Key::W => self.nudge(Register::Bx, 1),
            Key::E => self.nudge(Register::Cx, 1),
            Key::R => self.nudge(Register::Dx, 1),
            Key::A => self.nudge(Register::Ax, -1),
            Key::S => self.nudge(Register::Bx, -1),
            Key::D => self.nudge(Register::Cx, -1),
            Key::F => self.nudge(Register::Dx, -1),
            Key::Backspace => {
                log::info!("CPU state reset");
                self.state.reset();
                self.cycle = None;
            }
            Key::Escape => self.should_exit = true,
            _ => {}
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Visualizer exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "CPU Instruction Visualizer".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut VisualizerApp, key: Key) {
        app.handle_key_event(key, true);
        app.handle_key_event(key, false);
    }

    fn screen() -> Vec<u8> {
        vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3]
    }

    #[test]
    fn selection_wraps_around_the_catalog() {
        let mut app = VisualizerApp::default();
        assert_eq!(app.selected(), Instruction::Add);
        press(&mut app, Key::Up);
        assert_eq!(app.selected(), Instruction::Store);
        press(&mut app, Key::Down);
        press(&mut app, Key::Down);
        assert_eq!(app.selected(), Instruction::Mov);
        press(&mut app, Key::Num5);
        assert_eq!(app.selected(), Instruction::Load);
    }

    #[test]
    fn enter_runs_the_selected_instruction_over_frames() {
        let mut app = VisualizerApp::default();
        let mut buf = screen();
        press(&mut app, Key::W);
        press(&mut app, Key::W);
        press(&mut app, Key::Enter);

        app.update(&mut buf);
        assert_eq!(app.cycle().map(|c| c.phase()), Some(Phase::Fetch));
        assert_eq!(app.state.register(Register::Ax), 0);

        // 2.5 s of narration at 60 Hz
        for _ in 0..160 {
            app.update(&mut buf);
        }
        assert!(app.cycle().is_some_and(|c| c.is_done()));
        assert_eq!(app.state.register(Register::Ax), 2);
        assert_eq!(app.state.program_counter(), 1);
    }

    #[test]
    fn input_is_locked_while_a_cycle_runs() {
        let mut app = VisualizerApp::default();
        press(&mut app, Key::Enter);
        press(&mut app, Key::Q);
        press(&mut app, Key::Enter);
        assert_eq!(app.state.register(Register::Ax), 0);

        let mut buf = screen();
        for _ in 0..200 {
            app.update(&mut buf);
        }
        assert_eq!(app.state.program_counter(), 1);

        press(&mut app, Key::Q);
        assert_eq!(app.state.register(Register::Ax), 1);
    }

    #[test]
    fn instant_pacing_completes_in_one_frame() {
        let mut app = VisualizerApp::new(Pacing::instant());
        press(&mut app, Key::Num3);
        press(&mut app, Key::Enter);
        app.update(&mut screen());
        assert_eq!(app.state.program_counter(), 1);
        assert_eq!(app.cycle().unwrap().outcome().unwrap().description, None);
    }

    #[test]
    fn backspace_resets_and_escape_exits() {
        let mut app = VisualizerApp::new(Pacing::instant());
        press(&mut app, Key::R);
        press(&mut app, Key::Enter);
        app.update(&mut screen());
        press(&mut app, Key::Backspace);
        assert_eq!(app.state, CpuState::new());
        assert!(app.cycle().is_none());

        assert!(!app.should_exit());
        press(&mut app, Key::Escape);
        assert!(app.should_exit());
    }

    #[test]
    fn selected_entry_is_highlighted() {
        let mut app = VisualizerApp::default();
        let mut buf = screen();
        app.update(&mut buf);
        let canvas = Canvas::new(&mut buf, SCREEN_WIDTH, SCREEN_HEIGHT);
        // '>' starts with its top-left pixel lit
        assert_eq!(canvas.pixel(MARGIN, LOWER_TOP), Some(HIGHLIGHT));
        assert_eq!(canvas.pixel(MARGIN, LOWER_TOP + LINE_HEIGHT), Some(BACKGROUND));
    }
}
