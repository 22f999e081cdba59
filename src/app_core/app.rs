use crate::{
    PlayerStyle, PlayerView,
    key_handler::{self, Action},
    player::PlaybackController,
    tui,
};
use anyhow::Result;
use ratatui::crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
};

/// The demo application: one sound, one player view, a status line.
pub struct Playbar {
    controller: PlaybackController,
    style: PlayerStyle,
    quit: bool,
}

impl Playbar {
    pub fn new(controller: PlaybackController, style: PlayerStyle) -> Self {
        Playbar {
            controller,
            style,
            quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        std::io::stdout().execute(EnableMouseCapture)?;

        let result = self.main_loop(&mut terminal);

        let _ = std::io::stdout().execute(DisableMouseCapture);
        ratatui::restore();

        if let Err(e) = self.controller.stop() {
            log::debug!("stop on exit: {e:#}");
        }

        result
    }

    fn main_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.quit {
            let snapshot = self.controller.snapshot();
            let mut area = ratatui::layout::Rect::default();

            terminal.draw(|f| {
                area = f.area();
                tui::render(f, &snapshot, &self.style);
            })?;

            let action = match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    key_handler::handle_key_event(&key)
                }
                Some(Event::Mouse(mouse)) => {
                    let view = PlayerView::new(&snapshot, &self.style);
                    let player_area = tui::player_area(area, &self.style);
                    key_handler::handle_mouse_event(&mouse, &view, player_area)
                }
                _ => None,
            };

            if let Some(action) = action {
                if let Err(e) = self.handle_action(action) {
                    log::warn!("{e:#}");
                }
            }
        }
        Ok(())
    }

    #[rustfmt::skip]
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        let player = &self.controller;
        match action {
            Action::Transport(control) => control.apply(player, &player.snapshot())?,
            Action::Volume(delta)      => player.adjust_volume(delta)?,
            Action::Quit               => self.quit = true,
        }
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
