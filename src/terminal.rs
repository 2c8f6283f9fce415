//! Terminal setup/teardown plus frame output and key polling.
use crate::frame::{Frame, Surface};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub(crate) struct Terminal {
    out: Stdout,
}

impl Terminal {
    /// Switch to raw mode on the alternate screen. The previous state comes
    /// back when the returned value is dropped.
    pub fn init() -> Result<Self> {
        enable_raw_mode().context("could not enable raw mode")?;

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self { out })
    }

    /// (columns, rows); may change between frames
    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("could not query terminal size")
    }

    /// Write the whole frame and flush once.
    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        let (_, height) = frame.size();
        let mut inverted = false;
        queue!(self.out, SetAttribute(Attribute::Reset))?;

        for row in 0..height {
            queue!(self.out, MoveTo(0, row))?;
            for cell in frame.row(row) {
                if cell.inverted != inverted {
                    inverted = cell.inverted;
                    let attribute = if inverted {
                        Attribute::Reverse
                    } else {
                        Attribute::NoReverse
                    };
                    queue!(self.out, SetAttribute(attribute))?;
                }
                queue!(self.out, Print(&cell.glyph))?;
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;

        Ok(())
    }

    /// The next pending key press, without blocking.
    pub fn poll_key(&mut self) -> Result<Option<KeyCode>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Some(code),
            _ => None,
        })
    }

    fn restore(&mut self) -> Result<()> {
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("could not restore terminal: {err}");
        }
    }
}
