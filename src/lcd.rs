use std::thread;
use std::time::Duration;

use log::info;

// Use rppal in production
#[cfg(not(test))]
use rppal::i2c::I2c;

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_i2c::I2c;

use crate::config::{LCD_COLUMNS, LCD_I2C_ADDR, LCD_ROWS, LCD_SETTLE_MS};
use crate::display::DisplaySink;
use crate::error::{TuneError, TuneResult};

// PCF8574 backpack bits
const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

// HD44780 commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit bus, 2+ lines, 5x8 font
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first character of each row on 20x4 modules.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 character LCD behind a PCF8574 I2C backpack.
///
/// Every clear and write is followed by a settle delay, so callers can issue
/// commands back to back.
pub struct CharacterLcd {
    i2c: I2c,
}

impl CharacterLcd {
    pub fn new() -> TuneResult<Self> {
        Self::with_address(LCD_I2C_ADDR)
    }

    pub fn with_address(address: u16) -> TuneResult<Self> {
        let mut i2c = I2c::new()?;
        i2c.set_slave_address(address)?;

        let mut lcd = Self { i2c };

        // Power-on reset into 4-bit mode: three 8-bit "function set" nibbles, then 4-bit
        thread::sleep(Duration::from_millis(50));
        for nibble in [0x30, 0x30, 0x30, 0x20] {
            lcd.write_nibble(nibble, 0)?;
            thread::sleep(Duration::from_millis(5));
        }

        lcd.command(CMD_FUNCTION_SET)?;
        lcd.command(CMD_DISPLAY_ON)?;
        lcd.command(CMD_CLEAR)?;
        thread::sleep(Duration::from_millis(2));
        lcd.command(CMD_ENTRY_MODE)?;

        info!("✓ Character LCD initialized at 0x{:02X}", address);
        Ok(lcd)
    }

    /// Clocks the upper four bits of `nibble` into the controller.
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> TuneResult<()> {
        let data = (nibble & 0xF0) | mode | BACKLIGHT;
        self.i2c.write(&[data | ENABLE])?;
        self.i2c.write(&[data])?;
        Ok(())
    }

    fn send(&mut self, byte: u8, mode: u8) -> TuneResult<()> {
        self.write_nibble(byte & 0xF0, mode)?;
        self.write_nibble(byte << 4, mode)
    }

    fn command(&mut self, command: u8) -> TuneResult<()> {
        self.send(command, 0)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> TuneResult<()> {
        if row >= LCD_ROWS || col >= LCD_COLUMNS {
            return Err(TuneError::DisplayBounds { row, col });
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn settle(&self) {
        thread::sleep(Duration::from_millis(LCD_SETTLE_MS));
    }
}

impl DisplaySink for CharacterLcd {
    fn clear_line(&mut self, row: u8) -> TuneResult<()> {
        self.set_cursor(row, 0)?;
        for _ in 0..LCD_COLUMNS {
            self.send(b' ', REGISTER_SELECT)?;
        }
        self.settle();
        Ok(())
    }

    fn write_text(&mut self, row: u8, col: u8, text: &str) -> TuneResult<()> {
        self.set_cursor(row, col)?;
        // text past the right edge is dropped rather than wrapped onto another row
        let room = (LCD_COLUMNS - col) as usize;
        for byte in text.bytes().take(room) {
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.send(byte, REGISTER_SELECT)?;
        }
        self.settle();
        Ok(())
    }
}
