// This file is only compiled during tests

use std::cell::RefCell;

thread_local! {
    static MOCK_BUS: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
    static MOCK_ADDRESS: RefCell<Option<u16>> = const { RefCell::new(None) };
}

pub struct I2c;

impl I2c {
    pub fn new() -> rppal::i2c::Result<Self> {
        Ok(I2c)
    }

    pub fn set_slave_address(&mut self, address: u16) -> rppal::i2c::Result<()> {
        MOCK_ADDRESS.with(|addr| *addr.borrow_mut() = Some(address));
        Ok(())
    }

    pub fn write(&mut self, buffer: &[u8]) -> rppal::i2c::Result<usize> {
        MOCK_BUS.with(|bus| bus.borrow_mut().extend_from_slice(buffer));
        Ok(buffer.len())
    }
}

// test helper: drain everything written so far
pub fn take_written() -> Vec<u8> {
    MOCK_BUS.with(|bus| std::mem::take(&mut *bus.borrow_mut()))
}

// test helper: last address selected
pub fn mock_slave_address() -> Option<u16> {
    MOCK_ADDRESS.with(|addr| *addr.borrow())
}

// test helper to reset the bus
pub fn reset_mock_bus() {
    MOCK_BUS.with(|bus| bus.borrow_mut().clear());
    MOCK_ADDRESS.with(|addr| *addr.borrow_mut() = None);
}
