pub mod mock_chassis;
pub mod mock_display;
pub mod mock_gpio;
pub mod mock_i2c;
pub mod mock_input;
