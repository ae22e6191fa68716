// ** SESSION CONFIGURATION ** //

/// Period of both the input and the display loop (milliseconds).
pub const POLL_PERIOD_MS: u64 = 10;
/// Timeout handed to the chassis with every test motion (milliseconds).
pub const MOTION_TIMEOUT_MS: u64 = 5000;
/// Gain adjustment per button press when the session starts.
pub const INITIAL_STEP: f64 = 1.0;
/// Candidate headings for turn tests (degrees).
pub const DEFAULT_HEADINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
/// Candidate lateral targets for drive tests (inches).
pub const DEFAULT_LENGTHS: [f64; 3] = [12.0, 24.0, 48.0];

/// Starting gains of the lateral (distance) controller
pub const LATERAL_KP: f64 = 10.0;
pub const LATERAL_KI: f64 = 0.0;
pub const LATERAL_KD: f64 = 0.5;
/// Starting gains of the angular (heading) controller
pub const ANGULAR_KP: f64 = 5.0;
pub const ANGULAR_KI: f64 = 0.0;
pub const ANGULAR_KD: f64 = 0.2;

// ** GPIO CONFIGURATION ** //
/// BCM pin of each operator button. Buttons pull the pin low when pressed.
pub const GPIO_BUTTON_A: u8 = 5;
pub const GPIO_BUTTON_B: u8 = 6;
pub const GPIO_BUTTON_X: u8 = 13;
pub const GPIO_BUTTON_Y: u8 = 19;
pub const GPIO_BUTTON_UP: u8 = 26;
pub const GPIO_BUTTON_DOWN: u8 = 21;
pub const GPIO_BUTTON_LEFT: u8 = 20;
pub const GPIO_BUTTON_RIGHT: u8 = 16;
pub const GPIO_BUTTON_L1: u8 = 12;
pub const GPIO_BUTTON_L2: u8 = 25;
pub const GPIO_BUTTON_R1: u8 = 24;
pub const GPIO_BUTTON_R2: u8 = 23;

// ** DISPLAY CONFIGURATION ** //
/// I2C address of the PCF8574 backpack driving the character LCD.
pub const LCD_I2C_ADDR: u16 = 0x27;
pub const LCD_COLUMNS: u8 = 20;
pub const LCD_ROWS: u8 = 4;
/// Each row is split into two quadrants of this many characters.
pub const QUADRANT_WIDTH: u8 = 10;
/// Time the LCD needs after a clear or a write before it accepts the next one.
pub const LCD_SETTLE_MS: u64 = 5;

// ** SIMULATED CHASSIS CONFIGURATION ** //
/// Control period of the simulated drivetrain (milliseconds).
pub const SIM_PERIOD_MS: u64 = 10;
/// Speed limits of the simulated drivetrain
pub const SIM_MAX_LINEAR_SPEED: f64 = 60.0; // inches per second
pub const SIM_MAX_ANGULAR_SPEED: f64 = 360.0; // degrees per second
/// Error below which a motion counts as settled
pub const SIM_LINEAR_TOLERANCE: f64 = 0.25; // inches
pub const SIM_ANGULAR_TOLERANCE: f64 = 1.0; // degrees
