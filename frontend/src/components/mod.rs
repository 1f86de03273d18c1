pub mod spin_wheel;

pub use spin_wheel::SpinWheel;
