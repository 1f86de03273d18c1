pub mod shared_wheel_game;
pub mod suspense;
pub mod wheel_math;
