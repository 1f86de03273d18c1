pub mod frontend_wheel_round;
