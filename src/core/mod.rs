// Core utilities shared by the engine and the sandbox

pub mod math;
