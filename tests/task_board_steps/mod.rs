//! Step definitions for task board scenarios.


mod given;
mod then;
mod when;
