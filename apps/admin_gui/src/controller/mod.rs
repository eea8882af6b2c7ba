//! Controller layer: UI events, view states, the employee screen controller,
//! and command orchestration.

pub mod employees;
pub mod events;
pub mod orchestration;
pub mod view_state;

pub use employees::EmployeeViewController;
