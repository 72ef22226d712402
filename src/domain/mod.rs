// Domain layer: backend DTOs, form state, view models and the ports the pages depend on.

pub mod forms;
pub mod model;
pub mod ports;
pub mod view;
