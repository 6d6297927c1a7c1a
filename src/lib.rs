pub mod airfoil;
pub mod algorithms;
pub mod conditions;
pub mod errors;
pub mod observe;
pub mod polar;
pub mod serialize;
pub mod settings;
pub mod surface;
pub mod trial_log;
