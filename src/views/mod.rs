pub mod dashboard;
pub mod inertia;
