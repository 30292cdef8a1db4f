pub mod classifier;
pub mod revenue_line;
