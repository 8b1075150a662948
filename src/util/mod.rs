pub mod ground_truth;
pub mod recall;
