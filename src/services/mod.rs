pub mod ad_data;
pub mod aggregator;
pub mod normalizer;
pub mod observer;
pub mod retry;
