pub mod delegate;
pub mod storage;
